//! Checks shared by the request bodies of every resource.

use crate::Error;

/// Trim `value` and make sure something is left.
///
/// # Errors
///
/// Returns [Error::InvalidInput] naming `field` if `value` is empty or only whitespace.
pub fn require_text(field: &str, value: &str) -> Result<String, Error> {
    let value = value.trim();

    if value.is_empty() {
        return Err(Error::InvalidInput(format!("missing {field}")));
    }

    Ok(value.to_owned())
}

/// Make sure `amount` is a finite number greater than zero.
///
/// # Errors
///
/// Returns [Error::InvalidInput] naming `field` otherwise.
pub fn require_positive(field: &str, amount: f64) -> Result<f64, Error> {
    if amount.is_finite() && amount > 0.0 {
        Ok(amount)
    } else {
        Err(Error::InvalidInput(format!("{field} must be positive")))
    }
}
