//! Database ID type definition.

use uuid::Uuid;

/// Alias for the type used for row IDs in the application database.
///
/// IDs are random, so they reveal nothing about how many rows exist or in which
/// order they were created.
pub type DatabaseId = Uuid;

/// Generate a new, random row ID.
pub fn new_database_id() -> DatabaseId {
    Uuid::new_v4()
}
