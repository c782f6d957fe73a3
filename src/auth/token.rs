//! Issues and verifies the bearer tokens that authenticate API requests.

use std::fmt::Debug;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::{Error, UserID};

/// How long an access token is valid for after it is issued.
pub const TOKEN_DURATION: Duration = Duration::minutes(15);

/// The contents of a JSON Web Token.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// The ID of the user the token was issued to.
    pub sub: String,
    /// The time the token was issued as a unix timestamp.
    pub iat: i64,
    /// The expiry time of the token as a unix timestamp.
    pub exp: i64,
}

/// Signs and verifies HS256 access tokens with a shared secret.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Create a token service that signs tokens with `secret`.
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Issue a token for `user_id` that is valid from now for [TOKEN_DURATION].
    ///
    /// # Errors
    ///
    /// Returns [Error::TokenCreation] if the token could not be signed.
    pub fn issue(&self, user_id: UserID) -> Result<String, Error> {
        self.issue_at(user_id, OffsetDateTime::now_utc())
    }

    /// Issue a token for `user_id` as if it was issued at `issued_at`.
    ///
    /// # Errors
    ///
    /// Returns [Error::TokenCreation] if the token could not be signed.
    pub fn issue_at(&self, user_id: UserID, issued_at: OffsetDateTime) -> Result<String, Error> {
        let claims = Claims {
            sub: user_id.to_string(),
            iat: issued_at.unix_timestamp(),
            exp: (issued_at + TOKEN_DURATION).unix_timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|error| Error::TokenCreation(error.to_string()))
    }

    /// Check the signature and expiry of `token` and get the user it was issued to.
    ///
    /// # Errors
    ///
    /// Returns [Error::Unauthenticated] if the token is malformed, signed with
    /// another secret, expired, or its subject is not a user ID.
    pub fn verify(&self, token: &str) -> Result<UserID, Error> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|error| {
                tracing::debug!("Rejected access token: {error}");
                Error::Unauthenticated
            })?;

        token_data
            .claims
            .sub
            .parse()
            .map_err(|_| Error::Unauthenticated)
    }
}

impl Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("algorithm", &self.validation.algorithms)
            .field("leeway", &self.validation.leeway)
            .finish_non_exhaustive()
    }
}
