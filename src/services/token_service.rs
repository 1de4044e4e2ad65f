//! Domain service for the bearer tokens that gate the reporting endpoints.
//!
//! Tokens are opaque random strings bound to one email each. There is no
//! expiry, rotation or revocation: a token stays valid for as long as its
//! row exists.

use serde::Serialize;
use thiserror::Error;

use crate::db::TokenRecord;

/// Errors specific to token operations.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("A token already exists for {0}")]
    Conflict(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for TokenError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for TokenError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

/// A newly issued token, returned once to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    pub email: String,
    pub token: String,
}

/// Domain service trait for token issuance and validation.
#[async_trait::async_trait]
pub trait TokenService: Send + Sync {
    /// Issues a token for `email`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Conflict`] if the email already holds a token.
    async fn issue(&self, email: &str) -> Result<IssuedToken, TokenError>;

    /// Looks up a presented token.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Unauthorized`] unless the token matches exactly.
    async fn validate(&self, token: &str) -> Result<TokenRecord, TokenError>;
}
