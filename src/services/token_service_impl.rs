//! `SeaORM` implementation of the `TokenService` trait.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::db::repositories::tokens::generate_token;
use crate::db::{InsertOutcome, Store, TokenRecord};
use crate::services::token_service::{IssuedToken, TokenError, TokenService};

/// Fresh values to try if a generated token is already taken.
const MAX_GENERATION_ATTEMPTS: u32 = 3;

pub struct SeaOrmTokenService {
    store: Store,
    token_bytes: usize,
}

impl SeaOrmTokenService {
    #[must_use]
    pub const fn new(store: Store, token_bytes: usize) -> Self {
        Self { store, token_bytes }
    }
}

#[async_trait]
impl TokenService for SeaOrmTokenService {
    async fn issue(&self, email: &str) -> Result<IssuedToken, TokenError> {
        for _ in 0..MAX_GENERATION_ATTEMPTS {
            let candidate = generate_token(self.token_bytes);

            match self.store.insert_token(email, &candidate).await? {
                InsertOutcome::Inserted(record) => {
                    metrics::counter!("tokens_issued_total").increment(1);
                    info!(email = %record.email, "Token issued");
                    return Ok(IssuedToken {
                        email: record.email,
                        token: record.token,
                    });
                }
                InsertOutcome::EmailTaken => {
                    return Err(TokenError::Conflict(email.to_string()));
                }
                InsertOutcome::TokenTaken => {
                    warn!("Generated token collided with an existing one, regenerating");
                }
            }
        }

        Err(TokenError::Internal(format!(
            "could not generate a unique token after {MAX_GENERATION_ATTEMPTS} attempts"
        )))
    }

    async fn validate(&self, token: &str) -> Result<TokenRecord, TokenError> {
        if token.is_empty() {
            return Err(TokenError::Unauthorized);
        }

        self.store
            .get_token(token)
            .await?
            .ok_or(TokenError::Unauthorized)
    }
}
