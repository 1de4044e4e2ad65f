use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::db::is_unique_violation;
use crate::entities::{prelude::*, tokens};

/// An issued bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRecord {
    pub id: i32,
    pub email: String,
    pub token: String,
    pub created_at: String,
}

impl From<tokens::Model> for TokenRecord {
    fn from(model: tokens::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            token: model.token,
            created_at: model.created_at,
        }
    }
}

/// Result of trying to store a freshly generated token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted(TokenRecord),
    /// The email already holds a token; nothing was written.
    EmailTaken,
    /// The generated value is already in use by another email.
    TokenTaken,
}

pub struct TokenRepository {
    conn: DatabaseConnection,
}

impl TokenRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<TokenRecord>> {
        let token = Tokens::find()
            .filter(tokens::Column::Email.eq(email))
            .one(&self.conn)
            .await
            .context("Failed to query token by email")?;

        Ok(token.map(TokenRecord::from))
    }

    /// Exact-match lookup of a presented bearer token
    pub async fn get_by_token(&self, token: &str) -> Result<Option<TokenRecord>> {
        let token = Tokens::find()
            .filter(tokens::Column::Token.eq(token))
            .one(&self.conn)
            .await
            .context("Failed to query token")?;

        Ok(token.map(TokenRecord::from))
    }

    pub async fn insert(&self, email: &str, token: &str) -> Result<InsertOutcome> {
        if self.get_by_email(email).await?.is_some() {
            return Ok(InsertOutcome::EmailTaken);
        }

        let active = tokens::ActiveModel {
            email: Set(email.to_string()),
            token: Set(token.to_string()),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        match active.insert(&self.conn).await {
            Ok(model) => Ok(InsertOutcome::Inserted(model.into())),
            // Both columns are unique; work out which one a concurrent writer took.
            Err(e) if is_unique_violation(&e) => {
                if self.get_by_email(email).await?.is_some() {
                    Ok(InsertOutcome::EmailTaken)
                } else {
                    Ok(InsertOutcome::TokenTaken)
                }
            }
            Err(e) => Err(e).context("Failed to insert token"),
        }
    }
}

/// Generate a random bearer token: `bytes` random bytes as lowercase hex
#[must_use]
pub fn generate_token(bytes: usize) -> String {
    use rand::RngCore;

    let mut buf = vec![0u8; bytes];
    rand::rng().fill_bytes(&mut buf);

    buf.iter().fold(String::with_capacity(bytes * 2), |mut acc, b| {
        use std::fmt::Write;
        let _ = write!(acc, "{b:02x}");
        acc
    })
}
