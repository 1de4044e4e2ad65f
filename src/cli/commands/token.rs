//! Token issuance command handler

use crate::api::validation::validate_email;
use crate::config::Config;
use crate::services::TokenError;
use crate::state::SharedState;

pub async fn cmd_issue_token(config: Config, email: &str) -> anyhow::Result<()> {
    let email = validate_email(email)?;
    let state = SharedState::new(config).await?;

    match state.token_service.issue(email).await {
        Ok(issued) => {
            println!("Token for {}:", issued.email);
            println!("{}", issued.token);
            Ok(())
        }
        Err(TokenError::Conflict(email)) => {
            anyhow::bail!("A token has already been issued for {email}; tokens are not rotated")
        }
        Err(e) => Err(e.into()),
    }
}
