use axum::{
    extract::{Query, Request, State, rejection::QueryRejection},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, AppState};

/// Name of the query parameter and header carrying the bearer token.
pub const TOKEN_PARAM: &str = "token";

#[derive(Debug, Default, Deserialize)]
pub struct TokenQuery {
    pub token: Option<String>,
}

/// Email of the token that authorized a request. Set on the response so
/// outer layers can attribute it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedEmail(pub String);

/// Gate for the reporting routes. Accepts the token from:
/// 1. `token` header
/// 2. `Authorization: Bearer <token>` header
/// 3. `?token=` query parameter (when enabled in config)
///
/// A query string that does not parse counts as carrying no token.
///
/// On success the matching [`crate::db::TokenRecord`] is added to the
/// request extensions and an [`AuthenticatedEmail`] to the response's.
pub async fn token_middleware(
    State(state): State<Arc<AppState>>,
    query: Result<Query<TokenQuery>, QueryRejection>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let allow_query = state.config().security.allow_token_in_query;
    let query = query.map(|Query(q)| q).unwrap_or_default();

    let Some(token) = extract_token(&query, &headers, allow_query) else {
        return Err(ApiError::unauthorized());
    };

    let record = state.token_service().validate(&token).await?;
    let email = AuthenticatedEmail(record.email.clone());
    request.extensions_mut().insert(record);

    let mut response = next.run(request).await;
    response.extensions_mut().insert(email);
    Ok(response)
}

/// Extract the bearer token from headers or, if allowed, the query string
fn extract_token(query: &TokenQuery, headers: &HeaderMap, allow_query: bool) -> Option<String> {
    if let Some(value) = headers.get(TOKEN_PARAM)
        && let Ok(token) = value.to_str()
    {
        return Some(token.trim().to_string());
    }

    if let Some(auth_header) = headers.get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
    {
        return Some(token.trim().to_string());
    }

    if allow_query {
        return query.token.clone();
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn header_wins_over_query() {
        let mut headers = HeaderMap::new();
        headers.insert(TOKEN_PARAM, HeaderValue::from_static("from-header"));
        let query = TokenQuery {
            token: Some("from-query".to_string()),
        };

        assert_eq!(
            extract_token(&query, &headers, true).as_deref(),
            Some("from-header")
        );
    }

    #[test]
    fn bearer_header_is_accepted() {
        let mut headers = HeaderMap::new();
        headers.insert("Authorization", HeaderValue::from_static("Bearer abc123 "));

        assert_eq!(
            extract_token(&TokenQuery::default(), &headers, false).as_deref(),
            Some("abc123")
        );
    }

    #[test]
    fn query_token_respects_config() {
        let query = TokenQuery {
            token: Some("from-query".to_string()),
        };
        let headers = HeaderMap::new();

        assert_eq!(
            extract_token(&query, &headers, true).as_deref(),
            Some("from-query")
        );
        assert_eq!(extract_token(&query, &headers, false), None);
    }
}
