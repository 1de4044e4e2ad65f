use super::{ApiError, LogRequest};
use crate::domain::SessionEvent;

const MAX_NAME_LEN: usize = 255;
const MAX_EMAIL_LEN: usize = 254;

/// Checks a client/server/user name. Names are stored exactly as sent.
pub fn validate_name<'a>(field: &str, value: &'a str) -> Result<&'a str, ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::validation(format!("{field} cannot be empty")));
    }

    if value.len() > MAX_NAME_LEN {
        return Err(ApiError::validation(format!(
            "{field} must be {MAX_NAME_LEN} characters or less"
        )));
    }

    Ok(value)
}

pub fn validate_timestamp(value: &str) -> Result<&str, ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::validation("time cannot be empty"));
    }
    Ok(value)
}

/// Turns a request body into an event. A blank `username` counts as absent.
pub fn validate_log_request(request: LogRequest) -> Result<SessionEvent, ApiError> {
    validate_name("clientname", &request.clientname)?;
    validate_name("servername", &request.servername)?;
    validate_timestamp(&request.time)?;

    let username = match request.username {
        Some(name) if name.trim().is_empty() => None,
        Some(name) => {
            validate_name("username", &name)?;
            Some(name)
        }
        None => None,
    };

    Ok(SessionEvent {
        username,
        client: request.clientname,
        server: request.servername,
        timestamp: request.time,
    })
}

/// Minimal shape check: one `@`, something on both sides, a dot in the domain.
pub fn validate_email(email: &str) -> Result<&str, ApiError> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ApiError::validation("email cannot be empty"));
    }

    if email.len() > MAX_EMAIL_LEN {
        return Err(ApiError::validation(format!(
            "email must be {MAX_EMAIL_LEN} characters or less"
        )));
    }

    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };

    if !valid {
        return Err(ApiError::validation(format!("Invalid email address: {email}")));
    }

    Ok(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(username: Option<&str>, client: &str, server: &str, time: &str) -> LogRequest {
        LogRequest {
            username: username.map(str::to_string),
            clientname: client.to_string(),
            servername: server.to_string(),
            time: time.to_string(),
        }
    }

    #[test]
    fn test_validate_log_request() {
        let event =
            validate_log_request(request(Some("alice"), "c1", "s1", "2024-01-01T10:00:00"))
                .unwrap();
        assert_eq!(event.username.as_deref(), Some("alice"));
        assert_eq!(event.client, "c1");
        assert_eq!(event.timestamp, "2024-01-01T10:00:00");

        assert!(validate_log_request(request(None, "", "s1", "t")).is_err());
        assert!(validate_log_request(request(None, "c1", "   ", "t")).is_err());
        assert!(validate_log_request(request(None, "c1", "s1", "")).is_err());
        assert!(validate_log_request(request(None, &"x".repeat(256), "s1", "t")).is_err());
    }

    #[test]
    fn test_blank_username_is_absent() {
        let event = validate_log_request(request(Some("  "), "c1", "s1", "t")).unwrap();
        assert_eq!(event.username, None);
    }

    #[test]
    fn test_validate_email() {
        assert_eq!(validate_email("a@b.com").unwrap(), "a@b.com");
        assert_eq!(validate_email("  a@b.com ").unwrap(), "a@b.com");
        assert!(validate_email("").is_err());
        assert!(validate_email("ab.com").is_err());
        assert!(validate_email("@b.com").is_err());
        assert!(validate_email("a@").is_err());
        assert!(validate_email("a@b").is_err());
        assert!(validate_email("a@@b.com").is_err());
        assert!(validate_email("a b@c.com").is_err());
    }
}
