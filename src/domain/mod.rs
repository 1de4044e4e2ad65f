//! Domain primitives shared by the storage and service layers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kinds of entity that are created on first reference by natural key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Client,
    Server,
    User,
}

impl EntityKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Server => "server",
            Self::User => "user",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which side of a session an event records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Login,
    Logoff,
}

impl EventKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Logoff => "logoff",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A login or logoff as reported by a client.
///
/// `timestamp` is opaque: it is stored exactly as given and only ever
/// compared as a string, so callers should send a sortable format such as
/// ISO-8601.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEvent {
    pub username: Option<String>,
    pub client: String,
    pub server: String,
    pub timestamp: String,
}

/// Which report the dashboard renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardView {
    /// Every closed session (login paired with its latest later logoff).
    #[default]
    Sessions,
    /// Most recent login and logoff per client/server pair.
    Latest,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_display_lowercase() {
        assert_eq!(EntityKind::Client.to_string(), "client");
        assert_eq!(EntityKind::User.to_string(), "user");
        assert_eq!(EventKind::Logoff.to_string(), "logoff");
    }

    #[test]
    fn dashboard_view_defaults_to_sessions() {
        assert_eq!(DashboardView::default(), DashboardView::Sessions);
        let view: DashboardView = serde_json::from_str("\"latest\"").unwrap();
        assert_eq!(view, DashboardView::Latest);
    }
}
