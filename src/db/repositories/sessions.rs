use anyhow::{Context, Result};
use sea_orm::{DatabaseConnection, DbBackend, FromQueryResult, Statement};
use serde::Serialize;

/// Pairs every login with the logoffs of the same (user, client, server)
/// triple that happened strictly later, keeping the latest one. Logins
/// without such a logoff drop out of the inner join. `IS` makes a missing
/// user match a missing user.
const SQL_CLOSED_SESSIONS: &str = r"
    SELECT l.id          AS login_id,
           u.username    AS username,
           c.name        AS client_name,
           s.name        AS server_name,
           l.timestamp   AS login_time,
           MAX(o.timestamp) AS logoff_time
    FROM logins l
    JOIN clients c ON c.id = l.client_id
    JOIN servers s ON s.id = l.server_id
    LEFT JOIN users u ON u.id = l.user_id
    JOIN logoffs o
      ON o.client_id = l.client_id
     AND o.server_id = l.server_id
     AND o.user_id IS l.user_id
     AND o.timestamp > l.timestamp
    GROUP BY l.id
    ORDER BY l.timestamp DESC, l.id DESC
";

/// Latest login per (client, server) pair next to the latest logoff for the
/// same pair. The logoff side is aggregated over the whole pair, not matched
/// to the login or its user, so it can predate the login it sits next to.
/// The logoff side is LEFT JOINed: a pair that has logins but no logoff at
/// all is still listed, with a null logoff, rather than being dropped as an
/// inner join would.
const SQL_LATEST_STATE: &str = r"
    SELECT c.name         AS client_name,
           s.name         AS server_name,
           li.login_time  AS login_time,
           lo.logoff_time AS logoff_time
    FROM (
        SELECT client_id, server_id, MAX(timestamp) AS login_time
        FROM logins
        GROUP BY client_id, server_id
    ) li
    JOIN clients c ON c.id = li.client_id
    JOIN servers s ON s.id = li.server_id
    LEFT JOIN (
        SELECT client_id, server_id, MAX(timestamp) AS logoff_time
        FROM logoffs
        GROUP BY client_id, server_id
    ) lo
      ON lo.client_id = li.client_id
     AND lo.server_id = li.server_id
    ORDER BY c.name, s.name
";

/// A login together with the time it was closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult)]
pub struct SessionRow {
    pub login_id: i32,
    pub username: Option<String>,
    pub client_name: String,
    pub server_name: String,
    pub login_time: String,
    pub logoff_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult)]
pub struct LatestStateRow {
    pub client_name: String,
    pub server_name: String,
    pub login_time: String,
    pub logoff_time: Option<String>,
}

pub struct SessionRepository {
    conn: DatabaseConnection,
}

impl SessionRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn closed_sessions(&self) -> Result<Vec<SessionRow>> {
        SessionRow::find_by_statement(Statement::from_string(
            DbBackend::Sqlite,
            SQL_CLOSED_SESSIONS,
        ))
        .all(&self.conn)
        .await
        .context("Failed to query closed sessions")
    }

    pub async fn latest_state(&self) -> Result<Vec<LatestStateRow>> {
        LatestStateRow::find_by_statement(Statement::from_string(
            DbBackend::Sqlite,
            SQL_LATEST_STATE,
        ))
        .all(&self.conn)
        .await
        .context("Failed to query latest client/server state")
    }
}
