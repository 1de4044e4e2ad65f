use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use logon_api::config::Config;
use serde_json::{Value, json};
use tower::ServiceExt;

struct TestApp {
    router: Router,
    token: String,
}

impl TestApp {
    async fn spawn() -> Self {
        let db_path =
            std::env::temp_dir().join(format!("logon-api-report-{}.db", uuid::Uuid::new_v4()));

        let mut config = Config::default();
        config.database.url = format!("sqlite:{}", db_path.display());

        let state = logon_api::api::create_app_state_from_config(config, None)
            .await
            .expect("Failed to create app state");
        let token = state
            .token_service()
            .issue("reports@example.com")
            .await
            .expect("Failed to issue token")
            .token;

        Self {
            router: logon_api::api::router(state),
            token,
        }
    }

    async fn send(&self, uri: &str, username: Option<&str>, client: &str, server: &str, time: &str) {
        let mut body = json!({ "clientname": client, "servername": server, "time": time });
        if let Some(username) = username {
            body["username"] = json!(username);
        }

        let response = self
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    async fn login(&self, username: Option<&str>, client: &str, server: &str, time: &str) {
        self.send("/api/log", username, client, server, time).await;
    }

    async fn logoff(&self, username: Option<&str>, client: &str, server: &str, time: &str) {
        self.send("/api/logoff", username, client, server, time).await;
    }

    async fn get_data(&self, uri: &str) -> Value {
        let response = self
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .header("token", &self.token)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        body["data"].clone()
    }
}

#[tokio::test]
async fn test_closed_session_is_reported() {
    let app = TestApp::spawn().await;

    app.login(Some("alice"), "C1", "S1", "2024-01-01 09:00").await;
    app.logoff(Some("alice"), "C1", "S1", "2024-01-01 17:00").await;

    let data = app.get_data("/dashboard").await;
    let rows = data["rows"].as_array().unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["username"], "alice");
    assert_eq!(rows[0]["client_name"], "C1");
    assert_eq!(rows[0]["server_name"], "S1");
    assert_eq!(rows[0]["login_time"], "2024-01-01 09:00");
    assert_eq!(rows[0]["logoff_time"], "2024-01-01 17:00");
}

#[tokio::test]
async fn test_open_sessions_and_other_pairs_are_excluded() {
    let app = TestApp::spawn().await;

    // Still open.
    app.login(Some("alice"), "C1", "S1", "2024-01-02 09:00").await;
    // Logoff on a different server does not close it.
    app.logoff(Some("alice"), "C1", "S2", "2024-01-02 10:00").await;
    // Logoff before the login does not close it either.
    app.logoff(Some("alice"), "C1", "S1", "2024-01-02 08:00").await;

    let data = app.get_data("/dashboard?view=sessions").await;
    assert_eq!(data["rows"], json!([]));
}

#[tokio::test]
async fn test_latest_view_includes_open_pairs() {
    let app = TestApp::spawn().await;

    app.login(Some("alice"), "C1", "S1", "2024-01-01 09:00").await;
    app.logoff(Some("alice"), "C1", "S1", "2024-01-01 17:00").await;
    app.login(Some("alice"), "C1", "S1", "2024-01-02 09:00").await;
    app.login(None, "C2", "S1", "2024-01-02 10:00").await;

    let data = app.get_data("/dashboard?view=latest").await;
    assert_eq!(data["view"], "latest");

    let rows = data["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);

    assert_eq!(rows[0]["client_name"], "C1");
    assert_eq!(rows[0]["login_time"], "2024-01-02 09:00");
    assert_eq!(rows[0]["logoff_time"], "2024-01-01 17:00");

    assert_eq!(rows[1]["client_name"], "C2");
    assert_eq!(rows[1]["logoff_time"], Value::Null);
}

#[tokio::test]
async fn test_stats_count_logins_per_name() {
    let app = TestApp::spawn().await;

    app.login(Some("alice"), "C1", "S1", "2024-01-01 09:00").await;
    app.login(Some("bob"), "C1", "S2", "2024-01-01 09:30").await;
    app.login(None, "C2", "S1", "2024-01-01 10:00").await;
    app.logoff(Some("alice"), "C3", "S3", "2024-01-01 11:00").await;

    let data = app.get_data("/stats").await;

    assert_eq!(
        data["clients"],
        json!([
            { "name": "C1", "count": 2 },
            { "name": "C2", "count": 1 },
        ])
    );
    assert_eq!(
        data["servers"],
        json!([
            { "name": "S1", "count": 2 },
            { "name": "S2", "count": 1 },
        ])
    );
}
