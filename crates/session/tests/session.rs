//! End-to-end session lifecycle against a fake backend: login persists
//! the token, requests carry it automatically, a 401 anywhere tears the
//! session down, and logout clears local state no matter what the server
//! says.

use axum::{
	http::{HeaderMap, StatusCode},
	response::IntoResponse,
	routing::{get, post},
	Json, Router,
};
use chrono::{Duration, Utc};
use serde_json::json;
use tempfile::TempDir;

use hv_session::{public_client, SessionManager, SessionState};

const TOKEN: &str = "Bearer issued-by-fake-backend";

async fn spawn(app: Router) -> String {
	let server = axum::Server::bind(&"127.0.0.1:0".parse().expect("loopback address"))
		.serve(app.into_make_service());
	let addr = server.local_addr();
	tokio::spawn(server);

	format!("http://{addr}")
}

fn authed(headers: &HeaderMap) -> bool {
	headers
		.get("authorization")
		.and_then(|value| value.to_str().ok())
		== Some(TOKEN)
}

/// Fake backend. `session_ttl` controls the expiry stamped on issued
/// tokens, `logout_status` what the logout endpoint answers.
fn app(session_ttl: Duration, logout_status: StatusCode) -> Router {
	Router::new()
		.route(
			"/api/v1/users/login",
			post(move |Json(body): Json<serde_json::Value>| async move {
				if body["password"] == "hunter2" {
					Json(json!({
						"token": TOKEN,
						"expiresAt": (Utc::now() + session_ttl).to_rfc3339(),
						"attachmentToken": "attachment-capability",
					}))
					.into_response()
				} else {
					StatusCode::UNAUTHORIZED.into_response()
				}
			}),
		)
		.route(
			"/api/v1/users/logout",
			post(move || async move { logout_status }),
		)
		.route(
			"/api/v1/labels",
			get(|headers: HeaderMap| async move {
				if authed(&headers) {
					Json(json!([])).into_response()
				} else {
					StatusCode::UNAUTHORIZED.into_response()
				}
			}),
		)
		// The session on the server died, whatever the client thinks.
		.route(
			"/api/v1/groups",
			get(|| async { StatusCode::UNAUTHORIZED }),
		)
}

fn default_app() -> Router {
	app(Duration::hours(1), StatusCode::NO_CONTENT)
}

#[tokio::test]
async fn test_login_authorizes_and_requests_carry_the_token() {
	let dir = TempDir::new().expect("tempdir");
	let base = spawn(default_app()).await;

	let manager = SessionManager::new(dir.path()).await.expect("manager");
	assert_eq!(manager.state(), SessionState::Unauthenticated);

	let public = public_client(base.as_str()).expect("public client");
	let login = manager
		.login(&public, "tester@example.com", "hunter2", true)
		.await
		.expect("login call succeeds");

	assert!(!login.error);
	assert!(manager.is_authorized());
	assert_eq!(manager.state(), SessionState::Authenticated);
	assert_eq!(
		manager.attachment_token().as_deref(),
		Some("attachment-capability")
	);

	// The fake backend 401s anything without the freshly issued token,
	// so a clean list proves the header went out automatically.
	let client = manager.user_client(base.as_str()).expect("user client");
	let labels = client.labels.get_all().await.expect("labels call succeeds");
	assert!(!labels.error);
}

#[tokio::test]
async fn test_failed_login_leaves_state_unchanged() {
	let dir = TempDir::new().expect("tempdir");
	let base = spawn(default_app()).await;

	let manager = SessionManager::new(dir.path()).await.expect("manager");
	let public = public_client(base.as_str()).expect("public client");

	let login = manager
		.login(&public, "tester@example.com", "wrong", true)
		.await
		.expect("login call succeeds");

	assert!(login.error);
	assert_eq!(manager.state(), SessionState::Unauthenticated);
	assert!(!manager.is_authorized());
}

#[tokio::test]
async fn test_server_side_401_invalidates_without_logout() {
	let dir = TempDir::new().expect("tempdir");
	let base = spawn(default_app()).await;

	let manager = SessionManager::new(dir.path()).await.expect("manager");
	let public = public_client(base.as_str()).expect("public client");
	manager
		.login(&public, "tester@example.com", "hunter2", true)
		.await
		.expect("login call succeeds");
	assert!(manager.is_authorized());

	let client = manager.user_client(base.as_str()).expect("user client");
	let response = client.group.get().await.expect("call succeeds");

	assert!(response.error);
	assert_eq!(response.status, StatusCode::UNAUTHORIZED);
	// The interceptor saw the 401; nobody called logout.
	assert_eq!(manager.state(), SessionState::Unauthenticated);
	assert!(!manager.is_authorized());
}

#[tokio::test]
async fn test_expiry_lapses_by_clock_alone() {
	let dir = TempDir::new().expect("tempdir");
	let base = spawn(app(Duration::milliseconds(150), StatusCode::NO_CONTENT)).await;

	let manager = SessionManager::new(dir.path()).await.expect("manager");
	let public = public_client(base.as_str()).expect("public client");
	manager
		.login(&public, "tester@example.com", "hunter2", true)
		.await
		.expect("login call succeeds");

	assert!(manager.is_authorized());

	tokio::time::sleep(std::time::Duration::from_millis(300)).await;

	assert!(!manager.is_authorized());
	assert!(manager.is_expired());
	assert_eq!(manager.state(), SessionState::Expired);
}

#[tokio::test]
async fn test_logout_clears_locally_even_when_the_server_fails() {
	let dir = TempDir::new().expect("tempdir");
	let base = spawn(app(Duration::hours(1), StatusCode::INTERNAL_SERVER_ERROR)).await;

	let manager = SessionManager::new(dir.path()).await.expect("manager");
	let public = public_client(base.as_str()).expect("public client");
	manager
		.login(&public, "tester@example.com", "hunter2", true)
		.await
		.expect("login call succeeds");
	assert!(manager.is_authorized());

	let client = manager.user_client(base.as_str()).expect("user client");
	let logout = manager.logout(&client).await.expect("logout call succeeds");

	// The failure is surfaced, the local session is gone anyway.
	assert!(logout.error);
	assert_eq!(manager.state(), SessionState::Unauthenticated);

	// And the cleared state is what got persisted.
	drop(manager);
	let reloaded = SessionManager::new(dir.path()).await.expect("manager");
	assert_eq!(reloaded.state(), SessionState::Unauthenticated);
}

#[tokio::test]
async fn test_persisted_session_survives_a_restart() {
	let dir = TempDir::new().expect("tempdir");
	let base = spawn(default_app()).await;

	{
		let manager = SessionManager::new(dir.path()).await.expect("manager");
		let public = public_client(base.as_str()).expect("public client");
		manager
			.login(&public, "tester@example.com", "hunter2", true)
			.await
			.expect("login call succeeds");
		assert!(manager.is_authorized());
	}

	let manager = SessionManager::new(dir.path()).await.expect("manager");
	assert!(manager.is_authorized());

	// The reloaded token still authenticates requests.
	let client = manager.user_client(base.as_str()).expect("user client");
	let labels = client.labels.get_all().await.expect("labels call succeeds");
	assert!(!labels.error);
}
