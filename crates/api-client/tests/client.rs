//! Resource clients against a fake backend: routing, query
//! serialization, payload normalization and facade composition.

use std::sync::{Arc, Mutex};

use axum::{
	extract::{Path, RawQuery},
	http::{HeaderMap, StatusCode},
	response::IntoResponse,
	routing::{get, post, put},
	Json, Router,
};
use serde_json::{json, Value};

use hv_api_client::{
	resources::ItemQuery,
	types::{NotifierUpdate, UserRegistration},
	PublicApi, Requests, StaticToken, UserClient,
};

const TOKEN: &str = "Bearer test-session-token";

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

fn item_summary() -> Value {
	json!({
		"archived": false,
		"createdAt": "2023-01-01T00:00:00Z",
		"description": "",
		"id": "item-1",
		"insured": false,
		"labels": [],
		"name": "Wrench",
		"purchasePrice": "10",
		"quantity": 1,
		"updatedAt": "2023-01-01T00:00:00Z",
	})
}

#[derive(Clone, Default)]
struct Captured {
	query: Arc<Mutex<Option<String>>>,
	body: Arc<Mutex<Option<Value>>>,
}

fn app(captured: Captured) -> Router {
	let query_capture = Arc::clone(&captured.query);
	let body_capture = Arc::clone(&captured.body);

	Router::new()
		.route(
			"/api/v1/status",
			get(|| async {
				Json(json!({
					"allowRegistration": true,
					"build": {"buildTime": "", "commit": "", "version": "0.1.0"},
					"demo": false,
					"health": true,
					"message": "",
					"title": "HomeVault",
					"versions": ["v1"],
				}))
			}),
		)
		.route(
			"/api/v1/users/register",
			post(|Json(body): Json<Value>| async move {
				if body["email"].as_str().unwrap_or_default().is_empty() {
					StatusCode::UNPROCESSABLE_ENTITY
				} else {
					StatusCode::NO_CONTENT
				}
			}),
		)
		.route(
			"/api/v1/users/login",
			post(|Json(body): Json<Value>| async move {
				if body["username"] == "tester@example.com" && body["password"] == "hunter2" {
					Json(json!({
						"token": TOKEN,
						"expiresAt": "2030-01-01T00:00:00Z",
						"attachmentToken": "attachment-capability",
					}))
					.into_response()
				} else {
					StatusCode::UNAUTHORIZED.into_response()
				}
			}),
		)
		.route(
			"/api/v1/items",
			get(move |headers: HeaderMap, RawQuery(query): RawQuery| {
				let query_capture = Arc::clone(&query_capture);
				async move {
					if !authed(&headers) {
						return StatusCode::UNAUTHORIZED.into_response();
					}

					*query_capture.lock().expect("query lock") = query;
					Json(json!({
						"items": [item_summary()],
						"page": 1,
						"pageSize": 50,
						"total": 1,
					}))
					.into_response()
				}
			}),
		)
		.route(
			"/api/v1/items/:id",
			get(|Path(id): Path<String>| async move {
				Json(json!({
					"archived": false,
					"assetId": "000-001",
					"attachments": [],
					"createdAt": "2023-01-01T00:00:00Z",
					"description": "",
					"fields": [],
					"id": id,
					"insured": false,
					"labels": [],
					"lifetimeWarranty": false,
					"manufacturer": "",
					"modelNumber": "",
					"name": "Wrench",
					"notes": "",
					"purchaseFrom": "",
					"purchasePrice": "10",
					"purchaseTime": "0001-01-01T00:00:00Z",
					"quantity": 1,
					"serialNumber": "",
					"soldNotes": "",
					"soldPrice": "0",
					"soldTime": "0001-01-01T00:00:00Z",
					"soldTo": "",
					"updatedAt": "2023-01-02T00:00:00Z",
					"warrantyDetails": "",
					"warrantyExpires": "2027-06-01T00:00:00Z",
				}))
			}),
		)
		.route(
			"/api/v1/notifiers/:id",
			put(move |Path(id): Path<String>, Json(body): Json<Value>| {
				let body_capture = Arc::clone(&body_capture);
				async move {
					*body_capture.lock().expect("body lock") = Some(body);
					Json(json!({
						"createdAt": "2023-01-01T00:00:00Z",
						"groupId": "group-1",
						"id": id,
						"isActive": true,
						"name": "ping",
						"updatedAt": "2023-01-01T00:00:00Z",
						"userId": "user-1",
					}))
				}
			}),
		)
}

fn user_client(base_url: &str) -> UserClient {
	let requests = Requests::new(base_url, StaticToken::from(TOKEN)).expect("client builds");
	UserClient::new(requests, Some("attachment-capability".to_string()))
}

#[tokio::test]
async fn test_status_roundtrip() {
	let base = spawn(app(Captured::default())).await;
	let requests = Requests::new(base.as_str(), StaticToken::default()).expect("client builds");
	let api = PublicApi::new(requests);

	let response = api.status().await.expect("request succeeds");
	let summary = response.data.expect("status decodes");

	assert!(summary.health);
	assert_eq!(summary.title, "HomeVault");
	assert_eq!(summary.build.version, "0.1.0");
}

#[tokio::test]
async fn test_register_then_login_flow() {
	let base = spawn(app(Captured::default())).await;
	let requests = Requests::new(base.as_str(), StaticToken::default()).expect("client builds");
	let api = PublicApi::new(requests);

	let registered = api
		.register(&UserRegistration {
			email: "tester@example.com".to_string(),
			name: "Tester".to_string(),
			password: "hunter2".to_string(),
			token: String::new(),
		})
		.await
		.expect("request succeeds");
	assert_eq!(registered.status, StatusCode::NO_CONTENT);
	assert!(registered.data.is_none());

	let login = api
		.login("tester@example.com", "hunter2", false)
		.await
		.expect("request succeeds");
	assert!(!login.error);

	let result = login.data.expect("token decodes");
	assert_eq!(result.token, TOKEN);
	assert_eq!(result.attachment_token, "attachment-capability");

	let rejected = api
		.login("tester@example.com", "wrong", false)
		.await
		.expect("request succeeds");
	assert!(rejected.error);
	assert_eq!(rejected.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_item_collection_carries_token_and_query() {
	let captured = Captured::default();
	let base = spawn(app(captured.clone())).await;
	let client = user_client(&base);

	let query = ItemQuery {
		page: Some(1),
		page_size: Some(50),
		q: Some("wrench".to_string()),
		location_ids: vec!["l1".to_string(), "l2".to_string()],
		label_ids: vec!["lab".to_string()],
		include_archived: true,
	};

	let response = client.items.get_all(&query).await.expect("request succeeds");
	assert!(!response.error);

	let page = response.data.expect("page decodes");
	assert_eq!(page.total, 1);
	assert_eq!(page.items[0].name, "Wrench");

	// Repeated keys, one per element, in declaration order.
	assert_eq!(
		captured.query.lock().expect("query lock").as_deref(),
		Some("page=1&pageSize=50&q=wrench&locations=l1&locations=l2&labels=lab&includeArchived=true")
	);
}

#[tokio::test]
async fn test_unauthenticated_item_fetch_is_an_error_envelope() {
	let base = spawn(app(Captured::default())).await;
	let requests = Requests::new(base.as_str(), StaticToken::default()).expect("client builds");
	let client = UserClient::new(requests, None);

	let response = client
		.items
		.get_all(&ItemQuery::default())
		.await
		.expect("transport still succeeds");

	assert!(response.error);
	assert_eq!(response.status, StatusCode::UNAUTHORIZED);
	assert!(response.data.is_none());
}

#[tokio::test]
async fn test_item_detail_normalizes_zero_dates() {
	let base = spawn(app(Captured::default())).await;
	let client = user_client(&base);

	let response = client.items.get("item-1").await.expect("request succeeds");
	let item = response.data.expect("item decodes");

	assert_eq!(item.id, "item-1");
	// Zero-date wire values come back as "unset".
	assert!(item.purchase_time.is_none());
	assert!(item.sold_time.is_none());
	// Real dates survive.
	assert!(item.warranty_expires.is_some());
	assert_eq!(item.created_at.to_rfc3339(), "2023-01-01T00:00:00+00:00");
}

#[tokio::test]
async fn test_notifier_update_normalizes_empty_url_to_null() {
	let captured = Captured::default();
	let base = spawn(app(captured.clone())).await;
	let client = user_client(&base);

	client
		.notifiers
		.update(
			"notifier-1",
			&NotifierUpdate {
				is_active: true,
				name: "ping".to_string(),
				url: Some(String::new()),
			},
		)
		.await
		.expect("request succeeds");

	let body = captured
		.body
		.lock()
		.expect("body lock")
		.clone()
		.expect("body captured");
	assert_eq!(body["url"], Value::Null);
	assert_eq!(body["name"], "ping");
}

#[tokio::test]
async fn test_attachment_download_url_carries_capability_token() {
	let base = spawn(app(Captured::default())).await;
	let client = user_client(&base);

	assert_eq!(
		client.items.attachments.download_url("item-1", "att-9"),
		"/api/v1/items/item-1/attachments/att-9?access_token=attachment-capability"
	);

	let requests = Requests::new(base.as_str(), StaticToken::default()).expect("client builds");
	let anonymous = UserClient::new(requests, None);
	assert_eq!(
		anonymous.items.attachments.download_url("item-1", "att-9"),
		"/api/v1/items/item-1/attachments/att-9"
	);
}
