use serde_json::json;

use crate::{
	requests::{ApiResponse, Requests},
	route::route,
	types::{NotifierCreate, NotifierOut, NotifierUpdate},
	ApiResult,
};

#[derive(Clone)]
pub struct NotifiersApi {
	http: Requests,
}

impl NotifiersApi {
	pub(crate) fn new(http: Requests) -> Self {
		Self { http }
	}

	pub async fn get_all(&self) -> ApiResult<ApiResponse<Vec<NotifierOut>>> {
		self.http.get(&route("/notifiers", &[])).await
	}

	pub async fn create(&self, data: &NotifierCreate) -> ApiResult<ApiResponse<NotifierOut>> {
		self.http.post(&route("/notifiers", &[]), data).await
	}

	pub async fn update(&self, id: &str, data: &NotifierUpdate) -> ApiResult<ApiResponse<NotifierOut>> {
		// An empty URL means "keep the secret one on file"; it goes out
		// as an explicit null so the backend skips the field.
		let mut data = data.clone();
		if data.url.as_deref() == Some("") {
			data.url = None;
		}

		self.http
			.put(&route(&format!("/notifiers/{id}"), &[]), &data)
			.await
	}

	pub async fn delete(&self, id: &str) -> ApiResult<ApiResponse<()>> {
		self.http
			.delete(&route(&format!("/notifiers/{id}"), &[]))
			.await
	}

	/// Fires a test notification at the given URL without saving it.
	pub async fn test(&self, url: &str) -> ApiResult<ApiResponse<()>> {
		self.http
			.post(&route("/notifiers/test", &[]), &json!({ "url": url }))
			.await
	}
}
