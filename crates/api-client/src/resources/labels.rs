use crate::{
	requests::{ApiResponse, Requests},
	route::route,
	types::{LabelCreate, LabelOut},
	ApiResult,
};

#[derive(Clone)]
pub struct LabelsApi {
	http: Requests,
}

impl LabelsApi {
	pub(crate) fn new(http: Requests) -> Self {
		Self { http }
	}

	pub async fn get_all(&self) -> ApiResult<ApiResponse<Vec<LabelOut>>> {
		self.http.get(&route("/labels", &[])).await
	}

	pub async fn create(&self, label: &LabelCreate) -> ApiResult<ApiResponse<LabelOut>> {
		self.http.post(&route("/labels", &[]), label).await
	}

	pub async fn get(&self, id: &str) -> ApiResult<ApiResponse<LabelOut>> {
		self.http.get(&route(&format!("/labels/{id}"), &[])).await
	}

	pub async fn update(&self, id: &str, label: &LabelCreate) -> ApiResult<ApiResponse<LabelOut>> {
		self.http
			.put(&route(&format!("/labels/{id}"), &[]), label)
			.await
	}

	pub async fn delete(&self, id: &str) -> ApiResult<ApiResponse<()>> {
		self.http.delete(&route(&format!("/labels/{id}"), &[])).await
	}
}
