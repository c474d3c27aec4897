use reqwest::multipart::{Form, Part};

use crate::{
	base::auth_url,
	requests::{ApiResponse, Requests},
	route::{route, QueryValue},
	types::{
		AttachmentType, ItemAttachmentUpdate, ItemCreate, ItemOut, ItemPatch, ItemPath,
		ItemSummary, ItemUpdate, MaintenanceEntry, MaintenanceEntryCreate, MaintenanceEntryUpdate,
		MaintenanceLog, PaginationResult,
	},
	ApiResult,
};

/// Search and pagination filters for the item collection.
#[derive(Debug, Clone, Default)]
pub struct ItemQuery {
	pub page: Option<i64>,
	pub page_size: Option<i64>,
	pub q: Option<String>,
	pub location_ids: Vec<String>,
	pub label_ids: Vec<String>,
	pub include_archived: bool,
}

impl ItemQuery {
	fn to_params(&self) -> Vec<(&'static str, QueryValue)> {
		vec![
			("page", self.page.into()),
			("pageSize", self.page_size.into()),
			("q", self.q.clone().into()),
			("locations", self.location_ids.clone().into()),
			("labels", self.label_ids.clone().into()),
			("includeArchived", self.include_archived.into()),
		]
	}
}

#[derive(Clone)]
pub struct ItemsApi {
	http: Requests,
	attachment_token: Option<String>,
	pub attachments: ItemAttachmentsApi,
	pub maintenance: ItemMaintenanceApi,
	pub fields: ItemFieldsApi,
}

impl ItemsApi {
	pub(crate) fn new(http: Requests, attachment_token: Option<String>) -> Self {
		Self {
			attachments: ItemAttachmentsApi::new(http.clone(), attachment_token.clone()),
			maintenance: ItemMaintenanceApi::new(http.clone()),
			fields: ItemFieldsApi::new(http.clone()),
			http,
			attachment_token,
		}
	}

	pub async fn get_all(&self, query: &ItemQuery) -> ApiResult<ApiResponse<PaginationResult<ItemSummary>>> {
		self.http.get(&route("/items", &query.to_params())).await
	}

	pub async fn create(&self, item: &ItemCreate) -> ApiResult<ApiResponse<ItemOut>> {
		self.http.post(&route("/items", &[]), item).await
	}

	pub async fn get(&self, id: &str) -> ApiResult<ApiResponse<ItemOut>> {
		self.http.get(&route(&format!("/items/{id}"), &[])).await
	}

	pub async fn update(&self, id: &str, item: &ItemUpdate) -> ApiResult<ApiResponse<ItemOut>> {
		self.http.put(&route(&format!("/items/{id}"), &[]), item).await
	}

	pub async fn patch(&self, id: &str, patch: &ItemPatch) -> ApiResult<ApiResponse<ItemOut>> {
		self.http
			.patch(&route(&format!("/items/{id}"), &[]), patch)
			.await
	}

	pub async fn delete(&self, id: &str) -> ApiResult<ApiResponse<()>> {
		self.http.delete(&route(&format!("/items/{id}"), &[])).await
	}

	/// Ancestry of an item, from the root location down to the item.
	pub async fn full_path(&self, id: &str) -> ApiResult<ApiResponse<Vec<ItemPath>>> {
		self.http
			.get(&route(&format!("/items/{id}/path"), &[]))
			.await
	}

	/// Bulk import from a CSV export, uploaded as a multipart form.
	pub async fn import_csv(
		&self,
		content: Vec<u8>,
		filename: &str,
	) -> ApiResult<ApiResponse<()>> {
		let form = Form::new().part("csv", Part::bytes(content).file_name(filename.to_string()));
		self.http.post_form(&route("/items/import", &[]), form).await
	}

	/// URL for the item's primary image, authorized by the attachment
	/// capability token.
	pub fn image_url(&self, id: &str, image_id: &str) -> String {
		auth_url(
			&route(&format!("/items/{id}/attachments/{image_id}"), &[]),
			self.attachment_token.as_deref(),
		)
	}
}

/// Child client for the files attached to an item.
#[derive(Clone)]
pub struct ItemAttachmentsApi {
	http: Requests,
	attachment_token: Option<String>,
}

impl ItemAttachmentsApi {
	pub(crate) fn new(http: Requests, attachment_token: Option<String>) -> Self {
		Self {
			http,
			attachment_token,
		}
	}

	pub async fn add(
		&self,
		item_id: &str,
		content: Vec<u8>,
		filename: &str,
		kind: AttachmentType,
	) -> ApiResult<ApiResponse<ItemOut>> {
		let form = Form::new()
			.part("file", Part::bytes(content).file_name(filename.to_string()))
			.text("type", kind.as_str())
			.text("name", filename.to_string());

		self.http
			.post_form(&route(&format!("/items/{item_id}/attachments"), &[]), form)
			.await
	}

	pub async fn update(
		&self,
		item_id: &str,
		attachment_id: &str,
		data: &ItemAttachmentUpdate,
	) -> ApiResult<ApiResponse<ItemOut>> {
		self.http
			.put(
				&route(&format!("/items/{item_id}/attachments/{attachment_id}"), &[]),
				data,
			)
			.await
	}

	pub async fn delete(&self, item_id: &str, attachment_id: &str) -> ApiResult<ApiResponse<()>> {
		self.http
			.delete(&route(
				&format!("/items/{item_id}/attachments/{attachment_id}"),
				&[],
			))
			.await
	}

	/// Capability URL for a direct, header-less attachment download.
	pub fn download_url(&self, item_id: &str, attachment_id: &str) -> String {
		auth_url(
			&route(&format!("/items/{item_id}/attachments/{attachment_id}"), &[]),
			self.attachment_token.as_deref(),
		)
	}
}

/// Child client for an item's maintenance log.
#[derive(Clone)]
pub struct ItemMaintenanceApi {
	http: Requests,
}

impl ItemMaintenanceApi {
	pub(crate) fn new(http: Requests) -> Self {
		Self { http }
	}

	pub async fn get_log(&self, item_id: &str) -> ApiResult<ApiResponse<MaintenanceLog>> {
		self.http
			.get(&route(&format!("/items/{item_id}/maintenance"), &[]))
			.await
	}

	pub async fn create(
		&self,
		item_id: &str,
		entry: &MaintenanceEntryCreate,
	) -> ApiResult<ApiResponse<MaintenanceEntry>> {
		self.http
			.post(&route(&format!("/items/{item_id}/maintenance"), &[]), entry)
			.await
	}

	pub async fn update(
		&self,
		item_id: &str,
		entry_id: &str,
		entry: &MaintenanceEntryUpdate,
	) -> ApiResult<ApiResponse<MaintenanceEntry>> {
		self.http
			.put(
				&route(&format!("/items/{item_id}/maintenance/{entry_id}"), &[]),
				entry,
			)
			.await
	}

	pub async fn delete(&self, item_id: &str, entry_id: &str) -> ApiResult<ApiResponse<()>> {
		self.http
			.delete(&route(
				&format!("/items/{item_id}/maintenance/{entry_id}"),
				&[],
			))
			.await
	}
}

/// Child client for custom field names and values, used by search
/// autocompletion.
#[derive(Clone)]
pub struct ItemFieldsApi {
	http: Requests,
}

impl ItemFieldsApi {
	pub(crate) fn new(http: Requests) -> Self {
		Self { http }
	}

	pub async fn get_all(&self) -> ApiResult<ApiResponse<Vec<String>>> {
		self.http.get(&route("/items/fields", &[])).await
	}

	pub async fn get_all_values(&self, field_name: &str) -> ApiResult<ApiResponse<Vec<String>>> {
		self.http
			.get(&route(
				"/items/fields/values",
				&[("fieldName", field_name.into())],
			))
			.await
	}
}
