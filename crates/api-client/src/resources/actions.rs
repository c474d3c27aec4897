use crate::{
	requests::{ApiResponse, Requests},
	route::route,
	types::ActionAmountResult,
	ApiResult,
};

/// Bulk maintenance actions, applied group-wide by the backend.
#[derive(Clone)]
pub struct ActionsApi {
	http: Requests,
}

impl ActionsApi {
	pub(crate) fn new(http: Requests) -> Self {
		Self { http }
	}

	pub async fn ensure_asset_ids(&self) -> ApiResult<ApiResponse<ActionAmountResult>> {
		self.http
			.post_empty(&route("/actions/ensure-asset-ids", &[]))
			.await
	}

	pub async fn reset_item_date_times(&self) -> ApiResult<ApiResponse<ActionAmountResult>> {
		self.http
			.post_empty(&route("/actions/zero-item-time-fields", &[]))
			.await
	}

	pub async fn ensure_import_refs(&self) -> ApiResult<ApiResponse<ActionAmountResult>> {
		self.http
			.post_empty(&route("/actions/ensure-import-refs", &[]))
			.await
	}

	pub async fn set_primary_photos(&self) -> ApiResult<ApiResponse<ActionAmountResult>> {
		self.http
			.post_empty(&route("/actions/set-primary-photos", &[]))
			.await
	}
}
