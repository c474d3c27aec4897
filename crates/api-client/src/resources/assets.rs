use crate::{
	requests::{ApiResponse, Requests},
	route::route,
	types::{ItemSummary, PaginationResult},
	ApiResult,
};

/// Lookup by the printable asset id attached to physical items.
#[derive(Clone)]
pub struct AssetsApi {
	http: Requests,
}

impl AssetsApi {
	pub(crate) fn new(http: Requests) -> Self {
		Self { http }
	}

	pub async fn get(
		&self,
		asset_id: &str,
		page: i64,
		page_size: i64,
	) -> ApiResult<ApiResponse<PaginationResult<ItemSummary>>> {
		self.http
			.get(&route(
				&format!("/assets/{asset_id}"),
				&[("page", page.into()), ("pageSize", page_size.into())],
			))
			.await
	}
}
