use crate::{
	requests::{ApiResponse, Requests},
	route::route,
	ApiResult,
};

#[derive(Clone)]
pub struct ReportsApi {
	http: Requests,
}

impl ReportsApi {
	pub(crate) fn new(http: Requests) -> Self {
		Self { http }
	}

	/// The bill-of-materials export. The body is TSV, returned undecoded
	/// for the caller to persist or present.
	pub async fn bill_of_materials(&self) -> ApiResult<ApiResponse<Vec<u8>>> {
		self.http
			.get_raw(&route("/reporting/bill-of-materials", &[]))
			.await
	}
}
