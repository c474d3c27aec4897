use chrono::NaiveDate;

use crate::{
	requests::{ApiResponse, Requests},
	route::{route, QueryValue},
	types::{GroupStatistics, TotalsByOrganizer, ValueOverTime},
	ApiResult,
};

// The statistics endpoints take calendar dates, never timestamps. Absent
// bounds still serialize, as empty strings, matching the backend's
// open-range handling.
fn yyyy_mm_dd(date: Option<NaiveDate>) -> QueryValue {
	match date {
		Some(date) => date.format("%Y-%m-%d").to_string().into(),
		None => "".into(),
	}
}

#[derive(Clone)]
pub struct StatsApi {
	http: Requests,
}

impl StatsApi {
	pub(crate) fn new(http: Requests) -> Self {
		Self { http }
	}

	/// Totals for the group's items, labels, locations and users.
	pub async fn group(&self) -> ApiResult<ApiResponse<GroupStatistics>> {
		self.http.get(&route("/groups/statistics", &[])).await
	}

	pub async fn labels(&self) -> ApiResult<ApiResponse<Vec<TotalsByOrganizer>>> {
		self.http.get(&route("/groups/statistics/labels", &[])).await
	}

	pub async fn locations(&self) -> ApiResult<ApiResponse<Vec<TotalsByOrganizer>>> {
		self.http
			.get(&route("/groups/statistics/locations", &[]))
			.await
	}

	pub async fn total_price_over_time(
		&self,
		start: Option<NaiveDate>,
		end: Option<NaiveDate>,
	) -> ApiResult<ApiResponse<ValueOverTime>> {
		self.http
			.get(&route(
				"/groups/statistics/purchase-price",
				&[("start", yyyy_mm_dd(start)), ("end", yyyy_mm_dd(end))],
			))
			.await
	}
}
