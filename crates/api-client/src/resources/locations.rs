use crate::{
	requests::{ApiResponse, Requests},
	route::route,
	types::{LocationCreate, LocationOut, LocationOutCount, LocationUpdate, TreeItem},
	ApiResult,
};

#[derive(Clone)]
pub struct LocationsApi {
	http: Requests,
}

impl LocationsApi {
	pub(crate) fn new(http: Requests) -> Self {
		Self { http }
	}

	/// Lists locations. With `filter_children` set, nested locations are
	/// left out and only roots come back.
	pub async fn get_all(&self, filter_children: bool) -> ApiResult<ApiResponse<Vec<LocationOutCount>>> {
		self.http
			.get(&route(
				"/locations",
				&[("filterChildren", filter_children.into())],
			))
			.await
	}

	pub async fn create(&self, location: &LocationCreate) -> ApiResult<ApiResponse<LocationOut>> {
		self.http.post(&route("/locations", &[]), location).await
	}

	pub async fn get(&self, id: &str) -> ApiResult<ApiResponse<LocationOut>> {
		self.http.get(&route(&format!("/locations/{id}"), &[])).await
	}

	pub async fn update(
		&self,
		id: &str,
		location: &LocationUpdate,
	) -> ApiResult<ApiResponse<LocationOut>> {
		self.http
			.put(&route(&format!("/locations/{id}"), &[]), location)
			.await
	}

	pub async fn delete(&self, id: &str) -> ApiResult<ApiResponse<()>> {
		self.http
			.delete(&route(&format!("/locations/{id}"), &[]))
			.await
	}

	/// The full location hierarchy, optionally with the items inside.
	pub async fn tree(&self, with_items: bool) -> ApiResult<ApiResponse<Vec<TreeItem>>> {
		self.http
			.get(&route("/locations/tree", &[("withItems", with_items.into())]))
			.await
	}
}
