use crate::{
	requests::{ApiResponse, Requests},
	route::route,
	types::{ChangePassword, UserOut, UserUpdate, Wrapped},
	ApiResult,
};

#[derive(Clone)]
pub struct UserApi {
	http: Requests,
}

impl UserApi {
	pub(crate) fn new(http: Requests) -> Self {
		Self { http }
	}

	pub async fn self_(&self) -> ApiResult<ApiResponse<Wrapped<UserOut>>> {
		self.http.get(&route("/users/self", &[])).await
	}

	pub async fn update(&self, data: &UserUpdate) -> ApiResult<ApiResponse<Wrapped<UserOut>>> {
		self.http.put(&route("/users/self", &[]), data).await
	}

	pub async fn logout(&self) -> ApiResult<ApiResponse<()>> {
		self.http.post_empty(&route("/users/logout", &[])).await
	}

	pub async fn delete_account(&self) -> ApiResult<ApiResponse<()>> {
		self.http.delete(&route("/users/self", &[])).await
	}

	pub async fn change_password(&self, current: &str, new_password: &str) -> ApiResult<ApiResponse<()>> {
		self.http
			.put(
				&route("/users/self/change-password", &[]),
				&ChangePassword {
					current: current.to_string(),
					new_password: new_password.to_string(),
				},
			)
			.await
	}
}
