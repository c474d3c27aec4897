use crate::{
	requests::{ApiResponse, Requests},
	route::route,
	types::{Currency, Group, GroupInvitation, GroupInvitationCreate, GroupUpdate},
	ApiResult,
};

#[derive(Clone)]
pub struct GroupApi {
	http: Requests,
}

impl GroupApi {
	pub(crate) fn new(http: Requests) -> Self {
		Self { http }
	}

	pub async fn get(&self) -> ApiResult<ApiResponse<Group>> {
		self.http.get(&route("/groups", &[])).await
	}

	pub async fn update(&self, data: &GroupUpdate) -> ApiResult<ApiResponse<Group>> {
		self.http.put(&route("/groups", &[]), data).await
	}

	pub async fn create_invitation(
		&self,
		data: &GroupInvitationCreate,
	) -> ApiResult<ApiResponse<GroupInvitation>> {
		self.http.post(&route("/groups/invitations", &[]), data).await
	}

	pub async fn currencies(&self) -> ApiResult<ApiResponse<Vec<Currency>>> {
		self.http.get(&route("/currencies", &[])).await
	}
}
