use crate::{
	requests::{ApiResponse, CallOptions, Requests},
	resources::{
		ActionsApi, AssetsApi, GroupApi, ItemsApi, LabelsApi, LocationsApi, NotifiersApi,
		ReportsApi, StatsApi, UserApi,
	},
	route::route,
	types::{ApiSummary, LoginForm, TokenResponse, UserRegistration},
	ApiResult,
};

/// Everything a logged-in session can reach, one resource client per
/// backend family, all sharing a single transport so auth headers and
/// interceptors apply uniformly.
///
/// Fields are wired once at construction and never reassigned.
pub struct UserClient {
	pub items: ItemsApi,
	pub locations: LocationsApi,
	pub labels: LabelsApi,
	pub group: GroupApi,
	pub user: UserApi,
	pub actions: ActionsApi,
	pub stats: StatsApi,
	pub assets: AssetsApi,
	pub reports: ReportsApi,
	pub notifiers: NotifiersApi,
}

impl UserClient {
	pub fn new(requests: Requests, attachment_token: Option<String>) -> Self {
		Self {
			items: ItemsApi::new(requests.clone(), attachment_token),
			locations: LocationsApi::new(requests.clone()),
			labels: LabelsApi::new(requests.clone()),
			group: GroupApi::new(requests.clone()),
			user: UserApi::new(requests.clone()),
			actions: ActionsApi::new(requests.clone()),
			stats: StatsApi::new(requests.clone()),
			assets: AssetsApi::new(requests.clone()),
			reports: ReportsApi::new(requests.clone()),
			notifiers: NotifiersApi::new(requests),
		}
	}
}

/// The endpoints usable without a session.
pub struct PublicApi {
	http: Requests,
}

impl PublicApi {
	pub fn new(requests: Requests) -> Self {
		Self { http: requests }
	}

	pub async fn status(&self) -> ApiResult<ApiResponse<ApiSummary>> {
		self.http.get(&route("/status", &[])).await
	}

	pub async fn login(
		&self,
		username: &str,
		password: &str,
		stay_logged_in: bool,
	) -> ApiResult<ApiResponse<TokenResponse>> {
		self.http
			.post(
				&route("/users/login", &[]),
				&LoginForm {
					username: username.to_string(),
					password: password.to_string(),
					stay_logged_in,
				},
			)
			.await
	}

	pub async fn register(&self, payload: &UserRegistration) -> ApiResult<ApiResponse<()>> {
		self.http.post(&route("/users/register", &[]), payload).await
	}

	/// Login for deployments behind a trusted-header SSO proxy. The
	/// identity travels in the given headers rather than a body.
	pub async fn login_sso_header(
		&self,
		headers: Vec<(String, String)>,
	) -> ApiResult<ApiResponse<TokenResponse>> {
		self.http
			.post_empty_with(&route("/users/login", &[]), CallOptions { headers, timeout: None })
			.await
	}
}
