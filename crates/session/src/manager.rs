use std::{
	io,
	path::{Path, PathBuf},
	sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use chrono::Utc;
use tokio::fs;
use tracing::{debug, error, warn};

use hv_api_client::{
	register_logging_interceptor,
	requests::StatusCode,
	types::{TokenResponse, UserOut, Wrapped},
	ApiResponse, ApiResult, PublicApi, Requests, StaticToken, TokenProvider, UserClient,
};

use crate::{Session, SessionError, SessionState, SESSION_CONFIG_NAME};

const SESSION_INTERCEPTOR_KEY: &str = "session.invalidate";

/// Owns the persisted session and serializes every mutation to it.
///
/// Reads are synchronous so the token provider and the 401 interceptor
/// can run inside the request path; only the disk write suspends.
/// Login and logout are user-serialized actions, so concurrent writers
/// resolve as last-write-wins.
pub struct SessionManager {
	session: RwLock<Session>,
	config_file_path: PathBuf,
}

impl SessionManager {
	/// Loads the session persisted under `data_directory`, creating the
	/// directory when missing. An unreadable file is treated as a fresh
	/// logged-out session rather than an error.
	pub async fn new(data_directory: impl AsRef<Path>) -> Result<Arc<Self>, SessionError> {
		let data_directory = data_directory.as_ref();
		fs::create_dir_all(data_directory)
			.await
			.map_err(|source| SessionError::FileIo {
				path: data_directory.to_path_buf(),
				source,
			})?;

		let config_file_path = data_directory.join(SESSION_CONFIG_NAME);

		let session = match fs::read(&config_file_path).await {
			Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
				warn!(path = %config_file_path.display(), error = %e, "session file unreadable, starting logged out");
				Session::default()
			}),
			Err(e) if e.kind() == io::ErrorKind::NotFound => Session::default(),
			Err(source) => {
				return Err(SessionError::FileIo {
					path: config_file_path,
					source,
				})
			}
		};

		Ok(Arc::new(Self {
			session: RwLock::new(session),
			config_file_path,
		}))
	}

	fn read(&self) -> RwLockReadGuard<'_, Session> {
		self.session.read().unwrap_or_else(PoisonError::into_inner)
	}

	fn write(&self) -> RwLockWriteGuard<'_, Session> {
		self.session.write().unwrap_or_else(PoisonError::into_inner)
	}

	/// A snapshot of the current session.
	pub fn get(&self) -> Session {
		self.read().clone()
	}

	pub fn state(&self) -> SessionState {
		let session = self.read();
		match (&session.token, session.expires_at) {
			(None, _) => SessionState::Unauthenticated,
			(Some(_), Some(expires_at)) if expires_at > Utc::now() => SessionState::Authenticated,
			(Some(_), _) => SessionState::Expired,
		}
	}

	/// True when no expiry is recorded or the recorded one has passed.
	pub fn is_expired(&self) -> bool {
		match self.read().expires_at {
			Some(expires_at) => expires_at <= Utc::now(),
			None => true,
		}
	}

	/// True exactly when a token is held and not expired.
	pub fn is_authorized(&self) -> bool {
		self.state() == SessionState::Authenticated
	}

	pub fn attachment_token(&self) -> Option<String> {
		self.read().attachment_token.clone()
	}

	pub fn user(&self) -> Option<UserOut> {
		self.read().user.clone()
	}

	/// Clears the in-memory session. Idempotent, callable from inside a
	/// response interceptor. The persisted copy is rewritten on the next
	/// explicit session mutation; authorization checks only ever consult
	/// memory, so a stale file cannot resurrect a live session.
	pub fn invalidate(&self) {
		*self.write() = Session::default();
		debug!("session invalidated");
	}

	/// Clears the session and persists the cleared state.
	pub async fn invalidate_session(&self) -> Result<(), SessionError> {
		self.invalidate();
		self.save().await
	}

	async fn save(&self) -> Result<(), SessionError> {
		let snapshot = self.get();
		let bytes = serde_json::to_vec(&snapshot)?;
		fs::write(&self.config_file_path, bytes)
			.await
			.map_err(|source| SessionError::FileIo {
				path: self.config_file_path.clone(),
				source,
			})
	}

	/// Applies a mutation under the write lock, then persists the result.
	async fn persist(&self, mutation: impl FnOnce(&mut Session)) -> Result<(), SessionError> {
		{
			let mut session = self.write();
			mutation(&mut session);
		}
		self.save().await
	}

	/// Exchanges credentials for a session. On success the token, expiry
	/// and attachment token are stored and persisted; on failure local
	/// state is left untouched. The envelope is returned either way.
	pub async fn login(
		&self,
		api: &PublicApi,
		username: &str,
		password: &str,
		stay_logged_in: bool,
	) -> ApiResult<ApiResponse<TokenResponse>> {
		let response = api.login(username, password, stay_logged_in).await?;

		if !response.error {
			if let Some(result) = &response.data {
				let token = result.token.clone();
				let expires_at = result.expires_at;
				let attachment_token = result.attachment_token.clone();

				if let Err(e) = self
					.persist(move |session| {
						session.token = Some(token);
						session.expires_at = Some(expires_at);
						session.attachment_token = Some(attachment_token);
					})
					.await
				{
					// The in-memory session is live, only durability
					// suffered. Surface it and move on.
					error!(error = %e, "failed to persist session after login");
				}
			}
		}

		Ok(response)
	}

	/// Calls the logout endpoint and clears local state. Local clearing
	/// happens even when the server call fails: a dead session on this
	/// side must not outlive a flaky logout endpoint. The envelope still
	/// reports the server outcome.
	pub async fn logout(&self, client: &UserClient) -> ApiResult<ApiResponse<()>> {
		let response = client.user.logout().await;

		if let Err(e) = self.invalidate_session().await {
			error!(error = %e, "failed to persist session invalidation");
		}

		response
	}

	/// Loads the caller's profile and caches it on the session.
	pub async fn fetch_user(&self, client: &UserClient) -> ApiResult<ApiResponse<Wrapped<UserOut>>> {
		let response = client.user.self_().await?;

		if !response.error {
			if let Some(wrapped) = &response.data {
				let user = wrapped.item.clone();
				if let Err(e) = self.persist(move |session| session.user = Some(user)).await {
					error!(error = %e, "failed to persist cached user");
				}
			}
		}

		Ok(response)
	}

	/// A token provider reading the live session, so requests pick up
	/// token rotation without rebuilding clients.
	pub fn token_provider(self: &Arc<Self>) -> impl TokenProvider {
		let manager = Arc::clone(self);
		move || manager.read().token.clone().unwrap_or_default()
	}

	/// Builds the authenticated client facade against `base_url`, wired
	/// with this session's token, response logging, and 401 teardown.
	pub fn user_client(self: &Arc<Self>, base_url: &str) -> ApiResult<UserClient> {
		let requests = Requests::new(base_url, self.token_provider())?;
		register_logging_interceptor(&requests);
		register_session_interceptor(&requests, self);

		Ok(UserClient::new(requests, self.attachment_token()))
	}
}

/// Registers the observer that propagates server-detected expiry: any
/// 401 passing through `requests` invalidates the session, with no
/// per-call handling. Keyed, so repeated registration stays idempotent.
pub fn register_session_interceptor(requests: &Requests, manager: &Arc<SessionManager>) {
	let manager = Arc::clone(manager);
	requests.add_response_interceptor(SESSION_INTERCEPTOR_KEY, move |response, _request| {
		if response.status == StatusCode::UNAUTHORIZED {
			manager.invalidate();
		}
	});
}

/// Builds the pre-auth client facade against `base_url`.
pub fn public_client(base_url: &str) -> ApiResult<PublicApi> {
	let requests = Requests::new(base_url, StaticToken::default())?;
	register_logging_interceptor(&requests);

	Ok(PublicApi::new(requests))
}
