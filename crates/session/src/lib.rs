//! Client-side session state: the persisted record of who is logged in,
//! its lifecycle (login, logout, invalidation, expiry), and the wiring
//! that lets a 401 anywhere in the transport tear the session down.

mod manager;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use hv_api_client::types::UserOut;

pub use manager::{public_client, register_session_interceptor, SessionManager};

/// SESSION_CONFIG_NAME is the name of the file which stores the Session.
pub const SESSION_CONFIG_NAME: &str = "session.hvconfig";

/// The persisted session record. All fields are empty while logged out.
/// Stored as JSON on disk so a session survives process restarts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
	#[serde(default)]
	pub token: Option<String>,
	#[serde(default, with = "hv_api_client::base::date_serde::option")]
	pub expires_at: Option<DateTime<Utc>>,
	#[serde(default)]
	pub attachment_token: Option<String>,
	#[serde(default)]
	pub user: Option<UserOut>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
	/// No token held.
	Unauthenticated,
	/// Token held and still inside its validity window.
	Authenticated,
	/// Token held but past its expiry.
	Expired,
}

#[derive(thiserror::Error, Debug)]
pub enum SessionError {
	#[error("session file {path}: {source}")]
	FileIo {
		path: PathBuf,
		source: std::io::Error,
	},
	#[error(transparent)]
	SerdeJson(#[from] serde_json::Error),
	#[error("could not determine a data directory")]
	NoDataDir,
}

/// Platform data directory for HomeVault state.
pub fn default_data_dir() -> Result<PathBuf, SessionError> {
	#[cfg(target_os = "linux")]
	let base = dirs::data_local_dir();

	#[cfg(not(target_os = "linux"))]
	let base = dirs::data_dir();

	base.map(|dir| dir.join("homevault"))
		.ok_or(SessionError::NoDataDir)
}
