//! Typed client for the HomeVault REST API.
//!
//! The transport ([`requests::Requests`]) issues the HTTP calls, the
//! resource clients map one method per backend operation, and
//! [`UserClient`]/[`PublicApi`] compose them behind a single handle.

pub mod base;
pub mod client;
pub mod requests;
pub mod resources;
pub mod route;
pub mod types;

pub use client::{PublicApi, UserClient};
pub use requests::{
	register_logging_interceptor, ApiResponse, CallOptions, Requests, StaticToken, TokenProvider,
};
pub use route::{route, QueryValue, API_PREFIX};

/// Failures that escape the transport as an `Err`. HTTP-level failures do
/// not: those come back as an envelope with the `error` flag raised.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
	#[error("transport failure: {0}")]
	Transport(#[from] reqwest::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;
