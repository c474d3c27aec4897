use std::{
	panic::{catch_unwind, AssertUnwindSafe},
	sync::{Arc, PoisonError, RwLock},
	time::Duration,
};

use reqwest::{
	header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
	multipart::Form,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error, warn};

use crate::ApiResult;

pub use reqwest::{Method, StatusCode};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Supplies the `Authorization` header value for every call.
///
/// The token is read fresh on each request, so externally rotated tokens
/// are picked up without rebuilding the client. An empty string means "no
/// token"; no header is attached. The value is sent verbatim, callers are
/// responsible for any scheme prefix.
pub trait TokenProvider: Send + Sync {
	fn token(&self) -> String;
}

impl<F> TokenProvider for F
where
	F: Fn() -> String + Send + Sync,
{
	fn token(&self) -> String {
		(self)()
	}
}

/// A fixed token value. The default is the empty, unauthenticated token.
#[derive(Debug, Clone, Default)]
pub struct StaticToken(pub String);

impl TokenProvider for StaticToken {
	fn token(&self) -> String {
		self.0.clone()
	}
}

impl From<&str> for StaticToken {
	fn from(token: &str) -> Self {
		Self(token.to_string())
	}
}

impl From<String> for StaticToken {
	fn from(token: String) -> Self {
		Self(token)
	}
}

/// Request-side context handed to response interceptors.
#[derive(Debug, Clone)]
pub struct RequestContext {
	pub method: Method,
	pub url: String,
}

/// Response-side context handed to response interceptors, captured before
/// the body is decoded.
#[derive(Debug, Clone)]
pub struct ResponseContext {
	pub status: StatusCode,
	pub url: String,
	pub headers: HeaderMap,
}

type ResponseInterceptor = Box<dyn Fn(&ResponseContext, &RequestContext) + Send + Sync>;

/// The uniform envelope every transport call resolves to.
///
/// `error` is raised exactly when the HTTP status falls outside 200..300.
/// `data` is `None` for 204 responses, non-JSON bodies and bodies that
/// fail to decode, so a clear `error` flag does not guarantee data.
#[derive(Debug)]
pub struct ApiResponse<T> {
	pub status: StatusCode,
	pub error: bool,
	pub data: Option<T>,
	pub headers: HeaderMap,
}

/// Per-call overrides. Headers listed here win over the client defaults.
#[derive(Debug, Default)]
pub struct CallOptions {
	pub headers: Vec<(String, String)>,
	pub timeout: Option<Duration>,
}

impl CallOptions {
	pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.push((name.into(), value.into()));
		self
	}

	pub fn timeout(mut self, timeout: Duration) -> Self {
		self.timeout = Some(timeout);
		self
	}
}

/// The transport primitive all resource clients share.
///
/// Cloning is cheap and every clone shares the underlying connection
/// pool, token provider and interceptor registry, so an interceptor
/// registered through any handle observes responses from all of them.
#[derive(Clone)]
pub struct Requests {
	client: reqwest::Client,
	base_url: String,
	token: Arc<dyn TokenProvider>,
	default_headers: Arc<Vec<(String, String)>>,
	interceptors: Arc<RwLock<Vec<(String, ResponseInterceptor)>>>,
}

impl Requests {
	pub fn new(base_url: impl Into<String>, token: impl TokenProvider + 'static) -> ApiResult<Self> {
		Self::with_options(base_url, token, Vec::new(), DEFAULT_TIMEOUT)
	}

	pub fn with_options(
		base_url: impl Into<String>,
		token: impl TokenProvider + 'static,
		default_headers: Vec<(String, String)>,
		timeout: Duration,
	) -> ApiResult<Self> {
		let client = reqwest::Client::builder().timeout(timeout).build()?;

		Ok(Self {
			client,
			base_url: base_url.into().trim_end_matches('/').to_string(),
			token: Arc::new(token),
			default_headers: Arc::new(default_headers),
			interceptors: Arc::new(RwLock::new(Vec::new())),
		})
	}

	/// Registers a response interceptor under `key`. Re-registering an
	/// existing key replaces its handler in place, keeping the original
	/// position in the invocation order, so repeated registrations from
	/// remounting callers stay idempotent.
	///
	/// Handlers run synchronously after every response, in registration
	/// order, before the body is decoded. A handler that needs to do
	/// async work must spawn it and let it race; the registry does not
	/// await anything.
	pub fn add_response_interceptor<F>(&self, key: impl Into<String>, handler: F)
	where
		F: Fn(&ResponseContext, &RequestContext) + Send + Sync + 'static,
	{
		let key = key.into();
		let mut registry = self
			.interceptors
			.write()
			.unwrap_or_else(PoisonError::into_inner);

		if let Some(entry) = registry.iter_mut().find(|(existing, _)| *existing == key) {
			entry.1 = Box::new(handler);
		} else {
			registry.push((key, Box::new(handler)));
		}
	}

	pub fn remove_response_interceptor(&self, key: &str) {
		self.interceptors
			.write()
			.unwrap_or_else(PoisonError::into_inner)
			.retain(|(existing, _)| existing != key);
	}

	fn call_response_interceptors(&self, response: &ResponseContext, request: &RequestContext) {
		let registry = self
			.interceptors
			.read()
			.unwrap_or_else(PoisonError::into_inner);

		for (key, handler) in registry.iter() {
			// One panicking interceptor must not starve the rest of the
			// chain or abort the response decode.
			if catch_unwind(AssertUnwindSafe(|| handler(response, request))).is_err() {
				error!(key = %key, url = %request.url, "response interceptor panicked");
			}
		}
	}

	fn url(&self, rest: &str) -> String {
		format!("{}{}", self.base_url, rest)
	}

	fn builder(&self, method: Method, url: &str, opts: &CallOptions) -> reqwest::RequestBuilder {
		let mut headers = HeaderMap::new();
		for (name, value) in self.default_headers.iter().chain(opts.headers.iter()) {
			match (
				HeaderName::from_bytes(name.as_bytes()),
				HeaderValue::from_str(value),
			) {
				(Ok(name), Ok(value)) => {
					headers.insert(name, value);
				}
				_ => warn!(header = %name, "skipping malformed header"),
			}
		}

		let token = self.token.token();
		if !token.is_empty() {
			match HeaderValue::from_str(&token) {
				Ok(value) => {
					headers.insert(AUTHORIZATION, value);
				}
				Err(_) => warn!("token is not a valid header value, request sent unauthenticated"),
			}
		}

		let mut builder = self.client.request(method, self.url(url)).headers(headers);
		if let Some(timeout) = opts.timeout {
			builder = builder.timeout(timeout);
		}

		builder
	}

	async fn dispatch(
		&self,
		builder: reqwest::RequestBuilder,
		request: RequestContext,
	) -> ApiResult<reqwest::Response> {
		debug!(method = %request.method, url = %request.url, "dispatching request");

		let response = builder.send().await?;

		let context = ResponseContext {
			status: response.status(),
			url: response.url().to_string(),
			headers: response.headers().clone(),
		};
		self.call_response_interceptors(&context, &request);

		Ok(response)
	}

	async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> ApiResponse<T> {
		let status = response.status();
		let error = !status.is_success();
		let headers = response.headers().clone();
		let url = response.url().to_string();

		let data = if status == StatusCode::NO_CONTENT {
			None
		} else if is_json(&headers) {
			match response.json::<T>().await {
				Ok(data) => Some(data),
				// Fail soft: the envelope still reflects the HTTP
				// outcome, the undecodable body is only logged.
				Err(e) => {
					warn!(url = %url, status = %status, error = %e, "undecodable response body");
					None
				}
			}
		} else {
			None
		};

		ApiResponse {
			status,
			error,
			data,
			headers,
		}
	}

	pub async fn get<T: DeserializeOwned>(&self, url: &str) -> ApiResult<ApiResponse<T>> {
		self.get_with(url, CallOptions::default()).await
	}

	pub async fn get_with<T: DeserializeOwned>(
		&self,
		url: &str,
		opts: CallOptions,
	) -> ApiResult<ApiResponse<T>> {
		let request = RequestContext {
			method: Method::GET,
			url: url.to_string(),
		};
		let builder = self.builder(Method::GET, url, &opts);
		Ok(Self::decode(self.dispatch(builder, request).await?).await)
	}

	/// Fetches a response body without decoding it, for endpoints that
	/// stream files rather than JSON.
	pub async fn get_raw(&self, url: &str) -> ApiResult<ApiResponse<Vec<u8>>> {
		let request = RequestContext {
			method: Method::GET,
			url: url.to_string(),
		};
		let builder = self.builder(Method::GET, url, &CallOptions::default());
		let response = self.dispatch(builder, request).await?;

		let status = response.status();
		let error = !status.is_success();
		let headers = response.headers().clone();
		let data = response.bytes().await.ok().map(|bytes| bytes.to_vec());

		Ok(ApiResponse {
			status,
			error,
			data,
			headers,
		})
	}

	pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
		&self,
		url: &str,
		body: &B,
	) -> ApiResult<ApiResponse<T>> {
		self.post_with(url, body, CallOptions::default()).await
	}

	pub async fn post_with<B: Serialize + ?Sized, T: DeserializeOwned>(
		&self,
		url: &str,
		body: &B,
		opts: CallOptions,
	) -> ApiResult<ApiResponse<T>> {
		let request = RequestContext {
			method: Method::POST,
			url: url.to_string(),
		};
		let builder = self.builder(Method::POST, url, &opts).json(body);
		Ok(Self::decode(self.dispatch(builder, request).await?).await)
	}

	/// POST without a body, for action-style endpoints.
	pub async fn post_empty<T: DeserializeOwned>(&self, url: &str) -> ApiResult<ApiResponse<T>> {
		self.post_empty_with(url, CallOptions::default()).await
	}

	pub async fn post_empty_with<T: DeserializeOwned>(
		&self,
		url: &str,
		opts: CallOptions,
	) -> ApiResult<ApiResponse<T>> {
		let request = RequestContext {
			method: Method::POST,
			url: url.to_string(),
		};
		let builder = self.builder(Method::POST, url, &opts);
		Ok(Self::decode(self.dispatch(builder, request).await?).await)
	}

	/// POST a multipart form. The form sets its own content type.
	pub async fn post_form<T: DeserializeOwned>(
		&self,
		url: &str,
		form: Form,
	) -> ApiResult<ApiResponse<T>> {
		let request = RequestContext {
			method: Method::POST,
			url: url.to_string(),
		};
		let builder = self
			.builder(Method::POST, url, &CallOptions::default())
			.multipart(form);
		Ok(Self::decode(self.dispatch(builder, request).await?).await)
	}

	pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
		&self,
		url: &str,
		body: &B,
	) -> ApiResult<ApiResponse<T>> {
		let request = RequestContext {
			method: Method::PUT,
			url: url.to_string(),
		};
		let builder = self
			.builder(Method::PUT, url, &CallOptions::default())
			.json(body);
		Ok(Self::decode(self.dispatch(builder, request).await?).await)
	}

	pub async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(
		&self,
		url: &str,
		body: &B,
	) -> ApiResult<ApiResponse<T>> {
		let request = RequestContext {
			method: Method::PATCH,
			url: url.to_string(),
		};
		let builder = self
			.builder(Method::PATCH, url, &CallOptions::default())
			.json(body);
		Ok(Self::decode(self.dispatch(builder, request).await?).await)
	}

	pub async fn delete<T: DeserializeOwned>(&self, url: &str) -> ApiResult<ApiResponse<T>> {
		let request = RequestContext {
			method: Method::DELETE,
			url: url.to_string(),
		};
		let builder = self.builder(Method::DELETE, url, &CallOptions::default());
		Ok(Self::decode(self.dispatch(builder, request).await?).await)
	}
}

fn is_json(headers: &HeaderMap) -> bool {
	headers
		.get(CONTENT_TYPE)
		.and_then(|value| value.to_str().ok())
		.is_some_and(|value| value.starts_with("application/json"))
}

/// Logs every response at debug level, the default cross-cutting observer
/// the UI layer installs.
pub fn register_logging_interceptor(requests: &Requests) {
	requests.add_response_interceptor("logger", |response, request| {
		debug!(status = %response.status, method = %request.method, url = %response.url, "response");
	});
}
