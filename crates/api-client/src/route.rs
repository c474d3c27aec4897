use once_cell::sync::Lazy;
use reqwest::Url;

/// Version prefix every backend route is mounted under.
pub const API_PREFIX: &str = "/api/v1";

// Placeholder origin that exists only to satisfy the URL parser. It is
// stripped before the route is returned, so no absolute host can leak
// into a built route.
static PLACEHOLDER: Lazy<Url> =
	Lazy::new(|| Url::parse("http://localhost.invalid").expect("placeholder origin is valid"));

/// A query parameter value accepted by [`route`].
///
/// `Skip` values are dropped from the query string entirely, which is what
/// `Option::None` converts into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
	Str(String),
	Int(i64),
	Bool(bool),
	List(Vec<String>),
	Skip,
}

impl QueryValue {
	fn append_to(&self, key: &str, pairs: &mut Vec<(String, String)>) {
		match self {
			Self::Str(value) => pairs.push((key.to_string(), value.clone())),
			Self::Int(value) => pairs.push((key.to_string(), value.to_string())),
			Self::Bool(value) => pairs.push((key.to_string(), value.to_string())),
			Self::List(values) => {
				for value in values {
					pairs.push((key.to_string(), value.clone()));
				}
			}
			Self::Skip => {}
		}
	}
}

impl From<&str> for QueryValue {
	fn from(value: &str) -> Self {
		Self::Str(value.to_string())
	}
}

impl From<String> for QueryValue {
	fn from(value: String) -> Self {
		Self::Str(value)
	}
}

impl From<i64> for QueryValue {
	fn from(value: i64) -> Self {
		Self::Int(value)
	}
}

impl From<bool> for QueryValue {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<Vec<String>> for QueryValue {
	fn from(values: Vec<String>) -> Self {
		Self::List(values)
	}
}

impl From<Vec<&str>> for QueryValue {
	fn from(values: Vec<&str>) -> Self {
		Self::List(values.into_iter().map(str::to_string).collect())
	}
}

impl<T: Into<QueryValue>> From<Option<T>> for QueryValue {
	fn from(value: Option<T>) -> Self {
		value.map_or(Self::Skip, Into::into)
	}
}

/// Builds the relative route for an API path, prefixed with [`API_PREFIX`]
/// and carrying the given query parameters in slice order. List values
/// expand to one `key=value` pair per element.
///
/// `path` must start with `/`. The result never contains a host, so it is
/// usable against any configured base URL.
pub fn route(path: &str, params: &[(&str, QueryValue)]) -> String {
	let mut url = PLACEHOLDER.clone();
	url.set_path(&format!("{API_PREFIX}{path}"));

	let mut pairs = Vec::new();
	for (key, value) in params {
		value.append_to(key, &mut pairs);
	}

	if !pairs.is_empty() {
		let mut query = url.query_pairs_mut();
		for (key, value) in &pairs {
			query.append_pair(key, value);
		}
	}

	match url.query() {
		Some(query) if !query.is_empty() => format!("{}?{}", url.path(), query),
		_ => url.path().to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_no_query_parameters() {
		assert_eq!(route("/test", &[]), "/api/v1/test");
	}

	#[test]
	fn test_basic_query_parameter() {
		assert_eq!(route("/test", &[("a", "b".into())]), "/api/v1/test?a=b");
	}

	#[test]
	fn test_multiple_query_parameters() {
		assert_eq!(
			route("/test", &[("a", "b".into()), ("c", "d".into())]),
			"/api/v1/test?a=b&c=d"
		);
	}

	#[test]
	fn test_list_like_query_parameters() {
		assert_eq!(
			route("/test", &[("a", vec!["b", "c"].into())]),
			"/api/v1/test?a=b&a=c"
		);
	}

	#[test]
	fn test_numbers_and_bools() {
		assert_eq!(
			route("/test", &[("page", 2i64.into()), ("archived", true.into())]),
			"/api/v1/test?page=2&archived=true"
		);
	}

	#[test]
	fn test_none_parameters_are_skipped() {
		let absent: Option<&str> = None;
		assert_eq!(
			route("/test", &[("a", absent.into()), ("b", Some("x").into())]),
			"/api/v1/test?b=x"
		);
	}

	#[test]
	fn test_values_are_percent_encoded() {
		assert_eq!(
			route("/test", &[("q", "wrench set".into())]),
			"/api/v1/test?q=wrench+set"
		);
	}

	#[test]
	fn test_no_host_leaks() {
		assert!(!route("/items", &[("a", "b".into())]).contains("localhost"));
	}
}
