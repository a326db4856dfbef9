//! The incoming request as seen by handlers.

use std::collections::HashMap;

use bytes::Bytes;
use hyper::{HeaderMap, Method, Uri, Version};

use crate::exception::{Error, Result};

/// An HTTP request.
///
/// The transport layer constructs one `Request` per incoming request and
/// hands it to the router. Routers fill in [`path_params`](Self::path_params)
/// when a dynamic route matches; handlers read them back via
/// [`path_param`](Self::path_param).
#[derive(Debug, Clone)]
pub struct Request {
	pub method: Method,
	pub uri: Uri,
	pub version: Version,
	pub headers: HeaderMap,
	pub body: Bytes,
	/// Parameters bound from the matched route pattern (`:name` segments).
	/// Always strings; empty for static routes.
	pub path_params: HashMap<String, String>,
	/// Query string parameters, split on `&` and the first `=`.
	pub query_params: HashMap<String, String>,
}

impl Request {
	/// Create a request from its parts.
	///
	/// # Examples
	///
	/// ```
	/// use komichi_http::Request;
	/// use hyper::{Method, Uri, Version, HeaderMap};
	/// use bytes::Bytes;
	///
	/// let request = Request::new(
	/// 	Method::GET,
	/// 	Uri::from_static("/users/42?verbose=1"),
	/// 	Version::HTTP_11,
	/// 	HeaderMap::new(),
	/// 	Bytes::new(),
	/// );
	///
	/// assert_eq!(request.path(), "/users/42");
	/// assert_eq!(request.query_params.get("verbose"), Some(&"1".to_string()));
	/// ```
	pub fn new(
		method: Method,
		uri: Uri,
		version: Version,
		headers: HeaderMap,
		body: Bytes,
	) -> Self {
		let query_params = Self::parse_query_params(&uri);
		Self {
			method,
			uri,
			version,
			headers,
			body,
			path_params: HashMap::new(),
			query_params,
		}
	}

	/// Start building a request.
	///
	/// # Examples
	///
	/// ```
	/// use komichi_http::Request;
	/// use hyper::Method;
	///
	/// let request = Request::builder()
	/// 	.method(Method::GET)
	/// 	.uri("/api/users")
	/// 	.build()
	/// 	.unwrap();
	///
	/// assert_eq!(request.path(), "/api/users");
	/// ```
	pub fn builder() -> RequestBuilder {
		RequestBuilder::new()
	}

	/// The request path, without the query string.
	pub fn path(&self) -> &str {
		self.uri.path()
	}

	/// Look up a path parameter bound by the router.
	///
	/// # Examples
	///
	/// ```
	/// use komichi_http::Request;
	///
	/// let mut request = Request::builder().uri("/users/42").build().unwrap();
	/// request.set_path_param("id", "42");
	///
	/// assert_eq!(request.path_param("id"), Some("42"));
	/// assert_eq!(request.path_param("name"), None);
	/// ```
	pub fn path_param(&self, name: &str) -> Option<&str> {
		self.path_params.get(name).map(String::as_str)
	}

	/// Set a path parameter (used by routers during dispatch).
	pub fn set_path_param(&mut self, name: impl Into<String>, value: impl Into<String>) {
		self.path_params.insert(name.into(), value.into());
	}

	/// Parse query parameters from the URI.
	///
	/// Splits on the first `=` only, so values containing `=` (Base64
	/// tokens and the like) survive intact.
	fn parse_query_params(uri: &Uri) -> HashMap<String, String> {
		uri.query()
			.map(|q| {
				q.split('&')
					.filter_map(|pair| {
						let mut parts = pair.splitn(2, '=');
						Some((
							parts.next()?.to_string(),
							parts.next().unwrap_or("").to_string(),
						))
					})
					.collect()
			})
			.unwrap_or_default()
	}
}

/// Builder for [`Request`].
///
/// Defaults to `GET /` over HTTP/1.1 with no headers and an empty body.
#[derive(Debug, Default)]
pub struct RequestBuilder {
	method: Method,
	uri: String,
	version: Option<Version>,
	headers: HeaderMap,
	body: Bytes,
}

impl RequestBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn method(mut self, method: Method) -> Self {
		self.method = method;
		self
	}

	pub fn uri(mut self, uri: impl Into<String>) -> Self {
		self.uri = uri.into();
		self
	}

	pub fn version(mut self, version: Version) -> Self {
		self.version = Some(version);
		self
	}

	pub fn headers(mut self, headers: HeaderMap) -> Self {
		self.headers = headers;
		self
	}

	pub fn body(mut self, body: impl Into<Bytes>) -> Self {
		self.body = body.into();
		self
	}

	/// Finish building the request.
	///
	/// # Errors
	///
	/// Returns [`Error::BadRequest`] if the URI does not parse.
	pub fn build(self) -> Result<Request> {
		let uri: Uri = if self.uri.is_empty() {
			Uri::from_static("/")
		} else {
			self.uri
				.parse()
				.map_err(|e| Error::BadRequest(format!("invalid uri: {e}")))?
		};
		Ok(Request::new(
			self.method,
			uri,
			self.version.unwrap_or(Version::HTTP_11),
			self.headers,
			self.body,
		))
	}
}
