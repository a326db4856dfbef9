//! The response produced by handlers.

use bytes::Bytes;
use hyper::header::{HeaderName, HeaderValue};
use hyper::{HeaderMap, StatusCode};

/// An HTTP response.
///
/// Handlers build one of these and return it; the transport layer is
/// responsible for serializing it onto the wire.
///
/// # Examples
///
/// ```
/// use komichi_http::Response;
/// use hyper::StatusCode;
///
/// let response = Response::ok().with_body("hello");
/// assert_eq!(response.status, StatusCode::OK);
/// assert_eq!(&response.body[..], b"hello");
/// ```
#[derive(Debug, Clone)]
pub struct Response {
	pub status: StatusCode,
	pub headers: HeaderMap,
	pub body: Bytes,
}

impl Response {
	/// Create an empty response with the given status.
	pub fn new(status: StatusCode) -> Self {
		Self {
			status,
			headers: HeaderMap::new(),
			body: Bytes::new(),
		}
	}

	/// `200 OK`.
	pub fn ok() -> Self {
		Self::new(StatusCode::OK)
	}

	/// `201 Created`.
	pub fn created() -> Self {
		Self::new(StatusCode::CREATED)
	}

	/// `204 No Content`.
	pub fn no_content() -> Self {
		Self::new(StatusCode::NO_CONTENT)
	}

	/// `401 Unauthorized`.
	pub fn unauthorized() -> Self {
		Self::new(StatusCode::UNAUTHORIZED)
	}

	/// `404 Not Found`.
	pub fn not_found() -> Self {
		Self::new(StatusCode::NOT_FOUND)
	}

	/// `500 Internal Server Error`.
	pub fn internal_server_error() -> Self {
		Self::new(StatusCode::INTERNAL_SERVER_ERROR)
	}

	/// Replace the body.
	pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
		self.body = body.into();
		self
	}

	/// Add a header.
	pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
		self.headers.insert(name, value);
		self
	}

	/// The body decoded as UTF-8, lossily. Convenience for tests and logs.
	pub fn body_text(&self) -> String {
		String::from_utf8_lossy(&self.body).into_owned()
	}
}
