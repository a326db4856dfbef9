//! Handler and middleware traits, and middleware composition.
//!
//! ## Handler
//!
//! The [`Handler`] trait is the core abstraction for processing requests:
//!
//! ```
//! use komichi_http::{Handler, Request, Response, Result};
//! use async_trait::async_trait;
//!
//! struct Hello;
//!
//! #[async_trait]
//! impl Handler for Hello {
//! 	async fn handle(&self, _request: Request) -> Result<Response> {
//! 		Ok(Response::ok().with_body("Hello!"))
//! 	}
//! }
//! ```
//!
//! ## Middleware
//!
//! [`Middleware`] wraps handlers to add cross-cutting behavior. A middleware
//! receives the request and the next handler in the chain; it can act before
//! calling `next`, after it, or skip it entirely:
//!
//! ```
//! use komichi_http::{Handler, Middleware, Request, Response, Result};
//! use async_trait::async_trait;
//! use std::sync::Arc;
//!
//! struct ServerHeader;
//!
//! #[async_trait]
//! impl Middleware for ServerHeader {
//! 	async fn process(&self, request: Request, next: Arc<dyn Handler>) -> Result<Response> {
//! 		let response = next.handle(request).await?;
//! 		Ok(response.with_header(
//! 			hyper::header::SERVER,
//! 			hyper::header::HeaderValue::from_static("komichi"),
//! 		))
//! 	}
//! }
//! ```
//!
//! ## Composition order
//!
//! [`compose`] turns an ordered middleware slice plus a terminal handler into
//! a single handler. The first middleware in the slice becomes the outermost
//! wrapper: it sees the request before everyone else and the response after
//! everyone else.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::exception::Result;
use crate::request::Request;
use crate::response::Response;

/// Handler trait for processing requests.
///
/// All request handlers implement this trait; handlers receive a request and
/// produce a response or an error.
#[async_trait]
pub trait Handler: Send + Sync {
	/// Handle an HTTP request and produce a response.
	///
	/// # Errors
	///
	/// Returns an error if the request cannot be processed.
	async fn handle(&self, request: Request) -> Result<Response>;
}

/// Blanket implementation for `Arc<T>` where `T: Handler`.
///
/// Allows `Arc<dyn Handler>` to be used anywhere a `Handler` is expected,
/// enabling shared ownership of handlers across threads.
#[async_trait]
impl<T: Handler + ?Sized> Handler for Arc<T> {
	async fn handle(&self, request: Request) -> Result<Response> {
		(**self).handle(request).await
	}
}

/// Adapter that turns a plain async function into a [`Handler`].
///
/// # Examples
///
/// ```
/// use komichi_http::{FunctionHandler, Handler, Request, Response, Result};
///
/// async fn hello(_request: Request) -> Result<Response> {
/// 	Ok(Response::ok().with_body("hi"))
/// }
///
/// # tokio_test::block_on(async {
/// let handler = FunctionHandler::new(hello);
/// let request = Request::builder().uri("/").build().unwrap();
/// let response = handler.handle(request).await.unwrap();
/// assert_eq!(response.body_text(), "hi");
/// # });
/// ```
pub struct FunctionHandler<F> {
	func: F,
}

impl<F> FunctionHandler<F> {
	pub fn new(func: F) -> Self {
		Self { func }
	}
}

#[async_trait]
impl<F, Fut> Handler for FunctionHandler<F>
where
	F: Fn(Request) -> Fut + Send + Sync,
	Fut: Future<Output = Result<Response>> + Send,
{
	async fn handle(&self, request: Request) -> Result<Response> {
		(self.func)(request).await
	}
}

/// Middleware trait for request/response processing.
///
/// Uses composition instead of inheritance: a middleware may modify the
/// request before passing it to `next`, modify the response on the way back
/// out, or short-circuit by returning without calling `next` at all.
#[async_trait]
pub trait Middleware: Send + Sync {
	/// Process a request through this middleware.
	///
	/// # Errors
	///
	/// Returns an error if the middleware or the next handler fails.
	async fn process(&self, request: Request, next: Arc<dyn Handler>) -> Result<Response>;
}

/// A handler formed by wrapping `next` in one middleware layer.
pub struct ComposedHandler {
	middleware: Arc<dyn Middleware>,
	next: Arc<dyn Handler>,
}

#[async_trait]
impl Handler for ComposedHandler {
	async fn handle(&self, request: Request) -> Result<Response> {
		self.middleware.process(request, Arc::clone(&self.next)).await
	}
}

/// Compose an ordered middleware sequence around a terminal handler.
///
/// Wrapping proceeds from the last middleware outward to the first, so the
/// first-registered middleware ends up outermost: it runs first on the way
/// in and last on the way out. An empty sequence returns the terminal
/// handler unchanged.
pub fn compose(middleware: &[Arc<dyn Middleware>], terminal: Arc<dyn Handler>) -> Arc<dyn Handler> {
	let mut current = terminal;
	for layer in middleware.iter().rev() {
		current = Arc::new(ComposedHandler {
			middleware: Arc::clone(layer),
			next: current,
		});
	}
	current
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	struct MockHandler {
		response_body: String,
	}

	#[async_trait]
	impl Handler for MockHandler {
		async fn handle(&self, _request: Request) -> Result<Response> {
			Ok(Response::ok().with_body(self.response_body.clone()))
		}
	}

	// Prefixes the response body, so composition order is visible in output.
	struct PrefixMiddleware {
		prefix: String,
	}

	#[async_trait]
	impl Middleware for PrefixMiddleware {
		async fn process(&self, request: Request, next: Arc<dyn Handler>) -> Result<Response> {
			let response = next.handle(request).await?;
			let body = format!("{}{}", self.prefix, response.body_text());
			Ok(Response::ok().with_body(body))
		}
	}

	fn create_test_request() -> Request {
		Request::builder().uri("/").build().unwrap()
	}

	#[rstest]
	#[tokio::test]
	async fn test_compose_empty_returns_terminal() {
		let handler: Arc<dyn Handler> = Arc::new(MockHandler {
			response_body: "Test".to_string(),
		});

		let composed = compose(&[], handler);
		let response = composed.handle(create_test_request()).await.unwrap();

		assert_eq!(response.body_text(), "Test");
	}

	#[rstest]
	#[tokio::test]
	async fn test_compose_single_middleware() {
		let handler: Arc<dyn Handler> = Arc::new(MockHandler {
			response_body: "Handler".to_string(),
		});
		let chain: Vec<Arc<dyn Middleware>> = vec![Arc::new(PrefixMiddleware {
			prefix: "MW1:".to_string(),
		})];

		let composed = compose(&chain, handler);
		let response = composed.handle(create_test_request()).await.unwrap();

		assert_eq!(response.body_text(), "MW1:Handler");
	}

	#[rstest]
	#[tokio::test]
	async fn test_compose_first_registered_is_outermost() {
		let handler: Arc<dyn Handler> = Arc::new(MockHandler {
			response_body: "Data".to_string(),
		});
		let chain: Vec<Arc<dyn Middleware>> = vec![
			Arc::new(PrefixMiddleware {
				prefix: "M1:".to_string(),
			}),
			Arc::new(PrefixMiddleware {
				prefix: "M2:".to_string(),
			}),
		];

		let composed = compose(&chain, handler);
		let response = composed.handle(create_test_request()).await.unwrap();

		// M1 was registered first, so its prefix lands last on the way out.
		assert_eq!(response.body_text(), "M1:M2:Data");
	}

	struct ShortCircuitMiddleware;

	#[async_trait]
	impl Middleware for ShortCircuitMiddleware {
		async fn process(&self, _request: Request, _next: Arc<dyn Handler>) -> Result<Response> {
			Ok(Response::unauthorized().with_body("Auth required"))
		}
	}

	#[rstest]
	#[tokio::test]
	async fn test_middleware_short_circuit_skips_handler() {
		let handler: Arc<dyn Handler> = Arc::new(MockHandler {
			response_body: "never reached".to_string(),
		});
		let chain: Vec<Arc<dyn Middleware>> = vec![Arc::new(ShortCircuitMiddleware)];

		let composed = compose(&chain, handler);
		let response = composed.handle(create_test_request()).await.unwrap();

		assert_eq!(response.status, hyper::StatusCode::UNAUTHORIZED);
		assert_eq!(response.body_text(), "Auth required");
	}

	#[rstest]
	#[tokio::test]
	async fn test_function_handler() {
		async fn hello(_request: Request) -> Result<Response> {
			Ok(Response::ok().with_body("hello"))
		}

		let handler = FunctionHandler::new(hello);
		let response = handler.handle(create_test_request()).await.unwrap();

		assert_eq!(response.body_text(), "hello");
	}
}
