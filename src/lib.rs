//! # Komichi
//!
//! A small trie-based HTTP request router.
//!
//! Komichi maps an incoming method and path to an async handler. Routes may
//! contain `:name` parameter segments and a trailing `*` wildcard; purely
//! literal routes are served from an exact-match table. Middleware wraps
//! handlers in registration order, either globally on the [`Router`] or
//! scoped to a prefixed [`Group`].
//!
//! ## Quick Example
//!
//! ```rust
//! use komichi::prelude::*;
//!
//! async fn show_user(request: Request) -> Result<Response> {
//! 	let id = request.path_param("id").unwrap_or_default().to_string();
//! 	Ok(Response::ok().with_body(id))
//! }
//!
//! # tokio_test::block_on(async {
//! let mut router = Router::new();
//! router.use_middleware(LoggingMiddleware::new());
//! router.add_fn(Method::GET, "/users/:id", show_user);
//!
//! let mut api = router.group("/api/v1");
//! api.add_fn(Method::GET, "/ping", |_req| async { Ok(Response::ok().with_body("pong")) });
//!
//! let request = Request::builder().uri("/users/7").build().unwrap();
//! let response = router.dispatch(request).await.unwrap();
//! assert_eq!(response.body_text(), "7");
//! # });
//! ```

pub use komichi_http::{
	ComposedHandler, Error, FunctionHandler, Handler, Middleware, Request, RequestBuilder,
	Response, Result, compose,
};
pub use komichi_middleware::LoggingMiddleware;
pub use komichi_router::{Group, Router};

/// Commonly used types, importable in one line.
pub mod prelude {
	pub use hyper::{Method, StatusCode};

	pub use crate::{
		Error, Group, Handler, LoggingMiddleware, Middleware, Request, Response, Result, Router,
	};
}
