//! Trie-based HTTP request routing.
//!
//! This crate selects a handler for an incoming method and path, extracts
//! path parameters, and applies the configured middleware chain before
//! invoking it.
//!
//! - **Static routes** (no `:` or `*` in the path) live in an exact-match
//!   table keyed by method and path, checked first on every request.
//! - **Dynamic routes** live in a per-method trie with literal, parameter
//!   (`:name`) and trailing wildcard (`*`) segments. Literals win over
//!   parameters at the same depth; a wildcard matches the whole remaining
//!   suffix.
//! - **Middleware** wraps handlers. The router's global chain is applied at
//!   every dispatch; a [`Group`]'s chain is baked into its routes at
//!   registration time.
//!
//! Registration is expected to finish before serving starts; dispatch is
//! then read-only and freely concurrent.
//!
//! # Example
//!
//! ```
//! use komichi_router::Router;
//! use komichi_http::{Request, Response, Result};
//! use hyper::Method;
//!
//! async fn list_users(_request: Request) -> Result<Response> {
//! 	Ok(Response::ok().with_body("alice,bob"))
//! }
//!
//! # tokio_test::block_on(async {
//! let mut router = Router::new();
//! router.add_fn(Method::GET, "/users", list_users);
//!
//! let request = Request::builder().uri("/users").build().unwrap();
//! let response = router.dispatch(request).await.unwrap();
//! assert_eq!(response.body_text(), "alice,bob");
//! # });
//! ```

mod group;
mod router;
mod trie;

pub use group::Group;
pub use router::Router;
