//! Prefix- and middleware-scoped route registration.

use std::future::Future;
use std::sync::Arc;

use hyper::Method;
use komichi_http::{FunctionHandler, Handler, Middleware, Request, Response, Result, compose};

use crate::router::Router;

/// A registration scope: a path prefix plus its own middleware sequence,
/// delegating to the parent [`Router`].
///
/// A group holds no routes and plays no part in dispatch. Its middleware is
/// baked into each handler once, at registration time, so it sits *inside*
/// the router's global chain (which is applied fresh at every dispatch).
///
/// # Examples
///
/// ```
/// use komichi_router::Router;
/// use komichi_http::{Request, Response, Result};
/// use hyper::Method;
///
/// async fn ping(_request: Request) -> Result<Response> {
/// 	Ok(Response::ok().with_body("pong"))
/// }
///
/// # tokio_test::block_on(async {
/// let mut router = Router::new();
/// let mut api = router.group("/api/v1");
/// api.add_fn(Method::GET, "/ping", ping);
///
/// let request = Request::builder().uri("/api/v1/ping").build().unwrap();
/// let response = router.dispatch(request).await.unwrap();
/// assert_eq!(response.body_text(), "pong");
/// # });
/// ```
pub struct Group<'r> {
	router: &'r mut Router,
	prefix: String,
	middleware: Vec<Arc<dyn Middleware>>,
}

impl<'r> Group<'r> {
	pub(crate) fn new(router: &'r mut Router, prefix: &str) -> Self {
		Self {
			router,
			prefix: prefix.trim_matches('/').to_string(),
			middleware: Vec::new(),
		}
	}

	/// The group's prefix, trimmed of surrounding slashes.
	pub fn prefix(&self) -> &str {
		&self.prefix
	}

	/// Append a middleware to this group's own chain, independent of the
	/// parent router's global chain.
	pub fn use_middleware<M: Middleware + 'static>(&mut self, middleware: M) {
		self.middleware.push(Arc::new(middleware));
	}

	/// Register a handler under the group's prefix.
	///
	/// The handler is wrapped with the group's middleware (first-registered
	/// outermost, same convention as the global chain) and the fully
	/// qualified path is handed to the parent router.
	pub fn add_route<H: Handler + 'static>(&mut self, method: Method, path: &str, handler: H) {
		let full_path = format!("{}/{}", self.prefix, path.trim_matches('/'));
		let wrapped = compose(&self.middleware, Arc::new(handler));
		self.router.add_route_arc(method, &full_path, wrapped);
	}

	/// Register a plain async function under the group's prefix.
	pub fn add_fn<F, Fut>(&mut self, method: Method, path: &str, func: F)
	where
		F: Fn(Request) -> Fut + Send + Sync + 'static,
		Fut: Future<Output = Result<Response>> + Send + 'static,
	{
		self.add_route(method, path, FunctionHandler::new(func));
	}
}
