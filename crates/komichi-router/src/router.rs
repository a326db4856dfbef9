//! Route registration and request dispatch.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use hyper::Method;
use komichi_http::{FunctionHandler, Handler, Middleware, Request, Response, Result, compose};
use tracing::{debug, trace, warn};

use crate::group::Group;
use crate::trie::Node;

/// The router: an owned aggregate of the static route table, the per-method
/// route tries, the global middleware sequence, and the not-found fallback.
///
/// Intended lifecycle is build-then-serve: all registration
/// ([`add_route`](Self::add_route), [`use_middleware`](Self::use_middleware),
/// [`group`](Self::group)) happens during single-threaded startup, after
/// which [`dispatch`](Self::dispatch) is read-only and safe for unbounded
/// concurrent invocation.
///
/// # Examples
///
/// ```
/// use komichi_router::Router;
/// use komichi_http::{Request, Response, Result};
/// use hyper::Method;
///
/// async fn show_user(request: Request) -> Result<Response> {
/// 	let id = request.path_param("id").unwrap_or("?").to_string();
/// 	Ok(Response::ok().with_body(id))
/// }
///
/// # tokio_test::block_on(async {
/// let mut router = Router::new();
/// router.add_fn(Method::GET, "/users/:id", show_user);
///
/// let request = Request::builder().uri("/users/42").build().unwrap();
/// let response = router.dispatch(request).await.unwrap();
/// assert_eq!(response.body_text(), "42");
/// # });
/// ```
pub struct Router {
	static_routes: HashMap<String, Arc<dyn Handler>>,
	dynamic_routes: HashMap<Method, Node>,
	middleware: Vec<Arc<dyn Middleware>>,
	not_found: Arc<dyn Handler>,
}

impl Router {
	/// Create an empty router with the default not-found fallback.
	pub fn new() -> Self {
		Self {
			static_routes: HashMap::new(),
			dynamic_routes: HashMap::new(),
			middleware: Vec::new(),
			not_found: Arc::new(DefaultNotFound),
		}
	}

	/// Replace the not-found fallback handler.
	///
	/// # Examples
	///
	/// ```
	/// use komichi_router::Router;
	/// use komichi_http::{Response, Result};
	///
	/// # tokio_test::block_on(async {
	/// let router = Router::new().with_not_found(komichi_http::FunctionHandler::new(
	/// 	|_request| async { Ok(Response::not_found().with_body("nope")) },
	/// ));
	///
	/// let request = komichi_http::Request::builder().uri("/missing").build().unwrap();
	/// let response = router.dispatch(request).await.unwrap();
	/// assert_eq!(response.body_text(), "nope");
	/// # });
	/// ```
	pub fn with_not_found<H: Handler + 'static>(mut self, handler: H) -> Self {
		self.not_found = Arc::new(handler);
		self
	}

	/// Append a middleware to the global chain.
	///
	/// The global chain wraps every matched handler at dispatch time, in
	/// registration order: the first-registered middleware is outermost and
	/// therefore runs first on the way in and last on the way out.
	pub fn use_middleware<M: Middleware + 'static>(&mut self, middleware: M) {
		self.middleware.push(Arc::new(middleware));
	}

	/// Register a handler for `method` and `path`.
	///
	/// Surrounding slashes are trimmed, so `/a/b/`, `a/b` and `/a/b` all
	/// register the same route. A path containing `:` or `*` anywhere is
	/// classified as dynamic and inserted into the per-method trie; anything
	/// else goes into the exact-match static table. The scan is over the
	/// whole string, so a literal segment that merely contains a marker
	/// character (`/emoji:smile`) lands in the trie rather than the static
	/// table; it still matches, as a literal trie child, since only a
	/// segment-leading marker is special during insertion.
	///
	/// Registering the same path twice silently replaces the old handler
	/// (last registration wins); a warning is logged when that happens.
	pub fn add_route<H: Handler + 'static>(&mut self, method: Method, path: &str, handler: H) {
		self.add_route_arc(method, path, Arc::new(handler));
	}

	/// Register a plain async function as the handler for `method`/`path`.
	pub fn add_fn<F, Fut>(&mut self, method: Method, path: &str, func: F)
	where
		F: Fn(Request) -> Fut + Send + Sync + 'static,
		Fut: Future<Output = Result<Response>> + Send + 'static,
	{
		self.add_route(method, path, FunctionHandler::new(func));
	}

	pub(crate) fn add_route_arc(&mut self, method: Method, path: &str, handler: Arc<dyn Handler>) {
		let path = path.trim_matches('/');

		let replaced = if path.contains(':') || path.contains('*') {
			let segments: Vec<&str> = path.split('/').collect();
			self.dynamic_routes
				.entry(method.clone())
				.or_insert_with(Node::new)
				.insert(&segments, handler)
		} else {
			self.static_routes
				.insert(static_key(&method, path), handler)
				.is_some()
		};

		if replaced {
			warn!(%method, path, "route registered more than once; previous handler replaced");
		}
	}

	/// Open a registration scope under `prefix`.
	///
	/// Routes added through the group are prefixed and pre-wrapped with the
	/// group's own middleware before landing in this router. The group holds
	/// no routes itself.
	pub fn group(&mut self, prefix: &str) -> Group<'_> {
		Group::new(self, prefix)
	}

	/// Dispatch a request to the matching handler.
	///
	/// Lookup order: the static table (exact match on method + trimmed
	/// path), then the dynamic trie for the request's method. On a match the
	/// handler is wrapped in the global middleware chain and invoked; bound
	/// path parameters are written into the request first. When nothing
	/// matches, the not-found fallback is invoked instead (unwrapped).
	pub async fn dispatch(&self, mut request: Request) -> Result<Response> {
		let path = request.uri.path().trim_matches('/').to_string();

		if let Some(handler) = self.static_routes.get(&static_key(&request.method, &path)) {
			trace!(method = %request.method, path, "static route matched");
			return self.serve(Arc::clone(handler), request).await;
		}

		if let Some(root) = self.dynamic_routes.get(&request.method)
			&& let Some(found) = root.search(&path)
		{
			trace!(method = %request.method, path, "dynamic route matched");
			request.path_params = found.params;
			return self.serve(found.handler, request).await;
		}

		debug!(method = %request.method, path, "no route matched");
		self.not_found.handle(request).await
	}

	async fn serve(&self, handler: Arc<dyn Handler>, request: Request) -> Result<Response> {
		compose(&self.middleware, handler).handle(request).await
	}
}

impl Default for Router {
	fn default() -> Self {
		Self::new()
	}
}

/// The router is itself a handler, so it can be served directly or wrapped
/// by an outer middleware stack.
#[async_trait]
impl Handler for Router {
	async fn handle(&self, request: Request) -> Result<Response> {
		self.dispatch(request).await
	}
}

fn static_key(method: &Method, path: &str) -> String {
	format!("{method} {path}")
}

/// Default not-found fallback: a plain `404` response.
struct DefaultNotFound;

#[async_trait]
impl Handler for DefaultNotFound {
	async fn handle(&self, _request: Request) -> Result<Response> {
		Ok(Response::not_found().with_body("404 page not found"))
	}
}
