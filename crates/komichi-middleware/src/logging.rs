//! Request logging middleware.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use komichi_http::{Handler, Middleware, Request, Response, Result};
use tracing::{error, info};

/// Logs each request with its method, path, status code, and duration.
///
/// Registered first on a router, it sees the raw request before any other
/// middleware and the final response after all of them.
///
/// # Examples
///
/// ```
/// use komichi_middleware::LoggingMiddleware;
/// use komichi_router::Router;
///
/// let mut router = Router::new();
/// router.use_middleware(LoggingMiddleware::new());
/// ```
pub struct LoggingMiddleware;

impl LoggingMiddleware {
	pub fn new() -> Self {
		Self
	}
}

impl Default for LoggingMiddleware {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl Middleware for LoggingMiddleware {
	async fn process(&self, request: Request, next: Arc<dyn Handler>) -> Result<Response> {
		let start = Instant::now();
		let method = request.method.clone();
		let path = request.path().to_string();

		let result = next.handle(request).await;

		let elapsed_ms = start.elapsed().as_millis() as u64;
		match &result {
			Ok(response) => {
				info!(%method, path, status = response.status.as_u16(), elapsed_ms, "request completed");
			}
			Err(err) => {
				error!(%method, path, error = %err, elapsed_ms, "request failed");
			}
		}

		result
	}
}
