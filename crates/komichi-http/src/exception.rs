//! Error types shared by handlers and middleware.
//!
//! Routing misses are not errors: an unmatched request is answered by the
//! router's not-found fallback. The variants here exist for failures inside
//! handlers and middleware, which flow back through `Result<Response>`.

use thiserror::Error;

/// Errors produced while processing a request.
#[derive(Debug, Error)]
pub enum Error {
	/// The requested resource does not exist.
	#[error("not found: {0}")]
	NotFound(String),

	/// The request was malformed (bad URI, invalid header, ...).
	#[error("bad request: {0}")]
	BadRequest(String),

	/// An internal failure inside a handler or middleware.
	#[error("internal error: {0}")]
	Internal(String),
}

/// Result alias used throughout the komichi crates.
pub type Result<T> = std::result::Result<T, Error>;
