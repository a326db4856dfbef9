//! HTTP object model for the komichi router.
//!
//! This crate provides the types the router consumes and produces:
//! [`Request`], [`Response`], and the [`Handler`] / [`Middleware`]
//! capability traits. The transport layer that actually reads and writes
//! sockets lives outside this crate; everything here is plain data plus
//! trait objects.
//!
//! # Example
//!
//! ```
//! use komichi_http::{Handler, Request, Response, Result};
//! use async_trait::async_trait;
//!
//! struct Ping;
//!
//! #[async_trait]
//! impl Handler for Ping {
//! 	async fn handle(&self, _request: Request) -> Result<Response> {
//! 		Ok(Response::ok().with_body("pong"))
//! 	}
//! }
//! ```

pub mod exception;
mod middleware;
mod request;
mod response;

pub use exception::{Error, Result};
pub use middleware::{ComposedHandler, FunctionHandler, Handler, Middleware, compose};
pub use request::{Request, RequestBuilder};
pub use response::Response;
