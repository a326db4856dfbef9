//! Bundled middleware implementations for the komichi router.

mod logging;

pub use logging::LoggingMiddleware;
