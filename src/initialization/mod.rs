//! Process-wide initialization.
//!
//! HTTP sessions are built per fetch attempt by
//! [`HttpSession::new`](crate::http::HttpSession::new), so the only global
//! resource left to set up here is the logger.

mod logger;

// Re-export public API
pub use logger::init_logger_with;
