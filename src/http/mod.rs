//! HTTP session management.
//!
//! This module provides:
//! - `HttpSession`: a client presenting one drawn fingerprint
//! - `SessionConfig`: proxy toggle, timeouts and the transport retry policy
//! - Per-asset request header profiles

mod request;
mod retry;
mod session;

pub(crate) use request::AssetHeaders;
pub use retry::TransportRetryPolicy;
pub use session::{HttpSession, SessionConfig};
