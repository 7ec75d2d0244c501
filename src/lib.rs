//! Coupon Hub - coupon search and management
//!
//! A single coupon dataset exposed through two front ends: a REST API and
//! an MCP tool server. Both consume the same core (filter compilation,
//! record validation, result rendering), so they cannot drift apart.

pub mod error;
pub mod http;
pub mod mcp;
pub mod openapi;
pub mod outcome;
pub mod storage;
pub mod types;

pub use error::{CouponHubError, Result};
pub use storage::Storage;
pub use types::*;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
