//! MCP (Model Context Protocol) support for Coupon Hub
//!
//! JSON-RPC over stdio: protocol types, tool definitions, and the tool
//! dispatch handler shared with the tests.

mod handler;
pub mod protocol;
pub mod tools;

pub use handler::CouponHubHandler;
pub use protocol::{
    methods, InitializeResult, McpHandler, McpRequest, McpResponse, McpServer, ToolCallResult,
    ToolContent,
};
pub use tools::get_tool_definitions;
