//! MCP request handler: tool dispatch over the shared core
//!
//! Each tool translates its arguments into the same intent types the REST
//! front end builds, runs the same queries, and renders through the same
//! `Outcome`, so the two front ends cannot diverge.

use serde_json::{json, Value};

use super::protocol::{
    methods, InitializeResult, McpHandler, McpRequest, McpResponse, ToolCallResult,
};
use super::tools::get_tool_definitions;
use crate::outcome::Outcome;
use crate::storage::{queries, Storage};
use crate::types::{CouponDraft, ListQuery, SearchQuery};

/// MCP front end over the shared storage handle
pub struct CouponHubHandler {
    storage: Storage,
}

impl CouponHubHandler {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Dispatch a tool call to its outcome
    pub fn handle_tool_call(&self, name: &str, params: Value) -> ToolCallResult {
        match name {
            "search_coupons" => self.tool_search_coupons(params),
            "get_coupon_details" => self.tool_get_coupon_details(params),
            "list_merchants" => self.tool_list_merchants(params),
            "list_categories" => self.tool_list_categories(params),
            "add_coupon" => self.tool_add_coupon(params),
            _ => ToolCallResult::error_json(&json!({
                "error": format!("Unknown tool: {}", name)
            })),
        }
    }

    fn tool_search_coupons(&self, params: Value) -> ToolCallResult {
        let intent: SearchQuery = match serde_json::from_value(params) {
            Ok(intent) => intent,
            Err(e) => return invalid_arguments(&e),
        };
        Outcome::collection(
            self.storage
                .with_connection(|conn| queries::search_coupons(conn, &intent)),
        )
        .into_tool_result()
    }

    fn tool_get_coupon_details(&self, params: Value) -> ToolCallResult {
        let id = params
            .get("coupon_id")
            .and_then(|v| v.as_str())
            .unwrap_or("");
        if id.is_empty() {
            return ToolCallResult::error_json(&json!({"error": "coupon_id is required"}));
        }
        Outcome::single(self.storage.with_connection(|conn| queries::get_coupon(conn, id)))
            .into_tool_result()
    }

    fn tool_list_merchants(&self, params: Value) -> ToolCallResult {
        let intent: ListQuery = serde_json::from_value(params).unwrap_or_default();
        Outcome::merchants(
            self.storage
                .with_connection(|conn| queries::list_merchants(conn, &intent)),
        )
        .into_tool_result()
    }

    fn tool_list_categories(&self, params: Value) -> ToolCallResult {
        let intent: ListQuery = serde_json::from_value(params).unwrap_or_default();
        Outcome::categories(
            self.storage
                .with_connection(|conn| queries::list_categories(conn, &intent)),
        )
        .into_tool_result()
    }

    fn tool_add_coupon(&self, params: Value) -> ToolCallResult {
        let draft: CouponDraft = match serde_json::from_value(params) {
            Ok(draft) => draft,
            Err(e) => return invalid_arguments(&e),
        };
        let result = draft.validate().and_then(|payload| {
            self.storage
                .with_connection(|conn| queries::insert_coupon(conn, &payload))
        });
        Outcome::created(result).into_tool_result()
    }
}

fn invalid_arguments(e: &serde_json::Error) -> ToolCallResult {
    ToolCallResult::error_json(&json!({
        "error": format!("Invalid arguments: {}", e)
    }))
}

impl McpHandler for CouponHubHandler {
    fn handle_request(&self, request: McpRequest) -> McpResponse {
        match request.method.as_str() {
            methods::INITIALIZE => {
                let result = InitializeResult::default();
                McpResponse::success(request.id, json!(result))
            }
            methods::INITIALIZED => {
                // Notification, no response needed
                McpResponse::success(request.id, json!({}))
            }
            methods::LIST_TOOLS => {
                let tools = get_tool_definitions();
                McpResponse::success(request.id, json!({"tools": tools}))
            }
            methods::CALL_TOOL => {
                let name = request
                    .params
                    .get("name")
                    .and_then(|v| v.as_str())
                    .unwrap_or("");
                let arguments = request
                    .params
                    .get("arguments")
                    .cloned()
                    .unwrap_or(json!({}));

                let tool_result = self.handle_tool_call(name, arguments);
                if tool_result.is_error == Some(true) {
                    tracing::warn!(tool = name, "tool call failed");
                }
                McpResponse::success(request.id, json!(tool_result))
            }
            _ => McpResponse::error(
                request.id,
                -32601,
                format!("Method not found: {}", request.method),
            ),
        }
    }
}
