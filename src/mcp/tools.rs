//! MCP tool definitions for Coupon Hub

use serde_json::json;

use super::protocol::ToolDefinition;

/// All tool definitions: (name, description, input schema)
pub const TOOL_DEFINITIONS: &[(&str, &str, &str)] = &[
    (
        "search_coupons",
        "Search for coupons by merchant, category, or keyword",
        r#"{
            "type": "object",
            "properties": {
                "query": {"type": "string", "description": "Search query for coupon title or description"},
                "merchant": {"type": "string", "description": "Filter by merchant name or slug"},
                "category": {"type": "string", "description": "Filter by category slug"},
                "country": {"type": "string", "description": "Filter by country code (e.g., 'IL', 'US')"},
                "limit": {"type": "number", "description": "Maximum number of results to return", "default": 10}
            }
        }"#,
    ),
    (
        "get_coupon_details",
        "Get detailed information about a specific coupon by ID",
        r#"{
            "type": "object",
            "properties": {
                "coupon_id": {"type": "string", "description": "The unique identifier of the coupon"}
            },
            "required": ["coupon_id"]
        }"#,
    ),
    (
        "list_merchants",
        "List all available merchants",
        r#"{
            "type": "object",
            "properties": {
                "limit": {"type": "number", "description": "Maximum number of merchants to return", "default": 50}
            }
        }"#,
    ),
    (
        "list_categories",
        "List all available coupon categories",
        r#"{
            "type": "object",
            "properties": {
                "limit": {"type": "number", "description": "Maximum number of categories to return", "default": 50}
            }
        }"#,
    ),
    (
        "add_coupon",
        "Add a new coupon to the database",
        r#"{
            "type": "object",
            "properties": {
                "title": {"type": "string", "description": "Coupon title"},
                "description": {"type": "string", "description": "Coupon description"},
                "code": {"type": "string", "description": "Coupon code"},
                "url": {"type": "string", "description": "Coupon URL"},
                "price": {"type": "number", "description": "Minimum purchase price"},
                "currency": {"type": "string", "description": "Currency code (e.g., 'USD', 'ILS')"},
                "country": {"type": "string", "description": "Country code (e.g., 'US', 'IL')"},
                "merchantName": {"type": "string", "description": "Merchant name"},
                "merchantSlug": {"type": "string", "description": "Merchant slug"},
                "categorySlug": {"type": "string", "description": "Category slug"},
                "sourceKey": {"type": "string", "description": "Source identifier"},
                "sourceKind": {"type": "string", "description": "Source type (e.g., 'RSS', 'API')"}
            },
            "required": ["title", "description", "merchantName"]
        }"#,
    ),
];

/// Get all tool definitions as ToolDefinition structs
pub fn get_tool_definitions() -> Vec<ToolDefinition> {
    TOOL_DEFINITIONS
        .iter()
        .map(|(name, description, schema)| ToolDefinition {
            name: name.to_string(),
            description: description.to_string(),
            input_schema: serde_json::from_str(schema).unwrap_or(json!({})),
        })
        .collect()
}
