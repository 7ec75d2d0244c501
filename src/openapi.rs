//! OpenAPI 3.1 document for the REST front end
//!
//! Served at `/openapi.json` and rendered by `/docs`. The declared limit
//! maximum of 100 is documentation; the core does not clamp (see
//! DESIGN.md).

use serde_json::{json, Value};

/// Build the OpenAPI document
pub fn spec() -> Value {
    json!({
        "openapi": "3.1.0",
        "info": {
            "title": "Coupon Hub API",
            "version": crate::VERSION,
            "description": "API for searching and managing coupons, merchants, and categories",
        },
        "servers": [
            { "url": "http://localhost:3000", "description": "Local development server" },
        ],
        "components": {
            "securitySchemes": {
                "ApiKeyAuth": { "type": "apiKey", "in": "header", "name": "X-API-Key" },
            },
            "schemas": {
                "Coupon": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "string", "format": "uuid", "description": "Unique coupon identifier" },
                        "title": { "type": "string", "description": "Coupon title" },
                        "description": { "type": "string", "description": "Coupon description" },
                        "code": { "type": ["string", "null"], "description": "Coupon code" },
                        "url": { "type": ["string", "null"], "description": "Coupon URL" },
                        "price": { "type": ["number", "null"], "description": "Minimum purchase price" },
                        "currency": { "type": ["string", "null"], "description": "Currency code" },
                        "country": { "type": ["string", "null"], "description": "Country code" },
                        "merchant_name": { "type": "string", "description": "Merchant name" },
                        "merchant_slug": { "type": ["string", "null"], "description": "Merchant slug" },
                        "category_slug": { "type": ["string", "null"], "description": "Category slug" },
                        "source_key": { "type": ["string", "null"], "description": "Source identifier" },
                        "source_kind": { "type": ["string", "null"], "description": "Source type" },
                        "created_at": { "type": "string", "format": "date-time", "description": "Creation timestamp" },
                        "updated_at": { "type": "string", "format": "date-time", "description": "Last update timestamp" },
                    },
                },
                "Merchant": {
                    "type": "object",
                    "properties": {
                        "merchant_name": { "type": "string", "description": "Merchant name" },
                        "merchant_slug": { "type": ["string", "null"], "description": "Merchant slug" },
                    },
                },
                "ApiResponse": {
                    "type": "object",
                    "properties": {
                        "success": { "type": "boolean", "description": "Whether the request was successful" },
                        "count": { "type": "integer", "description": "Number of items returned" },
                        "data": { "description": "Response data" },
                    },
                },
                "ErrorResponse": {
                    "type": "object",
                    "properties": {
                        "success": { "type": "boolean", "example": false },
                        "error": { "type": "string", "description": "Error message" },
                    },
                },
            },
        },
        "security": [ { "ApiKeyAuth": [] } ],
        "paths": {
            "/api/coupons/search": {
                "get": {
                    "summary": "Search for coupons",
                    "description": "Search coupons by query, merchant, category, or country",
                    "operationId": "searchCoupons",
                    "parameters": [
                        query_param("query", "Search query for coupon title or description"),
                        query_param("merchant", "Filter by merchant name or slug"),
                        query_param("category", "Filter by category slug"),
                        query_param("country", "Filter by country code (e.g., 'IL', 'US')"),
                        limit_param("Maximum number of results to return", 10),
                    ],
                    "responses": {
                        "200": collection_response("#/components/schemas/Coupon"),
                        "500": error_response("Server error"),
                    },
                },
            },
            "/api/coupons/{id}": {
                "get": {
                    "summary": "Get coupon by ID",
                    "description": "Retrieve detailed information about a specific coupon",
                    "operationId": "getCouponById",
                    "parameters": [
                        {
                            "name": "id",
                            "in": "path",
                            "description": "Coupon ID",
                            "required": true,
                            "schema": { "type": "string", "format": "uuid" },
                        },
                    ],
                    "responses": {
                        "200": single_response("#/components/schemas/Coupon"),
                        "404": error_response("Coupon not found"),
                        "500": error_response("Server error"),
                    },
                },
            },
            "/api/coupons": {
                "post": {
                    "summary": "Create a new coupon",
                    "description": "Add a new coupon to the database",
                    "operationId": "createCoupon",
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": {
                                    "type": "object",
                                    "required": ["title", "description", "merchantName"],
                                    "properties": {
                                        "title": { "type": "string", "description": "Coupon title" },
                                        "description": { "type": "string", "description": "Coupon description" },
                                        "code": { "type": "string", "description": "Coupon code" },
                                        "url": { "type": "string", "description": "Coupon URL" },
                                        "price": { "type": "number", "description": "Minimum purchase price" },
                                        "currency": { "type": "string", "description": "Currency code (e.g., 'USD', 'ILS')" },
                                        "country": { "type": "string", "description": "Country code (e.g., 'US', 'IL')" },
                                        "merchantName": { "type": "string", "description": "Merchant name" },
                                        "merchantSlug": { "type": "string", "description": "Merchant slug" },
                                        "categorySlug": { "type": "string", "description": "Category slug" },
                                        "sourceKey": { "type": "string", "description": "Source identifier" },
                                        "sourceKind": { "type": "string", "description": "Source type (e.g., 'RSS', 'API')" },
                                    },
                                },
                            },
                        },
                    },
                    "responses": {
                        "201": single_response("#/components/schemas/Coupon"),
                        "400": error_response("Bad request - missing required fields"),
                        "500": error_response("Server error"),
                    },
                },
            },
            "/api/merchants": {
                "get": {
                    "summary": "List all merchants",
                    "description": "Get a list of all available merchants",
                    "operationId": "listMerchants",
                    "parameters": [ limit_param("Maximum number of merchants to return", 50) ],
                    "responses": {
                        "200": collection_response("#/components/schemas/Merchant"),
                        "500": error_response("Server error"),
                    },
                },
            },
            "/api/categories": {
                "get": {
                    "summary": "List all categories",
                    "description": "Get a list of all available coupon categories",
                    "operationId": "listCategories",
                    "parameters": [ limit_param("Maximum number of categories to return", 50) ],
                    "responses": {
                        "200": {
                            "description": "Successful response",
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "allOf": [
                                            { "$ref": "#/components/schemas/ApiResponse" },
                                            {
                                                "type": "object",
                                                "properties": {
                                                    "data": { "type": "array", "items": { "type": "string" } },
                                                },
                                            },
                                        ],
                                    },
                                },
                            },
                        },
                        "500": error_response("Server error"),
                    },
                },
            },
        },
    })
}

fn query_param(name: &str, description: &str) -> Value {
    json!({
        "name": name,
        "in": "query",
        "description": description,
        "required": false,
        "schema": { "type": "string" },
    })
}

fn limit_param(description: &str, default: i64) -> Value {
    json!({
        "name": "limit",
        "in": "query",
        "description": description,
        "required": false,
        "schema": { "type": "integer", "default": default, "maximum": 100 },
    })
}

fn collection_response(item_ref: &str) -> Value {
    json!({
        "description": "Successful response",
        "content": {
            "application/json": {
                "schema": {
                    "allOf": [
                        { "$ref": "#/components/schemas/ApiResponse" },
                        {
                            "type": "object",
                            "properties": {
                                "data": { "type": "array", "items": { "$ref": item_ref } },
                            },
                        },
                    ],
                },
            },
        },
    })
}

fn single_response(item_ref: &str) -> Value {
    json!({
        "description": "Successful response",
        "content": {
            "application/json": {
                "schema": {
                    "allOf": [
                        { "$ref": "#/components/schemas/ApiResponse" },
                        {
                            "type": "object",
                            "properties": { "data": { "$ref": item_ref } },
                        },
                    ],
                },
            },
        },
    })
}

fn error_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/ErrorResponse" },
            },
        },
    })
}
