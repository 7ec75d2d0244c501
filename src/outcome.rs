//! Normalized operation outcomes shared by both front ends
//!
//! Every core operation ends in an [`Outcome`]; the REST layer renders it as
//! an [`Envelope`] plus an HTTP status, the MCP layer as a tool result with
//! an `isError` flag. What counts as success, failure, or not-found is
//! decided once, here.

use serde::Serialize;
use serde_json::Value;

use crate::error::{CouponHubError, Result};
use crate::mcp::ToolCallResult;
use crate::types::{Coupon, Merchant};

/// Message used for id lookup misses on both front ends
const NOT_FOUND_MESSAGE: &str = "Coupon not found";

/// Transport-independent result of a core operation
#[derive(Debug)]
pub enum Outcome {
    /// Search result: an ordered record collection
    Records(Vec<Coupon>),
    /// Single record from an id lookup
    Record(Box<Coupon>),
    /// Freshly stored record from a create
    Created(Box<Coupon>),
    /// Distinct merchant name/slug pairs
    Merchants(Vec<Merchant>),
    /// Distinct category values
    Categories(Vec<String>),
    /// Id lookup miss; not a system failure
    NotFound,
    /// Classified failure from a collaborator
    Failure(CouponHubError),
}

/// REST envelope: `{ success, count?, data?, error? }`
#[derive(Debug, Serialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Outcome {
    pub fn collection(result: Result<Vec<Coupon>>) -> Self {
        match result {
            Ok(coupons) => Outcome::Records(coupons),
            Err(e) => Outcome::Failure(e),
        }
    }

    /// Render an id lookup; a `NotFound` error is an outcome, not a failure
    pub fn single(result: Result<Coupon>) -> Self {
        match result {
            Ok(coupon) => Outcome::Record(Box::new(coupon)),
            Err(CouponHubError::NotFound(_)) => Outcome::NotFound,
            Err(e) => Outcome::Failure(e),
        }
    }

    pub fn created(result: Result<Coupon>) -> Self {
        match result {
            Ok(coupon) => Outcome::Created(Box::new(coupon)),
            Err(e) => Outcome::Failure(e),
        }
    }

    pub fn merchants(result: Result<Vec<Merchant>>) -> Self {
        match result {
            Ok(merchants) => Outcome::Merchants(merchants),
            Err(e) => Outcome::Failure(e),
        }
    }

    pub fn categories(result: Result<Vec<String>>) -> Self {
        match result {
            Ok(categories) => Outcome::Categories(categories),
            Err(e) => Outcome::Failure(e),
        }
    }

    /// HTTP status class for this outcome
    pub fn http_status(&self) -> u16 {
        match self {
            Outcome::Records(_)
            | Outcome::Record(_)
            | Outcome::Merchants(_)
            | Outcome::Categories(_) => 200,
            Outcome::Created(_) => 201,
            Outcome::NotFound => 404,
            Outcome::Failure(e) => match e {
                CouponHubError::MissingFields(_) | CouponHubError::InvalidInput(_) => 400,
                CouponHubError::Unauthorized(_) => 401,
                CouponHubError::NotFound(_) => 404,
                _ => 500,
            },
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::NotFound | Outcome::Failure(_))
    }

    /// The `data` payload, identical across both front ends
    pub fn data(&self) -> Option<Value> {
        let value = match self {
            Outcome::Records(coupons) => serde_json::to_value(coupons),
            Outcome::Record(coupon) | Outcome::Created(coupon) => serde_json::to_value(coupon),
            Outcome::Merchants(merchants) => serde_json::to_value(merchants),
            Outcome::Categories(categories) => serde_json::to_value(categories),
            Outcome::NotFound | Outcome::Failure(_) => return None,
        };
        value.ok()
    }

    /// Collection count, present only for collection-shaped outcomes
    pub fn count(&self) -> Option<usize> {
        match self {
            Outcome::Records(items) => Some(items.len()),
            Outcome::Merchants(items) => Some(items.len()),
            Outcome::Categories(items) => Some(items.len()),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<String> {
        match self {
            Outcome::NotFound => Some(NOT_FOUND_MESSAGE.to_string()),
            Outcome::Failure(e) => Some(e.to_string()),
            _ => None,
        }
    }

    /// Render the REST envelope together with its status code
    pub fn into_rest(self) -> (u16, Envelope) {
        let status = self.http_status();
        let envelope = Envelope {
            success: !self.is_error(),
            count: self.count(),
            data: self.data(),
            error: self.error_message(),
        };
        (status, envelope)
    }

    /// Render the MCP tool result: a text block carrying the same JSON
    /// payload the REST envelope carries, with `isError` mirroring the
    /// status class.
    pub fn into_tool_result(self) -> ToolCallResult {
        match self.data() {
            Some(data) => ToolCallResult::json(&data),
            None => {
                let message = self
                    .error_message()
                    .unwrap_or_else(|| "Internal error".to_string());
                ToolCallResult::error_json(&serde_json::json!({ "error": message }))
            }
        }
    }
}
