//! Core types for Coupon Hub
//!
//! The record schema lives here: the stored `Coupon` shape, the raw
//! `CouponDraft` creation input and its validation into a `CreationPayload`,
//! and the `SearchQuery` intent consumed by the filter compiler.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{CouponHubError, Result};

/// Unique identifier for a coupon (UUID v4, server-assigned)
pub type CouponId = String;

/// Default row cap for search when the caller supplies none
pub const DEFAULT_SEARCH_LIMIT: i64 = 10;

/// Default row cap for the distinct-value listers
pub const DEFAULT_LIST_LIMIT: i64 = 50;

/// A stored coupon. Wire shape uses the column names, matching what the
/// storage layer returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coupon {
    /// Unique identifier, assigned exactly once at creation
    pub id: CouponId,
    /// Coupon title
    pub title: String,
    /// Coupon description
    pub description: String,
    /// Redemption code
    pub code: Option<String>,
    /// Landing page URL
    pub url: Option<String>,
    /// Minimum purchase price
    pub price: Option<f64>,
    /// Currency code (e.g. "USD", "ILS")
    pub currency: Option<String>,
    /// Country code (e.g. "US", "IL")
    pub country: Option<String>,
    /// Merchant name
    pub merchant_name: String,
    /// Merchant slug, conventionally a normalized form of the name
    pub merchant_slug: Option<String>,
    /// Category slug; categories exist only as values observed here
    pub category_slug: Option<String>,
    /// Provenance: source identifier
    pub source_key: Option<String>,
    /// Provenance: source type (e.g. "RSS", "API")
    pub source_kind: Option<String>,
    /// Set by the server at insertion
    pub created_at: DateTime<Utc>,
    /// Set at insertion; no operation mutates it (there is no update)
    pub updated_at: DateTime<Utc>,
}

/// A distinct merchant name/slug pair from the merchant lister
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Merchant {
    #[serde(rename = "merchant_name")]
    pub name: String,
    #[serde(rename = "merchant_slug")]
    pub slug: Option<String>,
}

/// Raw creation input as supplied by a caller. Field names are camelCase on
/// the wire; every field is optional here so validation can report exactly
/// what is missing. Unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub code: Option<String>,
    pub url: Option<String>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub country: Option<String>,
    pub merchant_name: Option<String>,
    pub merchant_slug: Option<String>,
    pub category_slug: Option<String>,
    pub source_key: Option<String>,
    pub source_kind: Option<String>,
}

/// A validated creation payload. Required fields are guaranteed non-empty;
/// optional fields are `None` when absent or supplied as empty strings,
/// never `""`.
#[derive(Debug, Clone, PartialEq)]
pub struct CreationPayload {
    pub title: String,
    pub description: String,
    pub code: Option<String>,
    pub url: Option<String>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub country: Option<String>,
    pub merchant_name: String,
    pub merchant_slug: Option<String>,
    pub category_slug: Option<String>,
    pub source_key: Option<String>,
    pub source_kind: Option<String>,
}

/// Treat whitespace-only values the same as absent ones
fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.trim().is_empty())
}

/// Normalize an optional text field: empty or whitespace-only becomes None
fn optional_text(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl CouponDraft {
    /// Validate the draft into a `CreationPayload`.
    ///
    /// Pure and deterministic: reports every missing required field at once,
    /// in schema order, using the wire (camelCase) names.
    pub fn validate(self) -> Result<CreationPayload> {
        let mut missing = Vec::new();
        if !present(&self.title) {
            missing.push("title");
        }
        if !present(&self.description) {
            missing.push("description");
        }
        if !present(&self.merchant_name) {
            missing.push("merchantName");
        }
        if !missing.is_empty() {
            return Err(CouponHubError::MissingFields(missing));
        }

        if let Some(price) = self.price {
            if price < 0.0 {
                return Err(CouponHubError::InvalidInput(format!(
                    "price must be non-negative, got {}",
                    price
                )));
            }
        }

        Ok(CreationPayload {
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            code: optional_text(self.code),
            url: optional_text(self.url),
            price: self.price,
            currency: optional_text(self.currency),
            country: optional_text(self.country),
            merchant_name: self.merchant_name.unwrap_or_default(),
            merchant_slug: optional_text(self.merchant_slug),
            category_slug: optional_text(self.category_slug),
            source_key: optional_text(self.source_key),
            source_kind: optional_text(self.source_kind),
        })
    }
}

/// A search intent: the named set of optional criteria both front ends
/// translate their requests into. Unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    /// Substring match against title or description
    pub query: Option<String>,
    /// Substring match against merchant name or slug
    pub merchant: Option<String>,
    /// Substring match against category slug
    pub category: Option<String>,
    /// Exact match against country code
    pub country: Option<String>,
    /// Row cap; non-numeric input coerces to the default rather than failing
    #[serde(default, deserialize_with = "lenient_limit")]
    pub limit: Option<i64>,
}

/// Intent for the distinct-value listers: just an optional row cap
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default, deserialize_with = "lenient_limit")]
    pub limit: Option<i64>,
}

/// Accept a limit as a number or a numeric string; anything else (booleans,
/// garbage text, floats without an integer value) reads as absent.
fn lenient_limit<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::Number(n) => n.as_i64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }))
}

/// Resolve a requested limit against a default. Non-positive values fall
/// back to the default: SQLite reads a negative LIMIT as "no limit", which
/// would defeat the row cap.
pub fn effective_limit(requested: Option<i64>, default: i64) -> i64 {
    match requested {
        Some(n) if n > 0 => n,
        _ => default,
    }
}

/// Storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Path to the SQLite database file, or ":memory:"
    pub db_path: String,
}
