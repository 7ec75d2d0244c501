//! Record writer: validated creation payloads into insertion plans
//!
//! The writer assigns the server-generated id and timestamps and lays out
//! one bound value per column, with `Null` standing in for every absent
//! optional. It never attempts partial insertion: a plan is a single
//! parameterized statement covering the full column list.

use chrono::Utc;
use rusqlite::types::ToSql;
use uuid::Uuid;

use super::filter::BoundValue;
use crate::error::Result;
use crate::types::{CouponDraft, CouponId, CreationPayload};

/// Ordered column list for a coupon insert; the plan binds exactly one
/// value per column
pub const INSERT_COLUMNS: &[&str] = &[
    "id",
    "title",
    "description",
    "code",
    "url",
    "price",
    "currency",
    "country",
    "merchant_name",
    "merchant_slug",
    "category_slug",
    "source_key",
    "source_kind",
    "created_at",
    "updated_at",
];

/// An inert single-row insertion plan
#[derive(Debug, Clone, PartialEq)]
pub struct InsertPlan {
    id: CouponId,
    values: Vec<BoundValue>,
}

impl InsertPlan {
    /// The server-assigned id the stored record will carry
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn values(&self) -> &[BoundValue] {
        &self.values
    }

    /// The parameterized INSERT statement for this plan
    pub fn sql(&self) -> String {
        let placeholders: Vec<String> = (1..=INSERT_COLUMNS.len())
            .map(|i| format!("?{}", i))
            .collect();
        format!(
            "INSERT INTO coupons ({}) VALUES ({})",
            INSERT_COLUMNS.join(", "),
            placeholders.join(", ")
        )
    }

    pub fn params(&self) -> Vec<&dyn ToSql> {
        self.values.iter().map(|v| v as &dyn ToSql).collect()
    }
}

fn text(value: &str) -> BoundValue {
    BoundValue::Text(value.to_string())
}

fn optional_text(value: &Option<String>) -> BoundValue {
    match value {
        Some(s) => BoundValue::Text(s.clone()),
        None => BoundValue::Null,
    }
}

/// Validate a raw draft and plan its insertion
pub fn plan_insert(draft: CouponDraft) -> Result<InsertPlan> {
    Ok(plan_payload(&draft.validate()?))
}

/// Plan insertion of an already-validated payload, assigning the
/// server-generated id and timestamps
pub fn plan_payload(payload: &CreationPayload) -> InsertPlan {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now().to_rfc3339();

    let values = vec![
        text(&id),
        text(&payload.title),
        text(&payload.description),
        optional_text(&payload.code),
        optional_text(&payload.url),
        payload
            .price
            .map(BoundValue::Real)
            .unwrap_or(BoundValue::Null),
        optional_text(&payload.currency),
        optional_text(&payload.country),
        text(&payload.merchant_name),
        optional_text(&payload.merchant_slug),
        optional_text(&payload.category_slug),
        optional_text(&payload.source_key),
        optional_text(&payload.source_kind),
        text(&now),
        text(&now),
    ];

    InsertPlan { id, values }
}
