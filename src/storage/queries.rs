//! Database queries for coupon operations
//!
//! Executes the plans built by `filter` and `writer` against a connection,
//! and derives the distinct-value projections. All statements are
//! parameterized; no caller value ever reaches SQL text.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};

use super::filter;
use super::writer;
use crate::error::{CouponHubError, Result};
use crate::types::{
    effective_limit, Coupon, CreationPayload, ListQuery, Merchant, SearchQuery, DEFAULT_LIST_LIMIT,
};

/// Column list shared by every coupon SELECT
const COUPON_COLUMNS: &str = "id, title, description, code, url, price, currency, country, \
     merchant_name, merchant_slug, category_slug, source_key, source_kind, \
     created_at, updated_at";

fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

/// Parse a coupon from a database row
pub fn coupon_from_row(row: &Row) -> rusqlite::Result<Coupon> {
    let created_at: String = row.get("created_at")?;
    let updated_at: String = row.get("updated_at")?;

    Ok(Coupon {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        code: row.get("code")?,
        url: row.get("url")?,
        price: row.get("price")?,
        currency: row.get("currency")?,
        country: row.get("country")?,
        merchant_name: row.get("merchant_name")?,
        merchant_slug: row.get("merchant_slug")?,
        category_slug: row.get("category_slug")?,
        source_key: row.get("source_key")?,
        source_kind: row.get("source_kind")?,
        created_at: parse_timestamp(&created_at),
        updated_at: parse_timestamp(&updated_at),
    })
}

/// Search coupons: compile the intent and execute the resulting plan,
/// most recent first
pub fn search_coupons(conn: &Connection, intent: &SearchQuery) -> Result<Vec<Coupon>> {
    let plan = filter::compile(intent);
    let sql = format!(
        "SELECT {} FROM coupons {} ORDER BY created_at DESC LIMIT ?{}",
        COUPON_COLUMNS,
        plan.where_clause(),
        plan.limit_placeholder(),
    );

    let mut stmt = conn.prepare_cached(&sql)?;
    let bound = plan.params();
    let rows = stmt.query_map(bound.as_slice(), coupon_from_row)?;
    rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
}

/// Fetch a coupon by id; a lookup miss is `NotFound`, anything else is a
/// storage failure
pub fn get_coupon(conn: &Connection, id: &str) -> Result<Coupon> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {} FROM coupons WHERE id = ?1",
        COUPON_COLUMNS
    ))?;

    stmt.query_row(params![id], coupon_from_row)
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => CouponHubError::NotFound(id.to_string()),
            other => other.into(),
        })
}

/// Insert a validated payload and return the materialized stored record,
/// server-assigned id and timestamps included
pub fn insert_coupon(conn: &Connection, payload: &CreationPayload) -> Result<Coupon> {
    let plan = writer::plan_payload(payload);
    let bound = plan.params();
    conn.execute(&plan.sql(), bound.as_slice())?;
    get_coupon(conn, plan.id())
}

/// Distinct merchant name/slug pairs, lexicographically ordered by name
pub fn list_merchants(conn: &Connection, intent: &ListQuery) -> Result<Vec<Merchant>> {
    let limit = effective_limit(intent.limit, DEFAULT_LIST_LIMIT);
    let mut stmt = conn.prepare_cached(
        "SELECT DISTINCT merchant_name, merchant_slug FROM coupons \
         ORDER BY merchant_name LIMIT ?1",
    )?;
    let rows = stmt.query_map(params![limit], |row| {
        Ok(Merchant {
            name: row.get(0)?,
            slug: row.get(1)?,
        })
    })?;
    rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
}

/// Distinct category slugs, lexicographically ordered. Rows without a
/// category are excluded; merchants need no such exclusion since the name
/// is always present.
pub fn list_categories(conn: &Connection, intent: &ListQuery) -> Result<Vec<String>> {
    let limit = effective_limit(intent.limit, DEFAULT_LIST_LIMIT);
    let mut stmt = conn.prepare_cached(
        "SELECT DISTINCT category_slug FROM coupons \
         WHERE category_slug IS NOT NULL ORDER BY category_slug LIMIT ?1",
    )?;
    let rows = stmt.query_map(params![limit], |row| row.get(0))?;
    rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
}
