//! Database migrations for Coupon Hub

use rusqlite::Connection;

use crate::error::Result;

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Run all migrations
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    let current_version: i32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);

    if current_version < SCHEMA_VERSION {
        migrate_v1(conn)?;
    }

    Ok(())
}

/// Initial schema (v1)
fn migrate_v1(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        -- Coupons table: the sole persisted entity. Merchant and category
        -- are denormalized string fields, not separate tables.
        CREATE TABLE IF NOT EXISTS coupons (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            description TEXT NOT NULL,
            code TEXT,
            url TEXT,
            price REAL,
            currency TEXT,
            country TEXT,
            merchant_name TEXT NOT NULL,
            merchant_slug TEXT,
            category_slug TEXT,
            source_key TEXT,
            source_kind TEXT,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        -- One index per filterable column, plus the ordering column
        CREATE INDEX IF NOT EXISTS idx_coupons_merchant_name ON coupons(merchant_name);
        CREATE INDEX IF NOT EXISTS idx_coupons_category_slug ON coupons(category_slug);
        CREATE INDEX IF NOT EXISTS idx_coupons_country ON coupons(country);
        CREATE INDEX IF NOT EXISTS idx_coupons_created_at ON coupons(created_at);

        INSERT INTO schema_version (version) VALUES (1);
        "#,
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();

        let version: i32 = conn
            .query_row("SELECT MAX(version) FROM schema_version", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(version, SCHEMA_VERSION);
    }

    #[test]
    fn test_coupons_table_exists() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();

        let count: i32 = conn
            .query_row("SELECT COUNT(*) FROM coupons", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}
