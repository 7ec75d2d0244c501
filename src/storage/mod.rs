//! Storage engine for Coupon Hub
//!
//! Handles SQLite database operations, WAL mode, and schema management.
//! Query and insertion *plans* are built by [`filter`] and [`writer`];
//! [`queries`] executes them against a connection.

mod connection;
mod migrations;

pub mod filter;
pub mod queries;
pub mod writer;

pub use connection::Storage;
