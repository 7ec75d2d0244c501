//! Search filter compilation
//!
//! Turns a [`SearchQuery`] intent into an inert [`QueryPlan`]: predicate
//! fragments carrying `?N` numbered placeholders, plus the values those
//! placeholders bind. Compilation is a fold over a fixed, ordered table of
//! criterion descriptors, so clause emission order and placeholder numbering
//! are deterministic by construction - there is no mutable counter to get
//! out of step.
//!
//! User-supplied values only ever travel through the binding list. Nothing
//! from the intent is interpolated into clause text.

use rusqlite::types::{ToSql, ToSqlOutput, Value as SqlValue};

use crate::types::{effective_limit, SearchQuery, DEFAULT_SEARCH_LIMIT};

/// Marker substituted with the placeholder index when a clause is emitted
const PLACEHOLDER: &str = "{p}";

/// A value bound to a plan placeholder. Inert and comparable, unlike a bare
/// `dyn ToSql`.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundValue {
    Text(String),
    Int(i64),
    Real(f64),
    Null,
}

impl ToSql for BoundValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            BoundValue::Text(s) => s.to_sql(),
            BoundValue::Int(i) => i.to_sql(),
            BoundValue::Real(f) => f.to_sql(),
            BoundValue::Null => Ok(ToSqlOutput::Owned(SqlValue::Null)),
        }
    }
}

/// How a criterion's raw value becomes its bound value
#[derive(Debug, Clone, Copy)]
enum Matching {
    /// Case-insensitive substring: value is wrapped in `%` wildcards
    Substring,
    /// Exact equality, no wildcards
    Exact,
}

/// One optional criterion: where to read it from the intent and the
/// predicate it contributes. A clause may reference `{p}` more than once;
/// both sides then share a single placeholder and a single binding.
struct Criterion {
    value: fn(&SearchQuery) -> Option<&str>,
    clause: &'static str,
    matching: Matching,
}

fn text_query(intent: &SearchQuery) -> Option<&str> {
    intent.query.as_deref()
}

fn merchant(intent: &SearchQuery) -> Option<&str> {
    intent.merchant.as_deref()
}

fn category(intent: &SearchQuery) -> Option<&str> {
    intent.category.as_deref()
}

fn country(intent: &SearchQuery) -> Option<&str> {
    intent.country.as_deref()
}

/// The recognized criteria, in emission order. SQLite `LIKE` is
/// case-insensitive for ASCII, matching the original contract.
const CRITERIA: &[Criterion] = &[
    Criterion {
        value: text_query,
        clause: "(title LIKE ?{p} OR description LIKE ?{p})",
        matching: Matching::Substring,
    },
    Criterion {
        value: merchant,
        clause: "(merchant_name LIKE ?{p} OR merchant_slug LIKE ?{p})",
        matching: Matching::Substring,
    },
    Criterion {
        value: category,
        clause: "category_slug LIKE ?{p}",
        matching: Matching::Substring,
    },
    Criterion {
        value: country,
        clause: "country = ?{p}",
        matching: Matching::Exact,
    },
];

/// An inert, parameterized query plan: clause fragments, their bound
/// values, and the row cap. Execution belongs to `queries`.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    predicates: Vec<String>,
    bindings: Vec<BoundValue>,
    limit: i64,
}

/// Compile a search intent into a query plan.
///
/// Each present, non-blank criterion appends exactly one predicate and one
/// binding; placeholder numbers run contiguously from 1 in emission order.
pub fn compile(intent: &SearchQuery) -> QueryPlan {
    let (predicates, bindings) = CRITERIA.iter().fold(
        (Vec::new(), Vec::new()),
        |(mut predicates, mut bindings), criterion| {
            let raw = (criterion.value)(intent)
                .map(str::trim)
                .filter(|s| !s.is_empty());
            if let Some(raw) = raw {
                let index = bindings.len() + 1;
                predicates.push(criterion.clause.replace(PLACEHOLDER, &index.to_string()));
                bindings.push(match criterion.matching {
                    Matching::Substring => BoundValue::Text(format!("%{}%", raw)),
                    Matching::Exact => BoundValue::Text(raw.to_string()),
                });
            }
            (predicates, bindings)
        },
    );

    QueryPlan {
        predicates,
        bindings,
        limit: effective_limit(intent.limit, DEFAULT_SEARCH_LIMIT),
    }
}

impl QueryPlan {
    pub fn predicates(&self) -> &[String] {
        &self.predicates
    }

    pub fn bindings(&self) -> &[BoundValue] {
        &self.bindings
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// The WHERE clause: the base predicate conjoined with each compiled
    /// predicate
    pub fn where_clause(&self) -> String {
        let mut sql = String::from("WHERE 1=1");
        for predicate in &self.predicates {
            sql.push_str(" AND ");
            sql.push_str(predicate);
        }
        sql
    }

    /// Placeholder index for the row cap: the next one after the bindings
    pub fn limit_placeholder(&self) -> usize {
        self.bindings.len() + 1
    }

    /// Full parameter list in placeholder order: bindings, then the cap
    pub fn params(&self) -> Vec<&dyn ToSql> {
        self.bindings
            .iter()
            .map(|b| b as &dyn ToSql)
            .chain(std::iter::once(&self.limit as &dyn ToSql))
            .collect()
    }
}
