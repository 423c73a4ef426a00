//! Check definitions and pure evaluation of query results.
//!
//! A check is data: what to ask Neo4j and what the answer must look like.
//! Executing a check against a live database lives in [`crate::runner`].

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

use labkit_graph::{Param, Plugin, Record};
use serde::Serialize;
use serde_json::Value;

// ── Outcome ──────────────────────────────────────────────────────

/// Result of executing one check.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "lowercase")]
pub enum Outcome {
    Passed,
    Failed(String),
    Skipped(String),
    /// Passed, with something worth reporting.
    Warned(String),
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Passed => "PASS",
            Self::Failed(_) => "FAIL",
            Self::Skipped(_) => "SKIP",
            Self::Warned(_) => "WARN",
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Passed => None,
            Self::Failed(r) | Self::Skipped(r) | Self::Warned(r) => Some(r),
        }
    }
}

impl From<Result<(), String>> for Outcome {
    fn from(result: Result<(), String>) -> Self {
        match result {
            Ok(()) => Self::Passed,
            Err(reason) => Self::Failed(reason),
        }
    }
}

// ── Check ────────────────────────────────────────────────────────

/// One named assertion against database state.
#[derive(Debug, Clone)]
pub struct Check {
    pub name: String,
    pub kind: CheckKind,
}

#[derive(Debug, Clone)]
pub enum CheckKind {
    /// A trivial query must round-trip.
    Connectivity,
    MinNodes {
        label: Option<&'static str>,
        min: i64,
    },
    MinRelationships {
        rel_type: Option<&'static str>,
        min: i64,
    },
    NodeExists {
        label: &'static str,
        properties: Vec<(String, Param)>,
    },
    RelationshipExists {
        start: &'static str,
        rel_type: &'static str,
        end: &'static str,
    },
    MinConstraints {
        name_fragment: Option<&'static str>,
        min: i64,
    },
    MinIndexes {
        name_fragment: Option<&'static str>,
        min: i64,
    },
    /// Absent labels fail the check only when `required`.
    LabelsPresent {
        labels: Vec<&'static str>,
        required: bool,
    },
    Query(QuerySpec),
    /// A query that needs a server plugin. A missing plugin is not a failure.
    Optional {
        query: QuerySpec,
        plugin: Plugin,
    },
    /// Unmet expectations are reported as warnings, not failures.
    Advisory(QuerySpec),
    /// Runs a query and logs the first row.
    Informational {
        cypher: &'static str,
    },
    /// Runs a query under a wall-time bound.
    Timed {
        cypher: &'static str,
        max_ms: u64,
        require_rows: bool,
    },
    /// MERGE with ON CREATE / ON MATCH on a throwaway node.
    MergeUpsert,
    /// Create and delete a throwaway node in committed transactions.
    WriteTransaction,
    /// A failing transaction must leave nothing behind.
    TransactionRollback,
    /// Malformed Cypher must be rejected.
    RejectsInvalidCypher,
    /// Steps run in order over throwaway nodes carrying a
    /// [`SANDBOX_LABELS`] label, which are removed before and after.
    Sandbox(Vec<QuerySpec>),
    /// Parameterized round-trips issued concurrently through the pool.
    PooledQueries { sessions: i64 },
    /// `<plugin>.version()` must answer. A missing plugin only warns.
    PluginVersion(Plugin),
    /// Logs totals and per-label counts. Always passes.
    ///
    /// An empty label list covers every label in the database.
    Summary {
        labels: Vec<&'static str>,
    },
}

impl Check {
    pub fn new(name: impl Into<String>, kind: CheckKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn connectivity() -> Self {
        Self::new("database connection", CheckKind::Connectivity)
    }

    pub fn total_nodes(min: i64) -> Self {
        Self::new(
            format!("at least {min} nodes"),
            CheckKind::MinNodes { label: None, min },
        )
    }

    pub fn total_relationships(min: i64) -> Self {
        Self::new(
            format!("at least {min} relationships"),
            CheckKind::MinRelationships {
                rel_type: None,
                min,
            },
        )
    }

    pub fn min_nodes(label: &'static str, min: i64) -> Self {
        Self::new(
            format!("at least {min} {label} nodes"),
            CheckKind::MinNodes {
                label: Some(label),
                min,
            },
        )
    }

    pub fn min_relationships(rel_type: &'static str, min: i64) -> Self {
        Self::new(
            format!("at least {min} {rel_type} relationships"),
            CheckKind::MinRelationships {
                rel_type: Some(rel_type),
                min,
            },
        )
    }

    pub fn node_exists(label: &'static str, key: &str, value: impl Into<Param>) -> Self {
        let value = value.into();
        Self::new(
            format!("{label} {key}={value} exists"),
            CheckKind::NodeExists {
                label,
                properties: vec![(key.to_string(), value)],
            },
        )
    }

    pub fn relationship_exists(
        start: &'static str,
        rel_type: &'static str,
        end: &'static str,
    ) -> Self {
        Self::new(
            format!("({start})-[:{rel_type}]->({end}) exists"),
            CheckKind::RelationshipExists {
                start,
                rel_type,
                end,
            },
        )
    }

    pub fn min_constraints(name_fragment: Option<&'static str>, min: i64) -> Self {
        let name = match name_fragment {
            Some(f) => format!("constraint named like '{f}'"),
            None => format!("at least {min} constraints"),
        };
        Self::new(name, CheckKind::MinConstraints { name_fragment, min })
    }

    pub fn min_indexes(name_fragment: Option<&'static str>, min: i64) -> Self {
        let name = match name_fragment {
            Some(f) => format!("index named like '{f}'"),
            None => format!("at least {min} indexes"),
        };
        Self::new(name, CheckKind::MinIndexes { name_fragment, min })
    }

    pub fn labels_present(labels: Vec<&'static str>, required: bool) -> Self {
        let name = if required {
            "core labels present"
        } else {
            "analytics labels present"
        };
        Self::new(name, CheckKind::LabelsPresent { labels, required })
    }

    pub fn query(name: impl Into<String>, spec: QuerySpec) -> Self {
        Self::new(name, CheckKind::Query(spec))
    }

    pub fn optional(name: impl Into<String>, plugin: Plugin, query: QuerySpec) -> Self {
        Self::new(name, CheckKind::Optional { query, plugin })
    }

    pub fn advisory(name: impl Into<String>, spec: QuerySpec) -> Self {
        Self::new(name, CheckKind::Advisory(spec))
    }

    pub fn informational(name: impl Into<String>, cypher: &'static str) -> Self {
        Self::new(name, CheckKind::Informational { cypher })
    }

    pub fn timed(
        name: impl Into<String>,
        cypher: &'static str,
        max_ms: u64,
        require_rows: bool,
    ) -> Self {
        Self::new(
            name,
            CheckKind::Timed {
                cypher,
                max_ms,
                require_rows,
            },
        )
    }

    pub fn summary(labels: Vec<&'static str>) -> Self {
        Self::new("summary", CheckKind::Summary { labels })
    }

    pub fn sandbox(name: impl Into<String>, steps: Vec<QuerySpec>) -> Self {
        Self::new(name, CheckKind::Sandbox(steps))
    }

    pub fn pooled_queries(sessions: i64) -> Self {
        Self::new(
            format!("{sessions} pooled sessions"),
            CheckKind::PooledQueries { sessions },
        )
    }

    pub fn plugin_version(plugin: Plugin) -> Self {
        Self::new(
            format!("{plugin} plugin available"),
            CheckKind::PluginVersion(plugin),
        )
    }
}

/// Labels reserved for check-owned data. Anything carrying one of them is
/// deleted around every sandbox check.
pub const SANDBOX_LABELS: &[&str] = &["TestNode", "TestCustomer", "TestPolicy"];

// ── Query Expectations ───────────────────────────────────────────

/// Expected number of result rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowCount {
    AtLeast(usize),
    Exactly(usize),
    Any,
}

impl RowCount {
    pub fn check(self, actual: usize) -> Result<(), String> {
        match self {
            Self::AtLeast(n) if actual < n => {
                Err(format!("expected at least {n} rows, got {actual}"))
            }
            Self::Exactly(n) if actual != n => Err(format!("expected {n} rows, got {actual}")),
            _ => Ok(()),
        }
    }
}

/// Assertion over result columns.
///
/// The per-row variants must hold for every row. `Distinct`, `SumGt` and
/// `ColumnSequence` look at the whole result.
#[derive(Debug, Clone, PartialEq)]
pub enum Expect {
    Eq(&'static str, Value),
    OneOf(&'static str, Vec<Value>),
    NotNull(&'static str),
    Gt(&'static str, f64),
    Ge(&'static str, f64),
    Lt(&'static str, f64),
    Le(&'static str, f64),
    ContainsText(&'static str, &'static str),
    NonEmptyList(&'static str),
    /// Length of the list column equals the integer in the other column.
    ListLenEquals(&'static str, &'static str),
    /// First column is at least the second.
    GeColumn(&'static str, &'static str),
    /// Inclusive bounds; numbers compare numerically, strings lexically.
    Between(&'static str, Value, Value),
    Distinct(&'static str),
    SumGt(&'static str, f64),
    ColumnSequence(&'static str, Vec<Value>),
}

impl Expect {
    pub fn check(&self, rows: &[Record]) -> Result<(), String> {
        match self {
            Self::Distinct(col) => {
                let mut seen = HashSet::new();
                for row in rows {
                    let key = row.value(col).to_string();
                    if !seen.insert(key.clone()) {
                        return Err(format!("column `{col}` repeats value {key}"));
                    }
                }
                Ok(())
            }
            Self::SumGt(col, bound) => {
                let mut sum = 0.0;
                for row in rows {
                    sum += number(row, col)?;
                }
                if sum > *bound {
                    Ok(())
                } else {
                    Err(format!("sum of `{col}` is {sum}, expected > {bound}"))
                }
            }
            Self::ColumnSequence(col, expected) => {
                let actual: Vec<&Value> = rows.iter().map(|r| r.value(col)).collect();
                let matches = actual.len() == expected.len()
                    && actual.iter().zip(expected).all(|(a, e)| values_equal(a, e));
                if matches {
                    Ok(())
                } else {
                    Err(format!(
                        "column `{col}` is {}, expected {}",
                        Value::Array(actual.into_iter().cloned().collect()),
                        Value::Array(expected.clone())
                    ))
                }
            }
            _ => {
                for (i, row) in rows.iter().enumerate() {
                    self.check_row(row).map_err(|e| format!("row {}: {e}", i + 1))?;
                }
                Ok(())
            }
        }
    }

    fn check_row(&self, row: &Record) -> Result<(), String> {
        match self {
            Self::Eq(col, expected) => {
                let actual = row.value(col);
                if values_equal(actual, expected) {
                    Ok(())
                } else {
                    Err(format!("`{col}` is {actual}, expected {expected}"))
                }
            }
            Self::OneOf(col, allowed) => {
                let actual = row.value(col);
                if allowed.iter().any(|v| values_equal(actual, v)) {
                    Ok(())
                } else {
                    Err(format!(
                        "`{col}` is {actual}, expected one of {}",
                        Value::Array(allowed.clone())
                    ))
                }
            }
            Self::NotNull(col) => match row.get(col) {
                Some(v) if !v.is_null() => Ok(()),
                _ => Err(format!("`{col}` is null")),
            },
            Self::Gt(col, bound) => compare_number(row, col, *bound, ">", |a, b| a > b),
            Self::Ge(col, bound) => compare_number(row, col, *bound, ">=", |a, b| a >= b),
            Self::Lt(col, bound) => compare_number(row, col, *bound, "<", |a, b| a < b),
            Self::Le(col, bound) => compare_number(row, col, *bound, "<=", |a, b| a <= b),
            Self::ContainsText(col, needle) => match row.str(col) {
                Some(text) if text.contains(needle) => Ok(()),
                _ => Err(format!(
                    "`{col}` is {}, expected text containing {needle:?}",
                    row.value(col)
                )),
            },
            Self::NonEmptyList(col) => match row.value(col) {
                Value::Array(items) if !items.is_empty() => Ok(()),
                other => Err(format!("`{col}` is {other}, expected a non-empty list")),
            },
            Self::ListLenEquals(list_col, count_col) => {
                let len = match row.value(list_col) {
                    Value::Array(items) => items.len(),
                    other => return Err(format!("`{list_col}` is {other}, expected a list")),
                };
                let count = number(row, count_col)?;
                if (len as f64 - count).abs() < f64::EPSILON {
                    Ok(())
                } else {
                    Err(format!(
                        "`{count_col}` is {count}, but `{list_col}` has {len} items"
                    ))
                }
            }
            Self::GeColumn(a, b) => {
                let (x, y) = (number(row, a)?, number(row, b)?);
                if x >= y {
                    Ok(())
                } else {
                    Err(format!("`{a}` ({x}) is less than `{b}` ({y})"))
                }
            }
            Self::Between(col, lo, hi) => {
                let actual = row.value(col);
                let above = matches!(
                    compare_values(actual, lo),
                    Some(Ordering::Greater | Ordering::Equal)
                );
                let below = matches!(
                    compare_values(actual, hi),
                    Some(Ordering::Less | Ordering::Equal)
                );
                if above && below {
                    Ok(())
                } else {
                    Err(format!("`{col}` is {actual}, expected between {lo} and {hi}"))
                }
            }
            Self::Distinct(_) | Self::SumGt(..) | Self::ColumnSequence(..) => Ok(()),
        }
    }
}

impl fmt::Display for Expect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eq(c, v) => write!(f, "{c} = {v}"),
            Self::OneOf(c, vs) => write!(f, "{c} in {}", Value::Array(vs.clone())),
            Self::NotNull(c) => write!(f, "{c} not null"),
            Self::Gt(c, b) => write!(f, "{c} > {b}"),
            Self::Ge(c, b) => write!(f, "{c} >= {b}"),
            Self::Lt(c, b) => write!(f, "{c} < {b}"),
            Self::Le(c, b) => write!(f, "{c} <= {b}"),
            Self::ContainsText(c, s) => write!(f, "{c} contains {s:?}"),
            Self::NonEmptyList(c) => write!(f, "{c} non-empty"),
            Self::ListLenEquals(l, c) => write!(f, "len({l}) = {c}"),
            Self::GeColumn(a, b) => write!(f, "{a} >= {b}"),
            Self::Between(c, lo, hi) => write!(f, "{lo} <= {c} <= {hi}"),
            Self::Distinct(c) => write!(f, "{c} distinct"),
            Self::SumGt(c, b) => write!(f, "sum({c}) > {b}"),
            Self::ColumnSequence(c, vs) => write!(f, "{c} = {}", Value::Array(vs.clone())),
        }
    }
}

/// A parameterized query and the shape its result must have.
#[derive(Debug, Clone)]
pub struct QuerySpec {
    pub cypher: &'static str,
    pub params: Vec<(String, Param)>,
    pub rows: RowCount,
    pub expects: Vec<Expect>,
}

impl QuerySpec {
    pub fn new(cypher: &'static str) -> Self {
        Self {
            cypher,
            params: Vec::new(),
            rows: RowCount::Any,
            expects: Vec::new(),
        }
    }

    /// A single-row count query whose `column` must reach `min`.
    pub fn count_at_least(cypher: &'static str, column: &'static str, min: i64) -> Self {
        Self::new(cypher)
            .at_least(1)
            .expect(Expect::Ge(column, min as f64))
    }

    pub fn at_least(mut self, n: usize) -> Self {
        self.rows = RowCount::AtLeast(n);
        self
    }

    pub fn exactly(mut self, n: usize) -> Self {
        self.rows = RowCount::Exactly(n);
        self
    }

    pub fn param(mut self, key: &str, value: impl Into<Param>) -> Self {
        self.params.push((key.to_string(), value.into()));
        self
    }

    pub fn expect(mut self, expect: Expect) -> Self {
        self.expects.push(expect);
        self
    }

    /// Check returned rows against the row count and every expectation.
    pub fn evaluate(&self, rows: &[Record]) -> Result<(), String> {
        self.rows.check(rows.len())?;
        for expect in &self.expects {
            expect.check(rows)?;
        }
        Ok(())
    }
}

// ── Value Helpers ────────────────────────────────────────────────

fn number(row: &Record, col: &str) -> Result<f64, String> {
    row.f64(col)
        .ok_or_else(|| format!("`{col}` is {}, expected a number", row.value(col)))
}

fn compare_number(
    row: &Record,
    col: &str,
    bound: f64,
    op: &str,
    cmp: impl Fn(f64, f64) -> bool,
) -> Result<(), String> {
    let actual = number(row, col)?;
    if cmp(actual, bound) {
        Ok(())
    } else {
        Err(format!("`{col}` is {actual}, expected {op} {bound}"))
    }
}

/// Numbers compare by value, so `720` equals `720.0`.
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) if a.is_number() && b.is_number() => x == y,
        _ => a == b,
    }
}

fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows(values: Value) -> Vec<Record> {
        values
            .as_array()
            .unwrap()
            .iter()
            .map(|row| {
                row.as_object()
                    .unwrap()
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_row_count() {
        assert!(RowCount::AtLeast(3).check(3).is_ok());
        assert_eq!(
            RowCount::AtLeast(3).check(2).unwrap_err(),
            "expected at least 3 rows, got 2"
        );
        assert!(RowCount::Exactly(5).check(4).is_err());
        assert!(RowCount::Any.check(0).is_ok());
    }

    #[test]
    fn test_customer_properties() {
        let spec = QuerySpec::new("MATCH ...")
            .exactly(1)
            .expect(Expect::Eq("first_name", json!("Sarah")))
            .expect(Expect::NotNull("email"))
            .expect(Expect::Eq("credit_score", json!(720)));

        let ok = rows(json!([
            {"first_name": "Sarah", "email": "sarah@example.com", "credit_score": 720.0}
        ]));
        assert!(spec.evaluate(&ok).is_ok());

        let missing_email = rows(json!([
            {"first_name": "Sarah", "email": null, "credit_score": 720}
        ]));
        assert_eq!(
            spec.evaluate(&missing_email).unwrap_err(),
            "row 1: `email` is null"
        );

        assert!(spec.evaluate(&[]).is_err());
    }

    #[test]
    fn test_numeric_bounds() {
        let data = rows(json!([{"premium": 1200.5}, {"premium": 0}]));
        let err = Expect::Gt("premium", 0.0).check(&data).unwrap_err();
        assert_eq!(err, "row 2: `premium` is 0, expected > 0");
        assert!(Expect::Ge("premium", 0.0).check(&data).is_ok());
        assert!(Expect::Le("premium", 10.0).check(&data).is_err());
        assert!(Expect::Lt("premium", 2000.0).check(&data).is_ok());

        let text = rows(json!([{"premium": "high"}]));
        assert!(Expect::Gt("premium", 0.0).check(&text).is_err());
    }

    #[test]
    fn test_one_of_and_contains() {
        let data = rows(json!([
            {"severity": "Minor", "customer_name": "Sarah Johnson"},
            {"severity": "Severe", "customer_name": "Michael Chen"}
        ]));
        let allowed = vec![json!("Minor"), json!("Moderate"), json!("Major"), json!("Severe")];
        assert!(Expect::OneOf("severity", allowed).check(&data).is_ok());
        assert!(Expect::OneOf("severity", vec![json!("Minor")]).check(&data).is_err());
        assert!(Expect::ContainsText("customer_name", " ").check(&data).is_ok());
        assert!(Expect::ContainsText("severity", " ").check(&data).is_err());
    }

    #[test]
    fn test_list_expectations() {
        let data = rows(json!([
            {"products": ["Auto", "Home"], "policy_count": 2},
            {"products": ["Life"], "policy_count": 1}
        ]));
        assert!(Expect::NonEmptyList("products").check(&data).is_ok());
        assert!(Expect::ListLenEquals("products", "policy_count")
            .check(&data)
            .is_ok());

        let mismatch = rows(json!([{"products": ["Auto"], "policy_count": 2}]));
        assert!(Expect::ListLenEquals("products", "policy_count")
            .check(&mismatch)
            .is_err());

        let empty = rows(json!([{"products": []}]));
        assert!(Expect::NonEmptyList("products").check(&empty).is_err());
    }

    #[test]
    fn test_column_comparison() {
        let data = rows(json!([
            {"total_policy_records": 4, "unique_policies": 3},
            {"total_policy_records": 2, "unique_policies": 2}
        ]));
        assert!(Expect::GeColumn("total_policy_records", "unique_policies")
            .check(&data)
            .is_ok());
        assert!(Expect::GeColumn("unique_policies", "total_policy_records")
            .check(&data)
            .is_err());
    }

    #[test]
    fn test_between_dates_as_text() {
        let data = rows(json!([{"incident_date": "2024-06-15"}, {"incident_date": "2024-07-31"}]));
        let window = Expect::Between("incident_date", json!("2024-06-01"), json!("2024-07-31"));
        assert!(window.check(&data).is_ok());

        let late = rows(json!([{"incident_date": "2024-08-01"}]));
        assert!(window.check(&late).is_err());

        let ages = rows(json!([{"age": 42}]));
        assert!(Expect::Between("age", json!(1), json!(119)).check(&ages).is_ok());
    }

    #[test]
    fn test_whole_result_expectations() {
        let data = rows(json!([
            {"tier": "Standard", "agent_count": 1, "value": 100},
            {"tier": "Preferred", "agent_count": 2, "value": 200},
            {"tier": "Standard", "agent_count": 0, "value": 300}
        ]));
        assert!(Expect::Distinct("tier").check(&data).is_err());
        assert!(Expect::Distinct("value").check(&data).is_ok());
        assert!(Expect::SumGt("agent_count", 2.0).check(&data).is_ok());
        assert!(Expect::SumGt("agent_count", 3.0).check(&data).is_err());
        assert!(
            Expect::ColumnSequence("value", vec![json!(100), json!(200), json!(300)])
                .check(&data)
                .is_ok()
        );
        assert!(Expect::ColumnSequence("value", vec![json!(100), json!(200)])
            .check(&data)
            .is_err());
    }

    #[test]
    fn test_count_at_least() {
        let spec = QuerySpec::count_at_least("MATCH ... RETURN count(*) AS cnt", "cnt", 10);
        assert!(spec.evaluate(&rows(json!([{"cnt": 12}]))).is_ok());
        assert!(spec.evaluate(&rows(json!([{"cnt": 9}]))).is_err());
        assert!(spec.evaluate(&[]).is_err());
    }

    #[test]
    fn test_outcome_from_result() {
        assert_eq!(Outcome::from(Ok(())), Outcome::Passed);
        assert_eq!(
            Outcome::from(Err("bad".to_string())),
            Outcome::Failed("bad".to_string())
        );
        assert!(Outcome::Failed("x".into()).is_failure());
        assert!(!Outcome::Warned("x".into()).is_failure());
        assert_eq!(Outcome::Skipped("gds".into()).label(), "SKIP");
    }

    #[test]
    fn test_outcome_serializes_with_status() {
        assert_eq!(
            serde_json::to_value(Outcome::Passed).unwrap(),
            json!({"status": "passed"})
        );
        assert_eq!(
            serde_json::to_value(Outcome::Failed("nope".into())).unwrap(),
            json!({"status": "failed", "reason": "nope"})
        );
    }
}
