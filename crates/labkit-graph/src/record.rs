//! Owned query rows with JSON cells.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::{GraphClient, GraphError};

/// One result row keyed by column name.
///
/// Temporal values do not survive the conversion, so queries return them
/// through `toString()`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(BTreeMap<String, Value>);

impl Record {
    pub fn from_row(row: &neo4rs::Row) -> Result<Self, GraphError> {
        row.to::<BTreeMap<String, Value>>()
            .map(Self)
            .map_err(|e| GraphError::Serialization(format!("Failed to read row: {e}")))
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }

    /// Column value, with `null` standing in for a missing column.
    pub fn value(&self, column: &str) -> &Value {
        self.0.get(column).unwrap_or(&Value::Null)
    }

    pub fn i64(&self, column: &str) -> Option<i64> {
        self.value(column).as_i64()
    }

    /// Numeric column as a float; integers widen.
    pub fn f64(&self, column: &str) -> Option<f64> {
        self.value(column).as_f64()
    }

    pub fn str(&self, column: &str) -> Option<&str> {
        self.value(column).as_str()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl GraphClient {
    /// Execute a query and convert every row into a `Record`.
    pub async fn query_records(&self, query: neo4rs::Query) -> Result<Vec<Record>, GraphError> {
        self.query_rows(query)
            .await?
            .iter()
            .map(Record::from_row)
            .collect()
    }
}
