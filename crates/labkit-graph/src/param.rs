//! Typed query parameters.

use std::fmt;

use neo4rs::Query;
use serde::{Deserialize, Serialize};

/// A value bound as a `$name` Cypher parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Param {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// For `IN $list` filters.
    TextList(Vec<String>),
}

impl Param {
    /// Attach this value to `query` under `key`.
    pub fn bind(&self, query: Query, key: &str) -> Query {
        match self {
            Self::Bool(v) => query.param(key, *v),
            Self::Int(v) => query.param(key, *v),
            Self::Float(v) => query.param(key, *v),
            Self::Text(v) => query.param(key, v.clone()),
            Self::TextList(v) => query.param(key, v.clone()),
        }
    }
}

/// Bind every `(key, value)` pair onto `query`.
pub fn bind_all(query: Query, params: &[(String, Param)]) -> Query {
    params
        .iter()
        .fold(query, |q, (key, value)| value.bind(q, key))
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v:?}"),
            Self::TextList(v) => write!(f, "{v:?}"),
        }
    }
}

impl From<&str> for Param {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Param {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Vec<String>> for Param {
    fn from(v: Vec<String>) -> Self {
        Self::TextList(v)
    }
}

impl From<&[&str]> for Param {
    fn from(v: &[&str]) -> Self {
        Self::TextList(v.iter().map(|s| s.to_string()).collect())
    }
}

impl From<i64> for Param {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Param {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for Param {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Param {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&Param> for serde_json::Value {
    fn from(p: &Param) -> Self {
        match p {
            Param::Bool(v) => serde_json::Value::Bool(*v),
            Param::Int(v) => serde_json::Value::from(*v),
            Param::Float(v) => serde_json::Value::from(*v),
            Param::Text(v) => serde_json::Value::String(v.clone()),
            Param::TextList(v) => serde_json::Value::from(v.clone()),
        }
    }
}
