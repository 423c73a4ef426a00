//! Database state queries used by lab checks.
//!
//! Labels, relationship types and property keys cannot be Cypher parameters,
//! so they are interpolated into the query text through [`quote_identifier`].
//! Values are always bound as parameters.

use neo4rs::query;
use serde::{Deserialize, Serialize};

use crate::client::{GraphClient, GraphError};
use crate::param::Param;
use crate::record::Record;

/// Labels and properties of a single node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub labels: Vec<String>,
    pub properties: serde_json::Map<String, serde_json::Value>,
}

impl NodeRecord {
    pub fn property(&self, key: &str) -> Option<&serde_json::Value> {
        self.properties.get(key)
    }
}

/// Schema object kinds listed by `SHOW ...`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    Constraints,
    Indexes,
}

impl SchemaKind {
    fn keyword(self) -> &'static str {
        match self {
            Self::Constraints => "CONSTRAINTS",
            Self::Indexes => "INDEXES",
        }
    }
}

impl GraphClient {
    // ── Counts ───────────────────────────────────────────────────

    /// Count nodes, optionally restricted to one label.
    pub async fn count_nodes(&self, label: Option<&str>) -> Result<i64, GraphError> {
        self.count(&count_nodes_cypher(label), &[]).await
    }

    /// Count relationships, optionally restricted to one type.
    pub async fn count_relationships(&self, rel_type: Option<&str>) -> Result<i64, GraphError> {
        self.count(&count_relationships_cypher(rel_type), &[]).await
    }

    // ── Existence ────────────────────────────────────────────────

    /// Whether a node with `label` matches every property.
    pub async fn node_exists(
        &self,
        label: &str,
        properties: &[(String, Param)],
    ) -> Result<bool, GraphError> {
        let (cypher, bound) = match_node_cypher(label, properties, "count(n) AS cnt");
        Ok(self.count(&cypher, &bound).await? > 0)
    }

    /// First node with `label` matching every property.
    pub async fn get_node(
        &self,
        label: &str,
        properties: &[(String, Param)],
    ) -> Result<Option<NodeRecord>, GraphError> {
        let (cypher, bound) = match_node_cypher(
            label,
            properties,
            "labels(n) AS labels, properties(n) AS props LIMIT 1",
        );
        let q = crate::param::bind_all(query(&cypher), &bound);

        let Some(row) = self.query_one(q).await? else {
            return Ok(None);
        };
        let record = Record::from_row(&row)?;
        let labels = serde_json::from_value(record.value("labels").clone())
            .map_err(|e| GraphError::Serialization(format!("Failed to read labels: {e}")))?;
        let properties = match record.value("props") {
            serde_json::Value::Object(map) => map.clone(),
            _ => serde_json::Map::new(),
        };
        Ok(Some(NodeRecord { labels, properties }))
    }

    /// Whether at least one `(start)-[rel_type]->(end)` relationship exists.
    pub async fn relationship_exists(
        &self,
        start_label: &str,
        rel_type: &str,
        end_label: &str,
    ) -> Result<bool, GraphError> {
        let cypher = relationship_exists_cypher(start_label, rel_type, end_label);
        Ok(self.count(&cypher, &[]).await? > 0)
    }

    // ── Schema ───────────────────────────────────────────────────

    pub async fn constraint_exists(&self, name: &str) -> Result<bool, GraphError> {
        self.schema_exists(SchemaKind::Constraints, name).await
    }

    pub async fn index_exists(&self, name: &str) -> Result<bool, GraphError> {
        self.schema_exists(SchemaKind::Indexes, name).await
    }

    /// Count constraints, optionally only those whose name contains a fragment.
    pub async fn count_constraints(&self, name_fragment: Option<&str>) -> Result<i64, GraphError> {
        self.count_schema(SchemaKind::Constraints, name_fragment).await
    }

    /// Count indexes, optionally only those whose name contains a fragment.
    pub async fn count_indexes(&self, name_fragment: Option<&str>) -> Result<i64, GraphError> {
        self.count_schema(SchemaKind::Indexes, name_fragment).await
    }

    /// Names of every constraint, for dropping them on reset.
    pub async fn constraint_names(&self) -> Result<Vec<String>, GraphError> {
        self.string_column("SHOW CONSTRAINTS YIELD name RETURN name", "name")
            .await
    }

    // ── Catalog ──────────────────────────────────────────────────

    /// Every node label in use.
    pub async fn labels(&self) -> Result<Vec<String>, GraphError> {
        self.string_column("CALL db.labels()", "label").await
    }

    /// Every relationship type in use.
    pub async fn relationship_types(&self) -> Result<Vec<String>, GraphError> {
        self.string_column("CALL db.relationshipTypes()", "relationshipType")
            .await
    }

    // ── Helpers ──────────────────────────────────────────────────

    async fn count(&self, cypher: &str, params: &[(String, Param)]) -> Result<i64, GraphError> {
        let q = crate::param::bind_all(query(cypher), params);
        count_from_row(self.query_one(q).await?.as_ref())
    }

    async fn schema_exists(&self, kind: SchemaKind, name: &str) -> Result<bool, GraphError> {
        let cypher = format!(
            "SHOW {} YIELD name WHERE name = $name RETURN count(*) AS cnt",
            kind.keyword()
        );
        let params = [("name".to_string(), Param::from(name))];
        Ok(self.count(&cypher, &params).await? > 0)
    }

    async fn count_schema(
        &self,
        kind: SchemaKind,
        name_fragment: Option<&str>,
    ) -> Result<i64, GraphError> {
        let cypher = count_schema_cypher(kind, name_fragment.is_some());
        let params: Vec<(String, Param)> = name_fragment
            .map(|f| vec![("fragment".to_string(), Param::from(f))])
            .unwrap_or_default();
        self.count(&cypher, &params).await
    }

    async fn string_column(&self, cypher: &str, column: &str) -> Result<Vec<String>, GraphError> {
        let rows = self.query_rows(query(cypher)).await?;
        let mut values = Vec::with_capacity(rows.len());
        for row in rows {
            let v: String = row.get(column).map_err(|e| GraphError::MissingColumn {
                column: column.to_string(),
                reason: e.to_string(),
            })?;
            values.push(v);
        }
        Ok(values)
    }
}

/// The `cnt` column of a count query. No row means nothing matched; a
/// missing or non-integer column is an error, never a zero.
fn count_from_row(row: Option<&neo4rs::Row>) -> Result<i64, GraphError> {
    match row {
        Some(row) => row.get::<i64>("cnt").map_err(|e| GraphError::MissingColumn {
            column: "cnt".to_string(),
            reason: e.to_string(),
        }),
        None => Ok(0),
    }
}

// ── Cypher Builders ──────────────────────────────────────────────

/// Backtick-quote a label, type or key unless it is a plain identifier.
pub fn quote_identifier(name: &str) -> String {
    if is_plain_identifier(name) {
        name.to_string()
    } else {
        format!("`{}`", name.replace('`', "``"))
    }
}

fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

pub fn count_nodes_cypher(label: Option<&str>) -> String {
    match label {
        Some(l) => format!("MATCH (n:{}) RETURN count(n) AS cnt", quote_identifier(l)),
        None => "MATCH (n) RETURN count(n) AS cnt".to_string(),
    }
}

pub fn count_relationships_cypher(rel_type: Option<&str>) -> String {
    match rel_type {
        Some(t) => format!(
            "MATCH ()-[r:{}]->() RETURN count(r) AS cnt",
            quote_identifier(t)
        ),
        None => "MATCH ()-[r]->() RETURN count(r) AS cnt".to_string(),
    }
}

pub fn relationship_exists_cypher(start_label: &str, rel_type: &str, end_label: &str) -> String {
    format!(
        "MATCH (:{})-[r:{}]->(:{}) RETURN count(r) AS cnt",
        quote_identifier(start_label),
        quote_identifier(rel_type),
        quote_identifier(end_label)
    )
}

pub fn count_schema_cypher(kind: SchemaKind, filtered: bool) -> String {
    if filtered {
        format!(
            "SHOW {} YIELD name WHERE name CONTAINS $fragment RETURN count(*) AS cnt",
            kind.keyword()
        )
    } else {
        format!("SHOW {} YIELD name RETURN count(*) AS cnt", kind.keyword())
    }
}

/// `MATCH (n:Label) WHERE n.k = $k AND ... RETURN <returns>`, plus the
/// parameters under the names the query refers to.
///
/// Keys that are not plain identifiers are bound as `$p0`, `$p1`, ...
pub fn match_node_cypher(
    label: &str,
    properties: &[(String, Param)],
    returns: &str,
) -> (String, Vec<(String, Param)>) {
    let mut clauses = Vec::with_capacity(properties.len());
    let mut bound = Vec::with_capacity(properties.len());

    for (i, (key, value)) in properties.iter().enumerate() {
        let param_name = if is_plain_identifier(key) {
            key.clone()
        } else {
            format!("p{i}")
        };
        clauses.push(format!("n.{} = ${param_name}", quote_identifier(key)));
        bound.push((param_name, value.clone()));
    }

    let where_clause = if clauses.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", clauses.join(" AND "))
    };

    (
        format!(
            "MATCH (n:{}){where_clause} RETURN {returns}",
            quote_identifier(label)
        ),
        bound,
    )
}
