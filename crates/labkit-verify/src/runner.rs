//! Suite runner.
//!
//! Labs run one at a time in course order, each bounded by the configured
//! timeout. Checks inside a lab run sequentially against one shared client.
//! Query errors never abort a lab: they become the outcome of the check.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use labkit_core::{Day, LabNumber, LabkitError};
use labkit_graph::param::bind_all;
use labkit_graph::{classify, GraphClient, GraphError, Param, Plugin, Record};
use neo4rs::query;
use uuid::Uuid;

use crate::catalog::{catalog, LabSuite};
use crate::check::{Check, CheckKind, Outcome, QuerySpec, SANDBOX_LABELS};
use crate::config::VerifyConfig;
use crate::error::Result;
use crate::report::{CheckResult, LabResult, RunReport};

// ── Selection ────────────────────────────────────────────────────

/// Which labs a run covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    All,
    Lab(LabNumber),
    Day(Day),
}

impl Selection {
    /// Build a selection from CLI numbers. Out-of-range values are rejected
    /// here, before anything connects to the database.
    pub fn from_args(lab: Option<u32>, day: Option<u32>) -> Result<Self> {
        match (lab, day) {
            (Some(_), Some(_)) => Err(LabkitError::Config(
                "--lab and --day are mutually exclusive".to_string(),
            )
            .into()),
            (Some(n), None) => Ok(Self::Lab(LabNumber::new(n)?)),
            (None, Some(d)) => Ok(Self::Day(Day::from_number(d)?)),
            (None, None) => Ok(Self::All),
        }
    }

    pub fn includes(self, lab: LabNumber) -> bool {
        match self {
            Self::All => true,
            Self::Lab(n) => n == lab,
            Self::Day(d) => lab.day() == d,
        }
    }

    /// Selected suites in ascending lab order.
    pub fn suites(self) -> Vec<LabSuite> {
        let mut suites: Vec<LabSuite> = catalog()
            .into_iter()
            .filter(|s| self.includes(s.number))
            .collect();
        suites.sort_by_key(|s| s.number);
        suites
    }
}

// ── Runner ───────────────────────────────────────────────────────

pub struct Runner<'a> {
    client: &'a GraphClient,
    lab_timeout: Duration,
}

impl<'a> Runner<'a> {
    pub fn new(client: &'a GraphClient, config: &VerifyConfig) -> Self {
        Self {
            client,
            lab_timeout: Duration::from_secs(config.lab_timeout_secs),
        }
    }

    /// Run every selected lab and collect the report.
    pub async fn run(&self, selection: Selection) -> RunReport {
        let mut report = RunReport::new();
        tracing::info!(run_id = %report.run_id, ?selection, "Verification run started");

        for suite in selection.suites() {
            let result = self.run_lab(&suite).await;
            report.labs.push(result);
        }

        report.finish();
        let totals = report.totals();
        tracing::info!(
            run_id = %report.run_id,
            labs = report.labs.len(),
            failed = totals.failed,
            success_rate = totals.success_rate(),
            "Verification run finished"
        );
        report
    }

    /// Run one lab under the timeout. Checks that finished before the
    /// deadline stay in the result.
    pub async fn run_lab(&self, suite: &LabSuite) -> LabResult {
        let lab = suite.number.0;
        tracing::info!(lab, title = suite.title, expected = suite.expected_state, "Lab started");

        let started = Instant::now();
        let mut checks = Vec::with_capacity(suite.checks.len());
        let finished =
            tokio::time::timeout(self.lab_timeout, self.run_checks(suite, &mut checks)).await;
        let error = match finished {
            Ok(()) => None,
            Err(_) => {
                let message = format!("timed out after {} seconds", self.lab_timeout.as_secs());
                tracing::error!(lab, completed = checks.len(), "Lab {message}");
                Some(message)
            }
        };

        let result = LabResult {
            lab: suite.number,
            title: suite.title.to_string(),
            day: suite.day(),
            duration_ms: elapsed_ms(started),
            error,
            checks,
        };
        tracing::info!(
            lab,
            passed = result.passed(),
            duration_ms = result.duration_ms,
            "Lab finished"
        );
        result
    }

    async fn run_checks(&self, suite: &LabSuite, results: &mut Vec<CheckResult>) {
        for check in &suite.checks {
            let started = Instant::now();
            let outcome = self.execute(suite.number, check).await;
            let duration_ms = elapsed_ms(started);

            match &outcome {
                Outcome::Failed(reason) => tracing::warn!(
                    lab = suite.number.0,
                    check = %check.name,
                    duration_ms,
                    reason = %reason,
                    "Check failed"
                ),
                other => tracing::info!(
                    lab = suite.number.0,
                    check = %check.name,
                    duration_ms,
                    outcome = other.label(),
                    "Check finished"
                ),
            }

            results.push(CheckResult {
                name: check.name.clone(),
                outcome,
                duration_ms,
            });
        }
    }

    /// Execute one check. Errors are folded into the outcome.
    pub async fn execute(&self, lab: LabNumber, check: &Check) -> Outcome {
        match self.try_execute(lab, &check.name, &check.kind).await {
            Ok(outcome) => outcome,
            Err(e) => error_outcome(&e),
        }
    }

    async fn try_execute(
        &self,
        lab: LabNumber,
        name: &str,
        kind: &CheckKind,
    ) -> std::result::Result<Outcome, GraphError> {
        let client = self.client;
        let outcome = match kind {
            CheckKind::Connectivity => {
                let rows = client
                    .query_records(query("RETURN 'connection test' AS test"))
                    .await?;
                match rows.first().and_then(|r| r.str("test")) {
                    Some("connection test") => Outcome::Passed,
                    _ => Outcome::Failed("connection test returned no row".to_string()),
                }
            }
            CheckKind::MinNodes { label, min } => {
                let count = client.count_nodes(*label).await?;
                let what = label.map_or("nodes".to_string(), |l| format!("{l} nodes"));
                at_least(count, *min, &what)
            }
            CheckKind::MinRelationships { rel_type, min } => {
                let count = client.count_relationships(*rel_type).await?;
                let what = rel_type.map_or("relationships".to_string(), |t| {
                    format!("{t} relationships")
                });
                at_least(count, *min, &what)
            }
            CheckKind::NodeExists { label, properties } => {
                if client.node_exists(label, properties).await? {
                    Outcome::Passed
                } else {
                    let props: Vec<String> =
                        properties.iter().map(|(k, v)| format!("{k}={v}")).collect();
                    Outcome::Failed(format!("no {label} node with {}", props.join(", ")))
                }
            }
            CheckKind::RelationshipExists {
                start,
                rel_type,
                end,
            } => {
                if client.relationship_exists(start, rel_type, end).await? {
                    Outcome::Passed
                } else {
                    Outcome::Failed(format!("no ({start})-[:{rel_type}]->({end}) relationship"))
                }
            }
            CheckKind::MinConstraints { name_fragment, min } => {
                let count = client.count_constraints(*name_fragment).await?;
                at_least(count, *min, &schema_what("constraints", *name_fragment))
            }
            CheckKind::MinIndexes { name_fragment, min } => {
                let count = client.count_indexes(*name_fragment).await?;
                at_least(count, *min, &schema_what("indexes", *name_fragment))
            }
            CheckKind::LabelsPresent { labels, required } => {
                let present: BTreeSet<String> = client.labels().await?.into_iter().collect();
                labels_outcome(labels, &present, *required)
            }
            CheckKind::Query(spec) => spec.evaluate(&self.records(spec).await?).into(),
            CheckKind::Advisory(spec) => match spec.evaluate(&self.records(spec).await?) {
                Ok(()) => Outcome::Passed,
                Err(reason) => Outcome::Warned(reason),
            },
            CheckKind::Optional { query, plugin } => self.optional(query, *plugin).await,
            CheckKind::Informational { cypher } => {
                let rows = client.query_records(query(cypher)).await?;
                match rows.first() {
                    Some(row) => tracing::info!(
                        lab = lab.0,
                        check = name,
                        rows = rows.len(),
                        first = %serde_json::to_string(row).unwrap_or_default(),
                        "Informational result"
                    ),
                    None => tracing::info!(lab = lab.0, check = name, "Informational query returned no rows"),
                }
                Outcome::Passed
            }
            CheckKind::Timed {
                cypher,
                max_ms,
                require_rows,
            } => {
                let started = Instant::now();
                let rows = client.query_records(query(cypher)).await?;
                let took = elapsed_ms(started);
                if *require_rows && rows.is_empty() {
                    Outcome::Failed("query returned no rows".to_string())
                } else if took > *max_ms {
                    Outcome::Failed(format!("took {took} ms, limit is {max_ms} ms"))
                } else {
                    Outcome::Passed
                }
            }
            CheckKind::MergeUpsert => self.merge_upsert().await?,
            CheckKind::WriteTransaction => self.write_transaction().await?,
            CheckKind::TransactionRollback => self.transaction_rollback().await?,
            CheckKind::RejectsInvalidCypher => match client.run(query("INVALID CYPHER QUERY")).await {
                Ok(()) => Outcome::Failed("invalid Cypher was accepted".to_string()),
                Err(_) => Outcome::Passed,
            },
            CheckKind::Summary { labels } => {
                self.summary(lab, labels).await?;
                Outcome::Passed
            }
            CheckKind::Sandbox(steps) => self.sandbox(steps).await?,
            CheckKind::PooledQueries { sessions } => self.pooled_queries(*sessions).await?,
            CheckKind::PluginVersion(plugin) => self.plugin_version(lab, *plugin).await,
        };
        Ok(outcome)
    }

    async fn records(&self, spec: &QuerySpec) -> std::result::Result<Vec<Record>, GraphError> {
        self.client
            .query_records(bind_all(query(spec.cypher), &spec.params))
            .await
    }

    /// Plugin queries never fail a lab: a missing plugin skips, anything
    /// else warns.
    async fn optional(&self, spec: &QuerySpec, plugin: Plugin) -> Outcome {
        match self.records(spec).await {
            Ok(rows) => match spec.evaluate(&rows) {
                Ok(()) => Outcome::Passed,
                Err(reason) => Outcome::Warned(reason),
            },
            Err(e) => {
                let message = e.to_string();
                match classify(&message) {
                    Some(b) if b.is_skip() => Outcome::Skipped(b.reason().to_string()),
                    _ if plugin.used_by(&message) => {
                        Outcome::Skipped(format!("{plugin} plugin not available"))
                    }
                    _ => Outcome::Warned(message),
                }
            }
        }
    }

    // ── Write Checks ─────────────────────────────────────────────

    async fn merge_upsert(&self) -> std::result::Result<Outcome, GraphError> {
        let id = format!("TEST-MERGE-{}", Uuid::new_v4());
        let outcome = self.merge_twice(&id).await;
        self.delete_test_node(&id).await;
        outcome
    }

    async fn merge_twice(&self, id: &str) -> std::result::Result<Outcome, GraphError> {
        let merge = || {
            query(
                "MERGE (t:TestNode {id: $id})
                 ON CREATE SET t.counter = 1, t.created = true
                 ON MATCH SET t.counter = t.counter + 1, t.updated = true
                 RETURN t.counter AS counter",
            )
            .param("id", id.to_string())
        };

        for expected in [1, 2] {
            let rows = self.client.query_records(merge()).await?;
            let counter = rows.first().and_then(|r| r.i64("counter"));
            if counter != Some(expected) {
                return Ok(Outcome::Failed(format!(
                    "MERGE counter is {counter:?}, expected {expected}"
                )));
            }
        }
        Ok(Outcome::Passed)
    }

    async fn write_transaction(&self) -> std::result::Result<Outcome, GraphError> {
        let id = format!("TEST-TXN-{}", Uuid::new_v4());
        let props = vec![("id".to_string(), Param::from(id.as_str()))];

        let mut txn = self.client.start_txn().await?;
        txn.run(
            query("CREATE (t:TestNode {id: $id, created: datetime()})").param("id", id.clone()),
        )
        .await?;
        txn.commit().await?;

        if !self.client.node_exists("TestNode", &props).await? {
            return Ok(Outcome::Failed("committed node not found".to_string()));
        }

        let mut txn = self.client.start_txn().await?;
        txn.run(query("MATCH (t:TestNode {id: $id}) DELETE t").param("id", id.clone()))
            .await?;
        txn.commit().await?;

        if self.client.node_exists("TestNode", &props).await? {
            return Ok(Outcome::Failed("deleted node still present".to_string()));
        }
        Ok(Outcome::Passed)
    }

    async fn transaction_rollback(&self) -> std::result::Result<Outcome, GraphError> {
        let id = format!("TEST-ROLLBACK-{}", Uuid::new_v4());
        let props = vec![("id".to_string(), Param::from(id.as_str()))];

        let mut txn = self.client.start_txn().await?;
        txn.run(query("CREATE (t:TestNode {id: $id})").param("id", id.clone()))
            .await?;
        txn.rollback().await?;

        if self.client.node_exists("TestNode", &props).await? {
            self.delete_test_node(&id).await;
            return Ok(Outcome::Failed(
                "node from rolled-back transaction is present".to_string(),
            ));
        }
        Ok(Outcome::Passed)
    }

    /// Run `steps` between two sweeps of the sandbox labels. The first
    /// failing step decides the outcome; cleanup runs regardless.
    async fn sandbox(&self, steps: &[QuerySpec]) -> std::result::Result<Outcome, GraphError> {
        self.clear_sandbox().await?;
        let outcome = self.sandbox_steps(steps).await;
        if let Err(e) = self.clear_sandbox().await {
            tracing::warn!(error = %e, "Failed to clean up sandbox nodes");
        }
        outcome
    }

    async fn sandbox_steps(&self, steps: &[QuerySpec]) -> std::result::Result<Outcome, GraphError> {
        for (i, step) in steps.iter().enumerate() {
            let rows = self.records(step).await?;
            if let Err(reason) = step.evaluate(&rows) {
                return Ok(Outcome::Failed(format!("step {}: {reason}", i + 1)));
            }
        }
        Ok(Outcome::Passed)
    }

    async fn clear_sandbox(&self) -> std::result::Result<(), GraphError> {
        for label in SANDBOX_LABELS {
            self.client
                .run(query(&format!("MATCH (n:{label}) DETACH DELETE n")))
                .await?;
        }
        Ok(())
    }

    async fn delete_test_node(&self, id: &str) {
        let q = query("MATCH (t:TestNode {id: $id}) DETACH DELETE t").param("id", id.to_string());
        if let Err(e) = self.client.run(q).await {
            tracing::warn!(id, error = %e, "Failed to clean up test node");
        }
    }

    // ── Driver Checks ────────────────────────────────────────────

    /// Issue `sessions` round-trips at once, each on its own task, so the
    /// pool has to hand out several connections.
    async fn pooled_queries(&self, sessions: i64) -> std::result::Result<Outcome, GraphError> {
        let mut handles = Vec::new();
        for i in 0..sessions {
            let client = self.client.clone();
            let handle = tokio::spawn(async move {
                let rows = client
                    .query_records(query("RETURN $i AS number").param("i", i))
                    .await?;
                Ok::<_, GraphError>(rows.first().and_then(|r| r.i64("number")))
            });
            handles.push((i, handle));
        }

        let mut mismatched = Vec::new();
        for (i, handle) in handles {
            let number = handle
                .await
                .map_err(|e| GraphError::Connection(format!("pooled query task failed: {e}")))??;
            if number != Some(i) {
                mismatched.push(format!("session {i} returned {number:?}"));
            }
        }

        if mismatched.is_empty() {
            Ok(Outcome::Passed)
        } else {
            Ok(Outcome::Failed(mismatched.join(", ")))
        }
    }

    async fn plugin_version(&self, lab: LabNumber, plugin: Plugin) -> Outcome {
        let cypher = format!("RETURN {}version() AS version", plugin.namespace());
        match self.client.query_records(query(&cypher)).await {
            Ok(rows) => match rows.first().and_then(|r| r.str("version")) {
                Some(version) => {
                    tracing::info!(lab = lab.0, %plugin, version, "Plugin available");
                    Outcome::Passed
                }
                None => Outcome::Warned(format!("{plugin} version query returned no row")),
            },
            Err(e) => {
                tracing::warn!(lab = lab.0, %plugin, error = %e, "Plugin not available");
                Outcome::Warned(format!("{plugin} plugin not available"))
            }
        }
    }

    // ── Summary ──────────────────────────────────────────────────

    async fn summary(&self, lab: LabNumber, labels: &[&str]) -> std::result::Result<(), GraphError> {
        let nodes = self.client.count_nodes(None).await?;
        let relationships = self.client.count_relationships(None).await?;
        tracing::info!(lab = lab.0, nodes, relationships, "Database state");

        let labels: Vec<String> = if labels.is_empty() {
            self.client.labels().await?
        } else {
            labels.iter().map(|l| l.to_string()).collect()
        };
        for label in &labels {
            let count = self.client.count_nodes(Some(label.as_str())).await?;
            tracing::info!(lab = lab.0, label = %label, count, "Label count");
        }
        Ok(())
    }
}

// ── Outcome Helpers ──────────────────────────────────────────────

/// Map a query error to an outcome. Plugin gaps skip, environment limits
/// and pre-existing schema pass with a warning, everything else fails.
pub fn error_outcome(err: &GraphError) -> Outcome {
    let message = err.to_string();
    match classify(&message) {
        Some(b) if b.is_skip() => Outcome::Skipped(b.reason().to_string()),
        Some(b) => Outcome::Warned(b.reason().to_string()),
        _ => Outcome::Failed(message),
    }
}

fn at_least(actual: i64, min: i64, what: &str) -> Outcome {
    if actual >= min {
        Outcome::Passed
    } else {
        Outcome::Failed(format!("expected at least {min} {what}, found {actual}"))
    }
}

fn schema_what(kind: &str, name_fragment: Option<&str>) -> String {
    match name_fragment {
        Some(f) => format!("{kind} named like '{f}'"),
        None => kind.to_string(),
    }
}

fn labels_outcome(labels: &[&str], present: &BTreeSet<String>, required: bool) -> Outcome {
    let missing: Vec<&str> = labels
        .iter()
        .copied()
        .filter(|l| !present.contains(*l))
        .collect();
    match (missing.is_empty(), required) {
        (true, _) => Outcome::Passed,
        (false, true) => Outcome::Failed(format!("missing labels: {}", missing.join(", "))),
        (false, false) => Outcome::Warned(format!("labels not present: {}", missing.join(", "))),
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_from_args() {
        assert_eq!(Selection::from_args(None, None).unwrap(), Selection::All);
        assert_eq!(
            Selection::from_args(Some(7), None).unwrap(),
            Selection::Lab(LabNumber(7))
        );
        assert_eq!(
            Selection::from_args(None, Some(2)).unwrap(),
            Selection::Day(Day::Two)
        );
        assert!(Selection::from_args(Some(18), None).is_err());
        assert!(Selection::from_args(Some(0), None).is_err());
        assert!(Selection::from_args(None, Some(4)).is_err());
        assert!(Selection::from_args(Some(1), Some(1)).is_err());
    }

    #[test]
    fn test_selection_suites_in_order() {
        let numbers = |s: Selection| -> Vec<u32> { s.suites().iter().map(|x| x.number.0).collect() };
        assert_eq!(numbers(Selection::All).len(), 17);
        assert_eq!(numbers(Selection::Lab(LabNumber(9))), vec![9]);
        assert_eq!(numbers(Selection::Day(Day::Two)), vec![6, 7, 8, 9, 10, 11]);
        assert_eq!(numbers(Selection::Day(Day::Three)), vec![12, 13, 14, 15, 16, 17]);
    }

    #[test]
    fn test_error_outcome_classification() {
        let err = |m: &str| GraphError::Connection(m.to_string());

        assert!(matches!(
            error_outcome(&err("There is no procedure with the name `gds.graph.project`")),
            Outcome::Skipped(_)
        ));
        assert!(matches!(
            error_outcome(&err("An equivalent constraint already exists")),
            Outcome::Warned(_)
        ));
        assert!(matches!(
            error_outcome(&err("Java heap space")),
            Outcome::Warned(_)
        ));
        assert!(error_outcome(&err("Invalid input 'INVALID'")).is_failure());
    }

    #[test]
    fn test_at_least() {
        assert_eq!(at_least(10, 10, "Customer nodes"), Outcome::Passed);
        assert_eq!(
            at_least(9, 10, "Customer nodes"),
            Outcome::Failed("expected at least 10 Customer nodes, found 9".to_string())
        );
    }

    #[test]
    fn test_labels_outcome() {
        let present: BTreeSet<String> = ["Customer", "Policy"].iter().map(|s| s.to_string()).collect();
        assert_eq!(labels_outcome(&["Customer"], &present, true), Outcome::Passed);
        assert_eq!(
            labels_outcome(&["Customer", "Claim"], &present, true),
            Outcome::Failed("missing labels: Claim".to_string())
        );
        assert!(matches!(
            labels_outcome(&["PredictiveModel"], &present, false),
            Outcome::Warned(_)
        ));
    }

    #[test]
    fn test_schema_what() {
        assert_eq!(schema_what("indexes", None), "indexes");
        assert_eq!(
            schema_what("constraints", Some("customer")),
            "constraints named like 'customer'"
        );
    }
}
