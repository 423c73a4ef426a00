//! Markdown query sweep.
//!
//! Replays every Cypher block of every lab file against the database.
//! Base data from the first labs is loaded up front so later blocks have
//! something to match. Errors the labs are expected to hit are classified
//! instead of failing the sweep.

use std::fmt::Write as _;
use std::path::Path;

use labkit_core::layout;
use labkit_graph::{quote_identifier, GraphClient};
use neo4rs::query;
use serde::Serialize;

use crate::check::Outcome;
use crate::config::VerifyConfig;
use crate::error::Result;
use crate::markdown::{self, CypherBlock};
use crate::report::Totals;
use crate::runner::error_outcome;

/// Characters of a failing block shown in the text report.
const PREVIEW_CHARS: usize = 500;

// ── Database Setup ───────────────────────────────────────────────

/// Drop every constraint, then delete every node and relationship.
pub async fn reset_database(client: &GraphClient) -> Result<()> {
    let names = client.constraint_names().await?;
    for name in &names {
        let drop = format!("DROP CONSTRAINT {}", quote_identifier(name));
        if let Err(e) = client.run(query(&drop)).await {
            tracing::debug!(constraint = %name, error = %e, "Failed to drop constraint");
        }
    }
    client.run(query("MATCH (n) DETACH DELETE n")).await?;
    tracing::info!(constraints = names.len(), "Database cleared");
    Ok(())
}

/// Run the data-creation blocks of the base labs.
///
/// Skipped when the database already holds more than the configured
/// threshold of nodes. Returns the number of blocks that ran.
pub async fn load_base_data(
    client: &GraphClient,
    labs_dir: &Path,
    config: &VerifyConfig,
) -> Result<usize> {
    let existing = client.count_nodes(None).await?;
    if existing > config.base_data_threshold {
        tracing::info!(nodes = existing, "Base data already loaded");
        return Ok(0);
    }

    let mut loaded = 0;
    for path in layout::lab_files(labs_dir)? {
        let Some(lab) = layout::lab_number(&path) else {
            continue;
        };
        if !config.base_data_labs.contains(&lab) {
            continue;
        }

        let text = layout::read_text(&path)?;
        let mut from_file = 0;
        for block in markdown::extract_cypher_blocks(&text) {
            let cypher = block.cleaned();
            if !markdown::is_executable(&cypher)
                || markdown::requires_gds(&cypher)
                || !markdown::is_data_creation(&cypher)
            {
                continue;
            }
            // Load failures do not affect the sweep.
            match client.run(query(&cypher)).await {
                Ok(()) => from_file += 1,
                Err(e) => {
                    tracing::debug!(lab, block = block.number, error = %e, "Base data block failed")
                }
            }
        }
        tracing::info!(lab, blocks = from_file, "Loaded base data");
        loaded += from_file;
    }

    let nodes = client.count_nodes(None).await?;
    tracing::info!(nodes, blocks = loaded, "Base data loaded");
    Ok(loaded)
}

// ── Sweep ────────────────────────────────────────────────────────

/// Result of running one markdown block.
#[derive(Debug, Clone, Serialize)]
pub struct BlockResult {
    pub file: String,
    pub block: usize,
    pub outcome: Outcome,
    /// Cleaned query text, kept for failure reports.
    #[serde(skip)]
    pub cypher: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SweepReport {
    pub blocks: Vec<BlockResult>,
}

impl SweepReport {
    pub fn totals(&self) -> Totals {
        let mut totals = Totals::default();
        for block in &self.blocks {
            totals.add(&block.outcome);
        }
        totals
    }

    pub fn passed(&self) -> bool {
        !self.blocks.iter().any(|b| b.outcome.is_failure())
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for failed in self.blocks.iter().filter(|b| b.outcome.is_failure()) {
            let preview: String = failed.cypher.chars().take(PREVIEW_CHARS).collect();
            let _ = writeln!(out, "QUERY FAILED: {} #{}", failed.file, failed.block);
            if let Some(reason) = failed.outcome.reason() {
                let _ = writeln!(out, "Error: {reason}");
            }
            let _ = writeln!(out, "{preview}");
            let _ = writeln!(out);
        }

        let totals = self.totals();
        let _ = writeln!(
            out,
            "Blocks: {} run, {} passed, {} warned, {} failed, {} skipped",
            totals.run, totals.passed, totals.warned, totals.failed, totals.skipped
        );
        let _ = writeln!(out, "Success rate: {:.1}%", totals.success_rate());
        out
    }
}

/// Optionally reset, load base data, then run every block of every lab file.
pub async fn run_sweep(
    client: &GraphClient,
    labs_dir: &Path,
    config: &VerifyConfig,
    reset: bool,
) -> Result<SweepReport> {
    let files = layout::lab_files(labs_dir)?;
    if reset {
        reset_database(client).await?;
    }
    load_base_data(client, labs_dir, config).await?;

    let mut report = SweepReport::default();
    for path in files {
        let file = file_stem(&path);
        let text = layout::read_text(&path)?;
        for block in markdown::extract_cypher_blocks(&text) {
            let result = run_block(client, &file, &block).await;
            report.blocks.push(result);
        }
        tracing::info!(file = %file, "Swept lab file");
    }
    Ok(report)
}

async fn run_block(client: &GraphClient, file: &str, block: &CypherBlock) -> BlockResult {
    let cypher = block.cleaned();
    let outcome = if !markdown::is_executable(&cypher) {
        Outcome::Skipped("non-executable query (browser command or placeholder)".to_string())
    } else {
        // Rows are drained so the statement fully executes.
        match client.query_rows(query(&cypher)).await {
            Ok(_) => Outcome::Passed,
            Err(e) => error_outcome(&e),
        }
    };

    if outcome.is_failure() {
        tracing::warn!(
            file,
            block = block.number,
            reason = outcome.reason().unwrap_or_default(),
            "Query failed"
        );
    }
    BlockResult {
        file: file.to_string(),
        block: block.number,
        outcome,
        cypher,
    }
}

// ── Coverage ─────────────────────────────────────────────────────

/// Executable and total Cypher blocks in one lab file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Coverage {
    pub file: String,
    pub executable: usize,
    pub total: usize,
}

/// Count blocks per lab file without touching the database.
pub fn coverage(labs_dir: &Path) -> Result<Vec<Coverage>> {
    let mut entries = Vec::new();
    for path in layout::lab_files(labs_dir)? {
        let blocks = markdown::extract_cypher_blocks(&layout::read_text(&path)?);
        if blocks.is_empty() {
            continue;
        }
        let executable = blocks
            .iter()
            .filter(|b| markdown::is_executable(&b.cleaned()))
            .count();
        entries.push(Coverage {
            file: file_stem(&path),
            executable,
            total: blocks.len(),
        });
    }
    Ok(entries)
}

pub fn render_coverage(entries: &[Coverage]) -> String {
    let mut out = String::new();
    for entry in entries {
        let _ = writeln!(
            out,
            "{}: {}/{} executable queries",
            entry.file, entry.executable, entry.total
        );
    }
    let total: usize = entries.iter().map(|e| e.total).sum();
    let executable: usize = entries.iter().map(|e| e.executable).sum();
    let _ = writeln!(out);
    let _ = writeln!(out, "Total queries: {total}");
    let _ = writeln!(out, "Executable queries: {executable}");
    out
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_labs(dir: &Path) {
        std::fs::write(
            dir.join("neo4j_lab_1_enterprise_setup.md"),
            "```cypher\nCREATE (c:Customer {id: 1})\n```\n\n```cypher\n:play start\n```\n",
        )
        .unwrap();
        std::fs::write(
            dir.join("neo4j_lab_2_cypher_fundamentals.md"),
            "```cypher\nMATCH (c:Customer) RETURN count(c)\n```\n\
             ```cypher\nMATCH (c {id: '<id>'}) RETURN c.id\n```\n\
             ```cypher\n// just a note\n```\n",
        )
        .unwrap();
        std::fs::write(dir.join("neo4j_lab_3_no_queries.md"), "# nothing here\n").unwrap();
    }

    #[test]
    fn test_coverage_counts_blocks() {
        let dir = tempfile::tempdir().unwrap();
        write_labs(dir.path());

        let entries = coverage(dir.path()).unwrap();
        assert_eq!(
            entries,
            vec![
                Coverage {
                    file: "neo4j_lab_1_enterprise_setup".to_string(),
                    executable: 1,
                    total: 2,
                },
                Coverage {
                    file: "neo4j_lab_2_cypher_fundamentals".to_string(),
                    executable: 1,
                    total: 3,
                },
            ]
        );

        let text = render_coverage(&entries);
        assert!(text.contains("neo4j_lab_1_enterprise_setup: 1/2 executable queries"));
        assert!(text.contains("Total queries: 5"));
        assert!(text.contains("Executable queries: 2"));
    }

    #[test]
    fn test_coverage_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(coverage(&dir.path().join("labs")).is_err());
    }

    #[test]
    fn test_sweep_report_render() {
        let report = SweepReport {
            blocks: vec![
                BlockResult {
                    file: "neo4j_lab_2_cypher_fundamentals".to_string(),
                    block: 4,
                    outcome: Outcome::Failed("Invalid input 'RETRN'".to_string()),
                    cypher: "MATCH (n) RETRN n.id".to_string(),
                },
                BlockResult {
                    file: "neo4j_lab_7_graph_algorithms".to_string(),
                    block: 1,
                    outcome: Outcome::Skipped("GDS plugin not installed (optional)".to_string()),
                    cypher: "CALL gds.version()".to_string(),
                },
            ],
        };
        assert!(!report.passed());
        let text = report.render_text();
        assert!(text.contains("QUERY FAILED: neo4j_lab_2_cypher_fundamentals #4"));
        assert!(text.contains("Error: Invalid input 'RETRN'"));
        assert!(text.contains("MATCH (n) RETRN n.id"));
        assert!(text.contains("1 run, 0 passed, 0 warned, 1 failed, 1 skipped"));
    }
}
