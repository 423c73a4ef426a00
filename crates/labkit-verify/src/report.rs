//! Run report: per-lab outcomes, totals and rendering.

use std::fmt::Write as _;
use std::path::Path;

use chrono::{DateTime, Utc};
use labkit_core::{Day, LabNumber};
use serde::Serialize;
use uuid::Uuid;

use crate::check::Outcome;
use crate::error::{Result, VerifyError};

/// Outcome of one check, with its wall time.
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub name: String,
    pub outcome: Outcome,
    pub duration_ms: u64,
}

/// Everything one lab produced.
#[derive(Debug, Clone, Serialize)]
pub struct LabResult {
    pub lab: LabNumber,
    pub title: String,
    pub day: Day,
    pub duration_ms: u64,
    /// Set when the lab could not finish, e.g. on timeout.
    pub error: Option<String>,
    pub checks: Vec<CheckResult>,
}

impl LabResult {
    /// A lab passes when it finished and no check failed.
    pub fn passed(&self) -> bool {
        self.error.is_none() && !self.checks.iter().any(|c| c.outcome.is_failure())
    }
}

/// Check totals across a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub run: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub warned: usize,
}

impl Totals {
    pub fn add(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Passed => self.passed += 1,
            Outcome::Failed(_) => self.failed += 1,
            Outcome::Skipped(_) => {
                self.skipped += 1;
                return;
            }
            Outcome::Warned(_) => self.warned += 1,
        }
        self.run += 1;
    }

    /// Percentage of executed checks that did not fail, one decimal place.
    ///
    /// Skipped checks are not executed. Returns 0.0 when nothing ran.
    pub fn success_rate(&self) -> f64 {
        if self.run == 0 {
            return 0.0;
        }
        let rate = (self.passed + self.warned) as f64 / self.run as f64 * 100.0;
        (rate * 10.0).round() / 10.0
    }
}

/// A verification run over one or more labs.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub labs: Vec<LabResult>,
}

impl RunReport {
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            finished_at: None,
            labs: Vec::new(),
        }
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn totals(&self) -> Totals {
        let mut totals = Totals::default();
        for check in self.labs.iter().flat_map(|l| &l.checks) {
            totals.add(&check.outcome);
        }
        totals
    }

    pub fn passed(&self) -> bool {
        self.labs.iter().all(LabResult::passed)
    }

    /// Process exit code: 0 when every lab passed.
    pub fn exit_code(&self) -> i32 {
        if self.passed() {
            0
        } else {
            1
        }
    }

    /// Lab-by-lab summary followed by overall totals.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Verification run {}", self.run_id);

        for lab in &self.labs {
            let status = if lab.passed() { "PASS" } else { "FAIL" };
            let _ = writeln!(
                out,
                "{status} {} {} ({:.1}s)",
                lab.lab,
                lab.title,
                lab.duration_ms as f64 / 1000.0
            );
            for check in &lab.checks {
                if let Some(reason) = check.outcome.reason() {
                    let _ = writeln!(out, "    {} {}: {reason}", check.outcome.label(), check.name);
                }
            }
            if let Some(error) = &lab.error {
                let _ = writeln!(out, "    ERROR {error}");
            }
        }

        let totals = self.totals();
        let labs_passed = self.labs.iter().filter(|l| l.passed()).count();
        let _ = writeln!(out);
        let _ = writeln!(out, "Labs: {labs_passed}/{} passed", self.labs.len());
        let _ = writeln!(
            out,
            "Checks: {} run, {} passed, {} warned, {} failed, {} skipped",
            totals.run, totals.passed, totals.warned, totals.failed, totals.skipped
        );
        let _ = writeln!(out, "Success rate: {:.1}%", totals.success_rate());
        out
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| VerifyError::ReportWrite {
                path: path.display().to_string(),
                source,
            })?;
        }
        std::fs::write(path, json).map_err(|source| VerifyError::ReportWrite {
            path: path.display().to_string(),
            source,
        })
    }
}

impl Default for RunReport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(name: &str, outcome: Outcome) -> CheckResult {
        CheckResult {
            name: name.to_string(),
            outcome,
            duration_ms: 5,
        }
    }

    fn lab(n: u32, checks: Vec<CheckResult>) -> LabResult {
        LabResult {
            lab: LabNumber(n),
            title: format!("Lab title {n}"),
            day: LabNumber(n).day(),
            duration_ms: 1500,
            error: None,
            checks,
        }
    }

    #[test]
    fn test_totals_and_success_rate() {
        let mut report = RunReport::new();
        report.labs.push(lab(
            1,
            vec![
                check("a", Outcome::Passed),
                check("b", Outcome::Passed),
                check("c", Outcome::Skipped("GDS plugin not installed".into())),
            ],
        ));
        report.labs.push(lab(
            2,
            vec![
                check("d", Outcome::Failed("expected 3 rows, got 0".into())),
                check("e", Outcome::Warned("memory limit".into())),
            ],
        ));

        let totals = report.totals();
        assert_eq!(totals.run, 4);
        assert_eq!(totals.passed, 2);
        assert_eq!(totals.warned, 1);
        assert_eq!(totals.failed, 1);
        assert_eq!(totals.skipped, 1);
        assert_eq!(totals.success_rate(), 75.0);
        assert!(!report.passed());
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn test_success_rate_rounds_to_one_decimal() {
        let totals = Totals {
            run: 3,
            passed: 2,
            ..Totals::default()
        };
        assert_eq!(totals.success_rate(), 66.7);
        assert_eq!(Totals::default().success_rate(), 0.0);
    }

    #[test]
    fn test_timed_out_lab_fails() {
        let mut timed_out = lab(5, vec![check("a", Outcome::Passed)]);
        timed_out.error = Some("timed out after 120 seconds".into());
        assert!(!timed_out.passed());

        let mut report = RunReport::new();
        report.labs.push(timed_out);
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn test_empty_run_passes() {
        let report = RunReport::new();
        assert!(report.passed());
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn test_render_text() {
        let mut report = RunReport::new();
        report.labs.push(lab(1, vec![check("a", Outcome::Passed)]));
        report.labs.push(lab(
            2,
            vec![check("row counts", Outcome::Failed("expected 5 rows, got 4".into()))],
        ));
        let text = report.render_text();
        assert!(text.contains("PASS Lab 01 Lab title 1 (1.5s)"));
        assert!(text.contains("FAIL Lab 02 Lab title 2"));
        assert!(text.contains("    FAIL row counts: expected 5 rows, got 4"));
        assert!(text.contains("Labs: 1/2 passed"));
        assert!(text.contains("Success rate: 50.0%"));
    }

    #[test]
    fn test_write_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("report.json");
        let mut report = RunReport::new();
        report.labs.push(lab(3, vec![check("a", Outcome::Passed)]));
        report.finish();
        report.write_json(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["labs"][0]["checks"][0]["outcome"]["status"], "passed");
        assert_eq!(value["run_id"], report.run_id.to_string());
    }
}
