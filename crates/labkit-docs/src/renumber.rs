//! Lab file renumbering.
//!
//! Renames lab markdown files and data reload scripts through a
//! `LabMapping`, then remaps the references inside every lab file.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use labkit_core::layout::{self, LAB_PREFIX};
use labkit_core::{LabMapping, LabkitError};

use crate::error::{DocsError, Result};
use crate::files::{self, FileChange};
use crate::references::remap_lab_refs;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rename {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// `neo4j_lab_<old>_<slug>.md` renamed to `neo4j_lab_<new>_<slug>.md`.
///
/// `None` unless the file carries exactly lab `old`, so lab 1 never
/// matches `neo4j_lab_10_*`.
pub fn renamed_lab_file(name: &str, old: u32, new: u32) -> Option<String> {
    let rest = name.strip_prefix(LAB_PREFIX)?;
    let digits = rest.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 || rest[..digits].parse::<u32>().ok()? != old {
        return None;
    }
    Some(format!("{LAB_PREFIX}{new}{}", &rest[digits..]))
}

/// Every rename the mapping implies, in safe order.
pub fn plan_renames(labs_dir: &Path, data_dir: &Path, mapping: &LabMapping) -> Result<Vec<Rename>> {
    let lab_files = layout::lab_files(labs_dir)?;
    let mut renames = Vec::new();

    for (old, new) in mapping.rename_order() {
        for path in &lab_files {
            let name = path.file_name().map(|n| n.to_string_lossy().into_owned());
            if let Some(target) = name.and_then(|n| renamed_lab_file(&n, old, new)) {
                renames.push(Rename {
                    from: path.clone(),
                    to: labs_dir.join(target),
                });
            }
        }

        let script = layout::data_reload_path(data_dir, old);
        if script.is_file() {
            renames.push(Rename {
                from: script,
                to: layout::data_reload_path(data_dir, new),
            });
        }
    }

    Ok(renames)
}

/// Apply renames in order. A target that exists and is not vacated by an
/// earlier rename is an error, never an overwrite. With `dry_run` the
/// same checks run without touching the disk.
pub fn apply_renames(renames: &[Rename], dry_run: bool) -> Result<()> {
    let mut vacated: HashSet<&Path> = HashSet::new();
    let mut created: HashSet<&Path> = HashSet::new();

    for rename in renames {
        let occupied = (rename.to.exists() && !vacated.contains(rename.to.as_path()))
            || created.contains(rename.to.as_path());
        if occupied {
            return Err(DocsError::RenameTarget {
                from: rename.from.clone(),
                to: rename.to.clone(),
            });
        }

        tracing::info!(
            from = %rename.from.display(),
            to = %rename.to.display(),
            dry_run,
            "Renaming"
        );
        if !dry_run {
            std::fs::rename(&rename.from, &rename.to)
                .map_err(|e| LabkitError::io(&rename.from, e))?;
        }

        vacated.insert(rename.from.as_path());
        vacated.remove(rename.to.as_path());
        created.insert(rename.to.as_path());
        created.remove(rename.from.as_path());
    }
    Ok(())
}

/// Rename files, then remap `Lab N` references in every lab file.
///
/// The whole plan is checked before any file moves, so a clash leaves the
/// course exactly as it was.
pub fn renumber(
    labs_dir: &Path,
    data_dir: &Path,
    mapping: &LabMapping,
    dry_run: bool,
) -> Result<(Vec<Rename>, Vec<FileChange>)> {
    let renames = plan_renames(labs_dir, data_dir, mapping)?;
    apply_renames(&renames, true)?;
    if !dry_run {
        apply_renames(&renames, false)?;
    }

    let lab_files = layout::lab_files(labs_dir)?;
    let changes = files::rewrite_files(&lab_files, dry_run, |_, text| {
        Ok(Some(remap_lab_refs(text, mapping)))
    })?;
    Ok((renames, changes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_renamed_lab_file_exact_number() {
        assert_eq!(
            renamed_lab_file("neo4j_lab_8_performance.md", 8, 7).as_deref(),
            Some("neo4j_lab_7_performance.md")
        );
        assert_eq!(renamed_lab_file("neo4j_lab_10_compliance.md", 1, 0), None);
        assert_eq!(renamed_lab_file("neo4j_lab_1_setup.md", 10, 9), None);
        assert_eq!(renamed_lab_file("notes_lab_8.md", 8, 7), None);
    }

    #[test]
    fn test_renumber_shifts_labs_down() {
        let root = tempfile::tempdir().unwrap();
        let labs = root.path().join("labs");
        let data = root.path().join("data");
        std::fs::create_dir_all(&labs).unwrap();
        std::fs::create_dir_all(&data).unwrap();

        std::fs::write(labs.join("neo4j_lab_6_analytics.md"), "Lab 6 then Lab 8").unwrap();
        std::fs::write(labs.join("neo4j_lab_8_performance.md"), "# Neo4j Lab 8: Perf\nNext: Lab 9").unwrap();
        std::fs::write(labs.join("neo4j_lab_9_fraud.md"), "# Neo4j Lab 9: Fraud").unwrap();
        std::fs::write(data.join("lab_08_data_reload.cypher"), "").unwrap();
        std::fs::write(data.join("lab_09_data_reload.cypher"), "").unwrap();

        let mapping = LabMapping::new([(8, 7), (9, 8)], vec![]).unwrap();
        let (renames, changes) = renumber(&labs, &data, &mapping, false).unwrap();

        assert_eq!(renames.len(), 4);
        assert_eq!(
            names(&labs),
            vec![
                "neo4j_lab_6_analytics.md",
                "neo4j_lab_7_performance.md",
                "neo4j_lab_8_fraud.md",
            ]
        );
        assert_eq!(
            names(&data),
            vec!["lab_07_data_reload.cypher", "lab_08_data_reload.cypher"]
        );
        assert_eq!(
            std::fs::read_to_string(labs.join("neo4j_lab_7_performance.md")).unwrap(),
            "# Neo4j Lab 7: Perf\nNext: Lab 8"
        );
        assert_eq!(
            std::fs::read_to_string(labs.join("neo4j_lab_6_analytics.md")).unwrap(),
            "Lab 6 then Lab 7"
        );
        assert_eq!(changes.len(), 3);
    }

    #[test]
    fn test_existing_target_is_an_error() {
        let root = tempfile::tempdir().unwrap();
        let labs = root.path().join("labs");
        std::fs::create_dir_all(&labs).unwrap();
        std::fs::write(labs.join("neo4j_lab_7_algorithms.md"), "keep").unwrap();
        std::fs::write(labs.join("neo4j_lab_8_performance.md"), "x").unwrap();

        let mapping = LabMapping::new([(8, 7)], vec![]).unwrap();
        let err = renumber(&labs, &root.path().join("data"), &mapping, false).unwrap_err();
        assert!(matches!(err, DocsError::RenameTarget { .. }));
        assert_eq!(
            std::fs::read_to_string(labs.join("neo4j_lab_7_algorithms.md")).unwrap(),
            "keep"
        );
    }

    #[test]
    fn test_clash_leaves_tree_untouched() {
        let root = tempfile::tempdir().unwrap();
        let labs = root.path().join("labs");
        std::fs::create_dir_all(&labs).unwrap();
        std::fs::write(labs.join("neo4j_lab_8_perf.md"), "Lab 8").unwrap();
        std::fs::write(labs.join("neo4j_lab_9_comp.md"), "Lab 9").unwrap();
        std::fs::write(labs.join("neo4j_lab_10_comp.md"), "Lab 10").unwrap();

        let mapping = LabMapping::new([(8, 7), (10, 9)], vec![]).unwrap();
        let err = renumber(&labs, &root.path().join("data"), &mapping, false).unwrap_err();
        assert!(matches!(err, DocsError::RenameTarget { ref from, .. } if from.ends_with("neo4j_lab_10_comp.md")));
        assert_eq!(
            names(&labs),
            vec![
                "neo4j_lab_10_comp.md",
                "neo4j_lab_8_perf.md",
                "neo4j_lab_9_comp.md",
            ]
        );
        assert_eq!(
            std::fs::read_to_string(labs.join("neo4j_lab_8_perf.md")).unwrap(),
            "Lab 8"
        );
    }

    #[test]
    fn test_renumber_mixed_directions() {
        let root = tempfile::tempdir().unwrap();
        let labs = root.path().join("labs");
        std::fs::create_dir_all(&labs).unwrap();
        for (n, slug) in [(3, "claims"), (4, "bulk"), (7, "algo"), (8, "perf")] {
            std::fs::write(labs.join(format!("neo4j_lab_{n}_{slug}.md")), format!("Lab {n}")).unwrap();
        }

        let mapping = LabMapping::new([(3, 2), (4, 3), (7, 8), (8, 9)], vec![]).unwrap();
        renumber(&labs, &root.path().join("data"), &mapping, false).unwrap();
        assert_eq!(
            names(&labs),
            vec![
                "neo4j_lab_2_claims.md",
                "neo4j_lab_3_bulk.md",
                "neo4j_lab_8_algo.md",
                "neo4j_lab_9_perf.md",
            ]
        );
        assert_eq!(
            std::fs::read_to_string(labs.join("neo4j_lab_8_algo.md")).unwrap(),
            "Lab 8"
        );
    }

    #[test]
    fn test_dry_run_plans_without_moving() {
        let root = tempfile::tempdir().unwrap();
        let labs = root.path().join("labs");
        std::fs::create_dir_all(&labs).unwrap();
        std::fs::write(labs.join("neo4j_lab_3_claims.md"), "Lab 3").unwrap();
        std::fs::write(labs.join("neo4j_lab_4_bulk.md"), "Lab 4").unwrap();

        // Shifting up renames 4 before 3, so the chain is valid.
        let mapping = LabMapping::new([(3, 4), (4, 5)], vec![]).unwrap();
        let (renames, _) = renumber(&labs, &root.path().join("data"), &mapping, true).unwrap();
        assert_eq!(renames.len(), 2);
        assert!(renames[0].from.ends_with("neo4j_lab_4_bulk.md"));
        assert_eq!(
            names(&labs),
            vec!["neo4j_lab_3_claims.md", "neo4j_lab_4_bulk.md"]
        );
        assert_eq!(
            std::fs::read_to_string(labs.join("neo4j_lab_3_claims.md")).unwrap(),
            "Lab 3"
        );
    }
}
