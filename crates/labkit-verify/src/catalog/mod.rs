//! Check catalog for every lab in the course.
//!
//! Each lab builds on the graph left by the one before it, so a suite
//! asserts the cumulative state students should have after finishing the
//! lab, followed by the operations the lab teaches.

mod day1;
mod day2;
mod day3;

use labkit_core::{Day, LabNumber};

use crate::check::Check;

/// Every check for one lab.
#[derive(Debug, Clone)]
pub struct LabSuite {
    pub number: LabNumber,
    pub title: &'static str,
    /// Approximate graph size once the lab is done, e.g. "60 nodes, 85 relationships".
    pub expected_state: &'static str,
    pub checks: Vec<Check>,
}

impl LabSuite {
    pub(crate) fn new(
        number: u32,
        title: &'static str,
        expected_state: &'static str,
        checks: Vec<Check>,
    ) -> Self {
        Self {
            number: LabNumber(number),
            title,
            expected_state,
            checks,
        }
    }

    pub fn day(&self) -> Day {
        self.number.day()
    }
}

/// All lab suites in course order.
pub fn catalog() -> Vec<LabSuite> {
    let mut suites = Vec::with_capacity(LabNumber::LAST as usize);
    suites.extend(day1::suites());
    suites.extend(day2::suites());
    suites.extend(day3::suites());
    suites
}

/// The suite for one lab, if the catalog has it.
pub fn suite(number: LabNumber) -> Option<LabSuite> {
    catalog().into_iter().find(|s| s.number == number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::{CheckKind, SANDBOX_LABELS};
    use regex::Regex;
    use std::collections::HashSet;

    fn cyphers(kind: &CheckKind) -> Vec<&'static str> {
        match kind {
            CheckKind::Query(q) | CheckKind::Advisory(q) | CheckKind::Optional { query: q, .. } => {
                vec![q.cypher]
            }
            CheckKind::Informational { cypher } | CheckKind::Timed { cypher, .. } => vec![*cypher],
            CheckKind::Sandbox(steps) => steps.iter().map(|s| s.cypher).collect(),
            _ => Vec::new(),
        }
    }

    #[test]
    fn test_catalog_covers_every_lab_in_order() {
        let numbers: Vec<u32> = catalog().iter().map(|s| s.number.0).collect();
        let expected: Vec<u32> = LabNumber::all().map(|n| n.0).collect();
        assert_eq!(numbers, expected);
    }

    #[test]
    fn test_every_suite_has_checks() {
        for suite in catalog() {
            assert!(!suite.checks.is_empty(), "{} has no checks", suite.number);
            assert!(!suite.title.is_empty());
            assert!(!suite.expected_state.is_empty());
        }
    }

    #[test]
    fn test_check_names_unique_within_suite() {
        for suite in catalog() {
            let mut seen = HashSet::new();
            for check in &suite.checks {
                assert!(
                    seen.insert(check.name.as_str()),
                    "{} repeats check {:?}",
                    suite.number,
                    check.name
                );
            }
        }
    }

    #[test]
    fn test_suite_days() {
        let day_of = |n| suite(LabNumber(n)).unwrap().day();
        assert_eq!(day_of(1), Day::One);
        assert_eq!(day_of(5), Day::One);
        assert_eq!(day_of(6), Day::Two);
        assert_eq!(day_of(11), Day::Two);
        assert_eq!(day_of(12), Day::Three);
        assert_eq!(day_of(17), Day::Three);
    }

    #[test]
    fn test_queries_return_no_raw_nodes() {
        // Rows are read as JSON cells, so queries must return properties.
        for suite in catalog() {
            for check in &suite.checks {
                for cypher in cyphers(&check.kind) {
                    let trimmed = cypher.trim_end();
                    for bare in ["RETURN c", "RETURN p", "RETURN n"] {
                        assert!(
                            !trimmed.ends_with(bare),
                            "{} check {:?} returns a whole node",
                            suite.number,
                            check.name
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_sandbox_nodes_carry_a_sandbox_label() {
        let created = Regex::new(r"(?:CREATE|MERGE) \(\w+:([\w:]+)").unwrap();
        let mut sandboxes = 0;
        for suite in catalog() {
            for check in &suite.checks {
                let CheckKind::Sandbox(steps) = &check.kind else {
                    continue;
                };
                sandboxes += 1;
                assert!(!steps.is_empty(), "{:?} has no steps", check.name);
                for step in steps {
                    for c in created.captures_iter(step.cypher) {
                        assert!(
                            c[1].split(':').any(|l| SANDBOX_LABELS.contains(&l)),
                            "{} check {:?} creates :{} outside the sandbox",
                            suite.number,
                            check.name,
                            &c[1]
                        );
                    }
                }
            }
        }
        assert_eq!(sandboxes, 16);
    }

    #[test]
    fn test_writes_outside_sandboxes_are_write_checks() {
        // Plain query checks run against the shared course data and must not
        // leave anything behind.
        for suite in catalog() {
            for check in &suite.checks {
                if matches!(check.kind, CheckKind::Sandbox(_)) {
                    continue;
                }
                for cypher in cyphers(&check.kind) {
                    assert!(
                        !cypher.contains("CREATE (") && !cypher.contains("DETACH DELETE"),
                        "{} check {:?} writes outside a sandbox",
                        suite.number,
                        check.name
                    );
                }
            }
        }
    }

    #[test]
    fn test_lab_one_starts_with_connectivity() {
        let lab1 = suite(LabNumber(1)).unwrap();
        assert!(matches!(lab1.checks[0].kind, CheckKind::Connectivity));
    }

    #[test]
    fn test_optional_checks_name_a_plugin() {
        let optional: Vec<_> = catalog()
            .into_iter()
            .flat_map(|s| s.checks)
            .filter_map(|c| match c.kind {
                CheckKind::Optional { query, plugin } => Some((query, plugin)),
                _ => None,
            })
            .collect();
        assert!(!optional.is_empty());
        for (query, plugin) in optional {
            assert!(plugin.used_by(query.cypher), "{} not used by {}", plugin, query.cypher);
        }
    }
}
