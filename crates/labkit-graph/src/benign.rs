//! Classification of Cypher errors that do not indicate a broken query.
//!
//! Lab queries are replayed against databases in arbitrary states, so some
//! failures are expected: constraints that were already created, plugins that
//! are not installed, and memory limits of small training machines.

use std::fmt;

/// Optional server plugins that some lab queries depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plugin {
    /// Graph Data Science library (`gds.*` procedures).
    Gds,
    /// APOC procedures (`apoc.*`).
    Apoc,
}

impl Plugin {
    /// Procedure namespace prefix, lowercase.
    pub fn namespace(self) -> &'static str {
        match self {
            Self::Gds => "gds.",
            Self::Apoc => "apoc.",
        }
    }

    /// Whether the query text calls into this plugin.
    pub fn used_by(self, cypher: &str) -> bool {
        cypher.to_lowercase().contains(self.namespace())
    }
}

impl fmt::Display for Plugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gds => write!(f, "GDS"),
            Self::Apoc => write!(f, "APOC"),
        }
    }
}

/// A query error that is not a real failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Benign {
    /// Constraint, index or uniquely-keyed data already present.
    AlreadyExists,
    /// Constraint creation refused because of existing data.
    ConstraintConflict,
    /// Required plugin is not installed.
    MissingPlugin(Plugin),
    /// APOC installed but not unrestricted.
    ApocSandboxed,
    /// Server memory limits of the host environment.
    MemoryLimit,
}

impl Benign {
    /// Skips are reported as not run; everything else counts as a pass.
    pub fn is_skip(self) -> bool {
        matches!(self, Self::MissingPlugin(_) | Self::ApocSandboxed)
    }

    pub fn reason(self) -> &'static str {
        match self {
            Self::AlreadyExists => "already exists (expected)",
            Self::ConstraintConflict => "constraint issue (expected when running sequentially)",
            Self::MissingPlugin(Plugin::Gds) => "GDS plugin not installed (optional)",
            Self::MissingPlugin(Plugin::Apoc) => "APOC plugin not installed (optional)",
            Self::ApocSandboxed => "APOC not unrestricted (check config)",
            Self::MemoryLimit => "memory limit (environment constraint, not a query error)",
        }
    }
}

impl fmt::Display for Benign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

/// Classify an error message. `None` means the error is a real failure.
pub fn classify(message: &str) -> Option<Benign> {
    let msg = message.to_lowercase();
    let has = |needle: &str| msg.contains(needle);

    if has("already exists") {
        return Some(Benign::AlreadyExists);
    }
    if has("constraint") && (has("creation") || has("failed")) {
        return Some(Benign::ConstraintConflict);
    }
    if has("no procedure") {
        if has("gds") {
            return Some(Benign::MissingPlugin(Plugin::Gds));
        }
        if has("apoc") {
            return Some(Benign::MissingPlugin(Plugin::Apoc));
        }
    }
    if has("sandboxed") && has("apoc") {
        return Some(Benign::ApocSandboxed);
    }
    if is_memory_error(&msg) {
        return Some(Benign::MemoryLimit);
    }
    None
}

fn is_memory_error(lower: &str) -> bool {
    let squashed: String = lower.chars().filter(|c| *c != '.' && *c != '_').collect();
    if squashed.contains("memorypooloutofmemoryerror") {
        return true;
    }
    if lower.contains("memory")
        && (lower.contains("pool") || lower.contains("out of memory") || lower.contains("heap space"))
    {
        return true;
    }
    lower.contains("heap space") || lower.contains("dbms.memory.transaction")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_exists() {
        let msg = "Neo.ClientError.Schema.EquivalentSchemaRuleAlreadyExists: \
                   An equivalent constraint already exists";
        assert_eq!(classify(msg), Some(Benign::AlreadyExists));
        assert_eq!(
            classify("Node(12) ALREADY EXISTS with label `Customer`"),
            Some(Benign::AlreadyExists)
        );
    }

    #[test]
    fn test_constraint_conflict() {
        assert_eq!(
            classify("Unable to create Constraint: creation failed for existing data"),
            Some(Benign::ConstraintConflict)
        );
        // "constraint" alone is not enough.
        assert_eq!(classify("constraint violated by property"), None);
    }

    #[test]
    fn test_missing_gds_is_skip() {
        let b = classify("There is no procedure with the name `gds.pageRank.stream` registered").unwrap();
        assert_eq!(b, Benign::MissingPlugin(Plugin::Gds));
        assert!(b.is_skip());
    }

    #[test]
    fn test_sandboxed_apoc_is_skip() {
        let b = classify("apoc.periodic.iterate is unavailable because it is sandboxed").unwrap();
        assert_eq!(b, Benign::ApocSandboxed);
        assert!(b.is_skip());
    }

    #[test]
    fn test_memory_errors_pass() {
        for msg in [
            "org.neo4j.memory.MemoryPoolOutOfMemoryError: pool exhausted",
            "Memory_Pool_Out_Of_Memory_Error",
            "The allocation exceeded the memory pool limit",
            "java.lang.OutOfMemoryError: Java heap space",
            "limit reached, see dbms.memory.transaction.total.max",
        ] {
            let b = classify(msg);
            assert_eq!(b, Some(Benign::MemoryLimit), "{msg}");
            assert!(!b.unwrap().is_skip());
        }
    }

    #[test]
    fn test_real_failures() {
        assert_eq!(classify("Invalid input 'INVALID': expected 'ALTER'"), None);
        assert_eq!(classify("Variable `x` not defined"), None);
        assert_eq!(classify(""), None);
    }

    #[test]
    fn test_plugin_detection() {
        assert!(Plugin::Gds.used_by("CALL GDS.graph.project('g', 'Customer', 'OWNS')"));
        assert!(Plugin::Apoc.used_by("RETURN apoc.text.join(['a'], ',')"));
        assert!(!Plugin::Gds.used_by("MATCH (n) RETURN n"));
    }
}
