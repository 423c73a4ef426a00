//! Cypher blocks embedded in lab markdown.
//!
//! Pure text functions: extraction, comment stripping and the classifiers
//! the sweep uses to decide what to run.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static CYPHER_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```cypher\n(.*?)\n```").expect("cypher fence regex"));

/// One fenced Cypher block, numbered from 1 within its file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CypherBlock {
    pub number: usize,
    pub raw: String,
}

impl CypherBlock {
    /// Comment-free text ready to send to the server.
    pub fn cleaned(&self) -> String {
        clean_cypher(&self.raw)
    }
}

/// Bodies of every ```` ```cypher ```` fence in document order.
pub fn extract_cypher_blocks(markdown: &str) -> Vec<CypherBlock> {
    CYPHER_FENCE
        .captures_iter(markdown)
        .enumerate()
        .map(|(i, c)| CypherBlock {
            number: i + 1,
            raw: c[1].to_string(),
        })
        .collect()
}

/// Drop `//` comment lines, trailing `//` comments and blank lines.
pub fn clean_cypher(cypher: &str) -> String {
    let lines: Vec<&str> = cypher
        .lines()
        .filter(|line| !line.trim_start().starts_with("//"))
        .map(|line| match line.find("//") {
            Some(at) => line[..at].trim(),
            None => line,
        })
        .filter(|line| !line.trim().is_empty())
        .collect();
    lines.join("\n").trim().to_string()
}

/// Browser commands (`:play`) and `<placeholder>` templates cannot run.
pub fn is_executable(cypher: &str) -> bool {
    let trimmed = cypher.trim();
    if trimmed.is_empty() || trimmed.starts_with(':') {
        return false;
    }
    !(cypher.contains('<') && cypher.contains('>'))
}

pub fn requires_gds(cypher: &str) -> bool {
    cypher.to_lowercase().contains("gds.")
}

pub fn requires_apoc(cypher: &str) -> bool {
    cypher.to_lowercase().contains("apoc.")
}

pub fn is_constraint_creation(cypher: &str) -> bool {
    cypher.to_lowercase().contains("create constraint")
}

/// Statements that start with CREATE or MERGE.
pub fn is_data_creation(cypher: &str) -> bool {
    let lower = cypher.trim().to_lowercase();
    lower.starts_with("create ") || lower.starts_with("merge ")
}

/// Read-only MATCH statements.
pub fn is_data_query(cypher: &str) -> bool {
    let lower = cypher.trim().to_lowercase();
    lower.starts_with("match ") && !lower.contains("create ") && !lower.contains("merge ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAB: &str = "# Neo4j Lab 2: Cypher Fundamentals

Intro text.

```cypher
// Create a customer
CREATE (c:Customer {customer_number: 'CUST-001234'})
RETURN c.customer_number // the key
```

Some prose.

```bash
echo not cypher
```

```cypher
:play movies
```

```cypher
MATCH (c:Customer)

RETURN count(c) AS customers
```
";

    #[test]
    fn test_extracts_numbered_cypher_blocks() {
        let blocks = extract_cypher_blocks(LAB);
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].number, 1);
        assert_eq!(blocks[2].number, 3);
        assert!(blocks[0].raw.starts_with("// Create a customer"));
        assert_eq!(blocks[1].raw, ":play movies");
    }

    #[test]
    fn test_no_blocks() {
        assert!(extract_cypher_blocks("plain text\n```\nMATCH (n)\n```").is_empty());
    }

    #[test]
    fn test_clean_cypher() {
        let blocks = extract_cypher_blocks(LAB);
        assert_eq!(
            blocks[0].cleaned(),
            "CREATE (c:Customer {customer_number: 'CUST-001234'})\nRETURN c.customer_number"
        );
        assert_eq!(
            blocks[2].cleaned(),
            "MATCH (c:Customer)\nRETURN count(c) AS customers"
        );
        assert_eq!(clean_cypher("// only a comment\n\n   // another"), "");
    }

    #[test]
    fn test_is_executable() {
        assert!(is_executable("MATCH (n) RETURN count(n)"));
        assert!(!is_executable(""));
        assert!(!is_executable("   "));
        assert!(!is_executable(":schema"));
        assert!(!is_executable("MATCH (c:Customer {id: '<customer-id>'}) RETURN c.id"));
        // A lone comparison operator is not a template.
        assert!(is_executable("MATCH (p:Policy) WHERE p.annual_premium > 1000 RETURN p.policy_number"));
    }

    #[test]
    fn test_classifiers() {
        assert!(requires_gds("CALL GDS.pageRank.stream('g')"));
        assert!(!requires_gds("MATCH (n) RETURN n.gds"));
        assert!(requires_apoc("RETURN apoc.version()"));
        assert!(is_constraint_creation(
            "CREATE CONSTRAINT customer_number IF NOT EXISTS FOR (c:Customer) REQUIRE c.customer_number IS UNIQUE"
        ));
        assert!(is_data_creation("  create (c:Customer {id: 1})"));
        assert!(is_data_creation("MERGE (p:Product {code: 'AUTO'})"));
        assert!(!is_data_creation("MATCH (c) CREATE (d)"));
        assert!(is_data_query("MATCH (c:Customer) RETURN c.id"));
        assert!(!is_data_query("MATCH (c:Customer) MERGE (c)-[:X]->(:Y)"));
        assert!(!is_data_query("CREATE (n)"));
    }
}
