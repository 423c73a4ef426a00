//! Lab headings that must agree with the number in the file name.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^# Neo4j Lab \d+:").expect("title regex"));
static SUMMARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"## Neo4j Lab \d+ Summary").expect("summary regex"));
static BOOK_SUMMARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"## 📚 Lab \d+ Summary").expect("book summary regex"));
static COMPLETION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Lab \d+ (Database State|completion|Completion Verification)")
        .expect("completion regex")
});

/// Renumber the title, the summary headings and the completion markers of
/// a lab document to `lab`. Only the first title heading is touched.
pub fn fix_titles(content: &str, lab: u32) -> String {
    let content = TITLE.replacen(content, 1, format!("# Neo4j Lab {lab}:").as_str());
    let content = SUMMARY.replace_all(&content, format!("## Neo4j Lab {lab} Summary").as_str());
    let content = BOOK_SUMMARY.replace_all(&content, format!("## 📚 Lab {lab} Summary").as_str());
    COMPLETION
        .replace_all(&content, |c: &Captures| format!("Lab {lab} {}", &c[1]))
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "# Neo4j Lab 9: Fraud Detection\n\
\n\
Intro mentions Lab 9 once.\n\
\n\
# Neo4j Lab 9: Appendix\n\
\n\
## Neo4j Lab 9 Summary\n\
## 📚 Lab 9 Summary\n\
Lab 9 Database State: 450 nodes\n\
Lab 9 completion checklist\n\
Lab 9 Completion Verification\n";

    #[test]
    fn test_fix_titles() {
        let fixed = fix_titles(DOC, 8);
        assert!(fixed.starts_with("# Neo4j Lab 8: Fraud Detection\n"));
        // Only the first title heading changes.
        assert!(fixed.contains("# Neo4j Lab 9: Appendix"));
        // Prose references are left for the reference rewrite.
        assert!(fixed.contains("Intro mentions Lab 9 once."));
        assert!(fixed.contains("## Neo4j Lab 8 Summary"));
        assert!(fixed.contains("## 📚 Lab 8 Summary"));
        assert!(fixed.contains("Lab 8 Database State: 450 nodes"));
        assert!(fixed.contains("Lab 8 completion checklist"));
        assert!(fixed.contains("Lab 8 Completion Verification"));
    }

    #[test]
    fn test_title_must_start_a_line() {
        let text = "See # Neo4j Lab 3: inline\n";
        assert_eq!(fix_titles(text, 4), text);
    }

    #[test]
    fn test_already_correct_is_unchanged() {
        let text = "# Neo4j Lab 2: Cypher\n## Neo4j Lab 2 Summary\n";
        assert_eq!(fix_titles(text, 2), text);
    }
}
