//! Lab introduction slide headings.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static INTRO_SLIDE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"<!-- Lab (\d+) Introduction -->\s*\n\s*<section>\s*\n\s*<div class="lab-intro">\s*\n\s*<h2>🔧 Lab Introduction:([^<]+)</h2>"#,
    )
    .expect("intro slide regex")
});

static INTRO_SPACING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(🔧 Lab \d+ Introduction):([A-Z])").expect("intro spacing regex")
});

/// Put the lab number from the preceding comment into each unnumbered
/// `🔧 Lab Introduction:` heading. The slide block is re-indented.
pub fn number_intro_slides(html: &str) -> String {
    INTRO_SLIDE
        .replace_all(html, |c: &Captures| {
            let lab = &c[1];
            let topic = c[2].trim();
            format!(
                "<!-- Lab {lab} Introduction -->\n            <section>\n                <div class=\"lab-intro\">\n                    <h2>🔧 Lab {lab} Introduction: {topic}</h2>"
            )
        })
        .into_owned()
}

/// `🔧 Lab N Introduction:Topic` becomes `🔧 Lab N Introduction: Topic`.
pub fn fix_intro_spacing(html: &str) -> String {
    INTRO_SPACING.replace_all(html, "${1}: ${2}").into_owned()
}
