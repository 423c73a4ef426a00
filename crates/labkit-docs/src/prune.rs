//! Removal of retired course content from the three slide decks.
//!
//! Graph Data Science was dropped from the course along with the labs that
//! taught it (7) and the innovation showcase (17). Each deck has its own
//! list of literal removals.

use std::path::Path;
use std::sync::LazyLock;

use labkit_core::layout;
use regex::Regex;

use crate::error::Result;
use crate::files::{self, FileChange};

/// One removal or replacement applied to a deck.
struct Rule {
    pattern: Regex,
    replacement: &'static str,
}

fn rule(pattern: &str, replacement: &'static str) -> Rule {
    Rule {
        pattern: Regex::new(pattern).expect("prune rule regex"),
        replacement,
    }
}

/// Drop a whole slide from its marker comment to the end of its section.
fn slide(marker: &str) -> Rule {
    rule(&format!(r"(?s){marker}.*?</section>\s*</section>"), "")
}

static DECK_1: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        rule(r"\s*<li><strong>GDS:</strong> Advanced graph algorithms</li>\n", ""),
        rule(r"APOC, GDS, Bloom", "APOC, Bloom"),
    ]
});

static DECK_2: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        rule(r"Graph Data Science \| ", ""),
        rule(r"\s*<li><strong>GDS Library:</strong> Production algorithms</li>\n", ""),
        slide(r"<!-- Session 7"),
        slide(r"<!-- Graph Path Functions for Lab 7 -->"),
        slide(r"<!-- Lab 7 Introduction -->"),
        rule(r"<strong>Lab 7 Application:</strong>[^<]+", ""),
        rule(
            r"graph algorithms, fraud detection, and predictive capabilities",
            "fraud detection and predictive capabilities",
        ),
    ]
});

static DECK_3: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        rule(
            r"\s*<li><strong>Graph Data Science Certification:</strong> Advanced analytics and ML</li>\n",
            "",
        ),
        slide(r"<!-- Slide 59: Lab 17 Introduction -->"),
        slide(r"<!-- Slide 60: Lab 17 AI/ML Integration -->"),
        slide(r"<!-- Slide 61: Lab 17 IoT Integration -->"),
        slide(r"<!-- Slide 62: Lab 17 Blockchain Integration -->"),
        slide(r"<!-- Slide 63: Lab 17 Advanced Visualization -->"),
    ]
});

fn apply(rules: &[Rule], html: &str) -> String {
    rules.iter().fold(html.to_string(), |text, r| {
        r.pattern.replace_all(&text, r.replacement).into_owned()
    })
}

/// Deck 1: the GDS feature item and its mention in the tooling list.
pub fn prune_presentation_1(html: &str) -> String {
    apply(&DECK_1, html)
}

/// Deck 2: GDS mentions, the Session 7 slide and the Lab 7 slides.
pub fn prune_presentation_2(html: &str) -> String {
    apply(&DECK_2, html)
}

/// Deck 3: the GDS certification item and the Lab 17 slides 59-63.
pub fn prune_presentation_3(html: &str) -> String {
    apply(&DECK_3, html)
}

/// Prune decks 1-3 in `dir`. Every deck must exist.
pub fn prune_presentations(dir: &Path, dry_run: bool) -> Result<Vec<FileChange>> {
    let decks: [(u32, fn(&str) -> String); 3] = [
        (1, prune_presentation_1),
        (2, prune_presentation_2),
        (3, prune_presentation_3),
    ];
    decks
        .into_iter()
        .map(|(n, prune)| {
            files::rewrite_file(&layout::presentation_path(dir, n), dry_run, |_, html| {
                Ok(Some(prune(html)))
            })
        })
        .collect()
}
