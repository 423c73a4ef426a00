//! Lab number references in markdown and slide decks.
//!
//! Every `Lab N` is remapped in one pass, so a reference moved from 9 to 8
//! is never moved again by the 8 to 7 rule.

use std::sync::LazyLock;

use labkit_core::LabMapping;
use regex::{Captures, Regex};

use crate::error::Result;

static LAB_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bLab (\d+)\b").expect("lab reference regex"));

/// Rewrite every whole-number `Lab N` through the mapping.
pub fn remap_lab_refs(content: &str, mapping: &LabMapping) -> String {
    LAB_REF
        .replace_all(content, |c: &Captures| match c[1].parse::<u32>() {
            Ok(n) => format!("Lab {}", mapping.remap(n)),
            Err(_) => c[0].to_string(),
        })
        .into_owned()
}

fn retired_alternation(retired: &[u32]) -> Option<String> {
    if retired.is_empty() {
        return None;
    }
    let numbers: Vec<String> = retired.iter().map(u32::to_string).collect();
    Some(format!("(?:{})", numbers.join("|")))
}

/// Delete "next lab" pointer lines that name a retired lab.
pub fn strip_retired_markdown(content: &str, retired: &[u32]) -> Result<String> {
    let Some(labs) = retired_alternation(retired) else {
        return Ok(content.to_string());
    };
    let pointers = Regex::new(&format!(
        r"(?:➡️\s+Next: Lab {labs}\b|🔜 Ready for Lab {labs}\b|\*\*Next Lab:\*\* Lab {labs}\b)[^\n]*\n"
    ))?;
    Ok(pointers.replace_all(content, "").into_owned())
}

/// Delete `<li><strong>Lab R…</strong>…</li>` items for retired labs,
/// with the whitespace that follows them.
pub fn strip_retired_html(content: &str, retired: &[u32]) -> Result<String> {
    let Some(labs) = retired_alternation(retired) else {
        return Ok(content.to_string());
    };
    let items = Regex::new(&format!(
        r"<li><strong>Lab {labs}\b[^<]*</strong>[^<]*</li>\s*"
    ))?;
    Ok(items.replace_all(content, "").into_owned())
}

/// Reference rewrite for a lab markdown file.
pub fn update_markdown_refs(content: &str, mapping: &LabMapping) -> Result<String> {
    strip_retired_markdown(&remap_lab_refs(content, mapping), mapping.retired())
}

/// Reference rewrite for a slide deck.
pub fn update_presentation_refs(content: &str, mapping: &LabMapping) -> Result<String> {
    strip_retired_html(&remap_lab_refs(content, mapping), mapping.retired())
}
