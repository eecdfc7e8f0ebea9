// src/lint.rs
// =============================================================================
// Quick structural checks for HTML and CSS source.
//
// This is not a validator. It catches the mistakes that break a hand-written
// page most often:
//
//   HTML: missing <!DOCTYPE html>, unbalanced <html>/<head>/<body> tags
//   CSS:  unbalanced braces, declarations inside a block missing their ';'
//
// Which rules apply depends on the SourceKind, decided once by
// SourceKind::detect.
// =============================================================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// The language of a piece of source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceKind {
    Html,
    Css,
}

impl SourceKind {
    /// Markup starts with a tag, so text whose first non-blank character is
    /// `<` is HTML. Everything else is treated as CSS.
    pub fn detect(source: &str) -> Self {
        if source.trim_start().starts_with('<') {
            SourceKind::Html
        } else {
            SourceKind::Css
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SourceKind::Html => "HTML",
            SourceKind::Css => "CSS",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintIssue {
    /// 1-based line number, for issues tied to one line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    pub message: String,
}

impl LintIssue {
    fn document(message: impl Into<String>) -> Self {
        Self {
            line: None,
            message: message.into(),
        }
    }

    fn at_line(line: usize, message: impl Into<String>) -> Self {
        Self {
            line: Some(line),
            message: message.into(),
        }
    }
}

impl fmt::Display for LintIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "Line {}: {}", line, self.message),
            None => f.write_str(&self.message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintReport {
    pub kind: SourceKind,
    pub issues: Vec<LintIssue>,
}

impl LintReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Detects the kind of `source` and runs the matching checks.
pub fn lint_source(source: &str) -> LintReport {
    let kind = SourceKind::detect(source);
    let issues = match kind {
        SourceKind::Html => lint_html(source),
        SourceKind::Css => lint_css(source),
    };
    LintReport { kind, issues }
}

fn lint_html(source: &str) -> Vec<LintIssue> {
    let lowered = source.trim().to_lowercase();
    let mut issues = Vec::new();

    // Only the HTML5 form counts; legacy DOCTYPEs with a public id are flagged.
    if !lowered.starts_with("<!doctype html>") {
        issues.push(LintIssue::document(
            "Missing <!DOCTYPE html> declaration at the beginning.",
        ));
    }

    for tag in ["html", "head", "body"] {
        let closing = format!("</{}>", tag);
        if count_open_tags(&lowered, tag) != lowered.matches(&closing).count() {
            issues.push(LintIssue::document(format!("Mismatched <{}> tags.", tag)));
        }
    }

    issues
}

// Counts `<tag>` and `<tag ...>` but not longer names sharing the prefix,
// so <header> is not a <head>.
fn count_open_tags(lowered: &str, tag: &str) -> usize {
    let opening = format!("<{}", tag);
    lowered
        .match_indices(&opening)
        .filter(|(index, _)| {
            match lowered[index + opening.len()..].chars().next() {
                Some(c) => c == '>' || c == '/' || c.is_whitespace(),
                None => false,
            }
        })
        .count()
}

fn lint_css(source: &str) -> Vec<LintIssue> {
    let mut issues = Vec::new();

    if source.matches('{').count() != source.matches('}').count() {
        issues.push(LintIssue::document("Mismatched curly braces {}."));
    }

    let mut in_block = false;
    for (index, raw_line) in source.lines().enumerate() {
        let line = raw_line.trim();
        if line.contains('{') {
            in_block = true;
        }
        if line.contains('}') {
            in_block = false;
        }

        let terminated = line.ends_with('{') || line.ends_with('}') || line.ends_with(';');
        if in_block && !line.is_empty() && !terminated && !is_comment(line) {
            issues.push(LintIssue::at_line(index + 1, "Missing semicolon ';'."));
        }
    }

    issues
}

fn is_comment(line: &str) -> bool {
    line.starts_with("/*") || line.starts_with('*') || line.ends_with("*/")
}
