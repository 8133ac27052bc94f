//! Table-of-contents extraction from rendered HTML content.
//!
//! This is a best-effort scan, not an HTML parse. Opening `<h2>`/`<h3>` tags
//! may carry attributes; a match is terminated by the first closing tag of the
//! identical name, and heading bodies do not span line breaks. Anything
//! malformed simply yields no entry.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static OPEN_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(h[23])[^>]*>").expect("valid heading regex"));

static H2_PAIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<h2[^>]*>(.*?)</h2>").expect("valid h2 regex"));

/// Heading level carried by a [`TocEntry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
    H2,
    H3,
}

impl HeadingLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::H2 => "h2",
            Self::H3 => "h3",
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "h2" => Some(Self::H2),
            "h3" => Some(Self::H3),
            _ => None,
        }
    }
}

/// One table-of-contents entry, derived at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    pub level: HeadingLevel,
    pub text: String,
}

/// Extract `<h2>`/`<h3>` headings in document order.
///
/// Entry text is the span between the tags, trimmed, with any inner markup
/// kept verbatim. A `<h2>` is never closed by `</h3>`; an unterminated
/// opening tag contributes nothing and scanning continues after it.
pub fn extract_toc(html: &str) -> Vec<TocEntry> {
    let mut entries = Vec::new();
    let mut pos = 0;

    while let Some(caps) = OPEN_HEADING.captures(&html[pos..]) {
        let open = caps.get(0).expect("whole match always present");
        let tag = &caps[1];
        let body_start = pos + open.end();

        let closing = format!("</{tag}>");
        let rest = &html[body_start..];

        match rest.find(&closing) {
            // A newline before the closing tag means the pair is treated as
            // unterminated, matching the line-bounded reference scan.
            Some(close_idx) if !rest[..close_idx].contains('\n') => {
                if let Some(level) = HeadingLevel::from_tag(tag) {
                    entries.push(TocEntry {
                        level,
                        text: rest[..close_idx].trim().to_string(),
                    });
                }
                pos = body_start + close_idx + closing.len();
            }
            _ => {
                pos = body_start;
            }
        }
    }

    entries
}

/// The simpler variant used on detail pages: `<h2>` heading text only,
/// no level tagging, same non-greedy matching rule.
pub fn heading_titles(html: &str) -> Vec<String> {
    H2_PAIR
        .captures_iter(html)
        .map(|caps| caps[1].trim().to_string())
        .collect()
}
