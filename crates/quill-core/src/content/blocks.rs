//! Line classifier - turns raw post content into typed content blocks.

use serde::{Deserialize, Serialize};

/// The marker glyph that promotes a line to a heading block.
const HEADING_MARKER: char = '📘';

/// Longest line (in code points) that still qualifies as a subheading.
const SUBHEADING_MAX_LEN: usize = 60;

/// Block kind for a classified line of content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Heading,
    Subheading,
    Paragraph,
}

impl BlockKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Heading => "heading",
            Self::Subheading => "subheading",
            Self::Paragraph => "paragraph",
        }
    }
}

/// A classified unit of post content, derived at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub kind: BlockKind,
    pub text: String,
}

/// Classify raw content into an ordered sequence of typed blocks.
///
/// Lines are trimmed; blank lines contribute nothing (no block, no gap).
/// Per line, the first matching rule wins:
///
/// 1. starts with the `📘` marker - heading, text is the remainder after the
///    marker and the character following it;
/// 2. title-case, no trailing period, at most 60 characters - subheading;
/// 3. anything else - paragraph.
pub fn classify(content: &str) -> Vec<ContentBlock> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(classify_line)
        .collect()
}

pub(crate) fn classify_line(line: &str) -> ContentBlock {
    if line.starts_with(HEADING_MARKER) {
        // Skip the marker and the character right after it (the conventional
        // separator space), matching the published behavior exactly.
        let text: String = line.chars().skip(2).collect();
        return ContentBlock {
            kind: BlockKind::Heading,
            text: text.trim().to_string(),
        };
    }

    if is_title_case(line) && !line.ends_with('.') && line.chars().count() <= SUBHEADING_MAX_LEN {
        return ContentBlock {
            kind: BlockKind::Subheading,
            text: line.to_string(),
        };
    }

    ContentBlock {
        kind: BlockKind::Paragraph,
        text: line.to_string(),
    }
}

/// ASCII title-case check: every whitespace-delimited word starts with an
/// uppercase letter, and every later letter in the word is lowercase.
fn is_title_case(line: &str) -> bool {
    let mut words = line.split_whitespace().peekable();
    if words.peek().is_none() {
        return false;
    }

    words.all(|word| {
        let mut chars = word.chars();
        match chars.next() {
            Some(first) if first.is_ascii_uppercase() => {
                chars.all(|c| !c.is_ascii_alphabetic() || c.is_ascii_lowercase())
            }
            _ => false,
        }
    })
}
