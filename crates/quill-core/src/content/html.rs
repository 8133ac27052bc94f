//! Plaintext-to-HTML normalization applied on the write path.
//!
//! Uses the same line policy as the block classifier so that structured reads
//! and rendered reads agree on what is a heading: marker lines become `<h2>`,
//! short title-case lines `<h3>`, everything else `<p>`. Lines that already
//! contain markup are passed through untouched.

use super::blocks::{BlockKind, classify_line};

/// Normalize raw content into storable HTML. Blank lines are dropped.
pub fn render_html(content: &str) -> String {
    let mut out = String::with_capacity(content.len());

    for line in content.lines().map(str::trim) {
        if line.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push('\n');
        }
        if line.contains('<') {
            out.push_str(line);
            continue;
        }

        let block = classify_line(line);
        match block.kind {
            BlockKind::Heading => {
                out.push_str("<h2>");
                out.push_str(&block.text);
                out.push_str("</h2>");
            }
            BlockKind::Subheading => {
                out.push_str("<h3>");
                out.push_str(&block.text);
                out.push_str("</h3>");
            }
            BlockKind::Paragraph => {
                out.push_str("<p>");
                out.push_str(&block.text);
                out.push_str("</p>");
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::render_html;
    use crate::content::{HeadingLevel, extract_toc};

    #[test]
    fn renders_marker_title_and_body_lines() {
        let html = render_html("📘 Intro\nGetting Started\nplain body text.");
        assert_eq!(
            html,
            "<h2>Intro</h2>\n<h3>Getting Started</h3>\n<p>plain body text.</p>"
        );
    }

    #[test]
    fn existing_markup_is_passed_through() {
        let html = render_html("<h2>Already HTML</h2>\nsome text.");
        assert_eq!(html, "<h2>Already HTML</h2>\n<p>some text.</p>");
    }

    #[test]
    fn blank_lines_are_dropped() {
        let html = render_html("one.\n\n\ntwo.");
        assert_eq!(html, "<p>one.</p>\n<p>two.</p>");
    }

    #[test]
    fn rendered_output_feeds_the_toc_extractor() {
        let html = render_html("📘 Overview\nFirst Steps\nbody.");
        let toc = extract_toc(&html);
        assert_eq!(toc.len(), 2);
        assert_eq!(toc[0].level, HeadingLevel::H2);
        assert_eq!(toc[0].text, "Overview");
        assert_eq!(toc[1].level, HeadingLevel::H3);
        assert_eq!(toc[1].text, "First Steps");
    }
}
