//! Slug generation for post URLs.

/// Turn a title into a URL-safe slug: ASCII alphanumerics lowercased, every
/// other run of characters collapsed into a single `-`, no leading or
/// trailing separator.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_sep = false;

    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_sep && !slug.is_empty() {
                slug.push('-');
            }
            pending_sep = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_sep = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::slugify;

    #[test]
    fn lowercases_and_joins_words() {
        assert_eq!(slugify("Hello World"), "hello-world");
    }

    #[test]
    fn collapses_punctuation_runs() {
        assert_eq!(slugify("Rust: Tips & Tricks!"), "rust-tips-tricks");
    }

    #[test]
    fn strips_leading_and_trailing_separators() {
        assert_eq!(slugify("  ...Edge Case...  "), "edge-case");
    }

    #[test]
    fn keeps_digits() {
        assert_eq!(slugify("Top 10 Crates of 2025"), "top-10-crates-of-2025");
    }

    #[test]
    fn empty_title_gives_empty_slug() {
        assert_eq!(slugify("!!!"), "");
    }
}
