//! hit_formatter.rs
//!
//! Renders search hits for the terminal:
//! - title line (or the `Untitled` placeholder)
//! - one line per highlight, whitespace collapsed

use std::io::{self, Write};

use crate::client::document_store::SearchHit;

pub const UNTITLED: &str = "Untitled";

/// Title to print for a hit, as stored; blank titles count as missing.
pub fn display_title(hit: &SearchHit) -> &str {
    hit.title
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or(UNTITLED)
}

/// Collapse every whitespace run (newlines included) to one space.
pub fn normalize_whitespace(snippet: &str) -> String {
    snippet.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn write_hit<W: Write>(out: &mut W, hit: &SearchHit) -> io::Result<()> {
    writeln!(out, "{}", display_title(hit))?;
    for snippet in &hit.snippets {
        writeln!(out, "{}", normalize_whitespace(snippet))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn hit(title: Option<&str>, snippets: &[&str]) -> SearchHit {
        SearchHit {
            id: "id".to_string(),
            title: title.map(str::to_string),
            snippets: snippets.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[rstest]
    #[case("plain text", "plain text")]
    #[case("  leading and trailing  ", "leading and trailing")]
    #[case("line one\nline two", "line one line two")]
    #[case("tabs\t\tand\r\n\r\nblank lines", "tabs and blank lines")]
    #[case("the <em>budget</em>   for\n2024", "the <em>budget</em> for 2024")]
    #[case("", "")]
    fn collapses_whitespace(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_whitespace(input), expected);
    }

    #[rstest]
    #[case(Some("Quarterly Report"), "Quarterly Report")]
    #[case(None, "Untitled")]
    #[case(Some(""), "Untitled")]
    #[case(Some("   "), "Untitled")]
    #[case(Some(" Annual Report "), " Annual Report ")]
    fn title_or_placeholder(#[case] title: Option<&str>, #[case] expected: &str) {
        assert_eq!(display_title(&hit(title, &[])), expected);
    }

    #[test]
    fn writes_title_then_snippets() {
        let mut out = Vec::new();
        write_hit(&mut out, &hit(None, &["a\n b", "c   d"])).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Untitled\na b\nc d\n");
    }
}
