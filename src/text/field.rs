//! Delimited-field lookup, used to pull the `<title>` out of fetched pages.
//!
//! This is a single-pass substring search and not a markup parser: entities
//! are left encoded, nesting is ignored and only the first enclosed region
//! counts.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

pub const TITLE_OPEN_TAG: &str = "<title>";
pub const TITLE_CLOSE_TAG: &str = "</title>";

/// Written in place of a title when a page has none.
pub const NO_TITLE_FALLBACK: &str = "No title found";

static TITLE_REGEX: LazyLock<Option<Regex>> =
    LazyLock::new(|| delimiter_regex(TITLE_OPEN_TAG, TITLE_CLOSE_TAG));

/// Outcome of a delimiter-pair search. Absence is a normal result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtractedField {
    Present(String),
    Absent,
}

impl ExtractedField {
    pub fn is_present(&self) -> bool {
        matches!(self, ExtractedField::Present(_))
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            ExtractedField::Present(value) => Some(value),
            ExtractedField::Absent => None,
        }
    }

    /// The field value, or `fallback` when the field is absent.
    pub fn or_fallback(&self, fallback: &str) -> String {
        self.value().unwrap_or(fallback).to_string()
    }
}

impl From<Option<String>> for ExtractedField {
    fn from(value: Option<String>) -> Self {
        value.map_or(ExtractedField::Absent, ExtractedField::Present)
    }
}

/// Finds the first `open_tag` (case-insensitive), then the first
/// `close_tag` after it, and returns the trimmed text in between. The
/// interior may span lines.
pub fn extract_field(text: &str, open_tag: &str, close_tag: &str) -> ExtractedField {
    match delimiter_regex(open_tag, close_tag) {
        Some(regex) => first_enclosed(&regex, text),
        None => ExtractedField::Absent,
    }
}

/// [`extract_field`] with the `<title>` / `</title>` pair.
pub fn extract_title(html: &str) -> ExtractedField {
    match TITLE_REGEX.as_ref() {
        Some(regex) => first_enclosed(regex, html),
        None => ExtractedField::Absent,
    }
}

fn first_enclosed(regex: &Regex, text: &str) -> ExtractedField {
    regex
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|interior| interior.as_str().trim().to_string())
        .into()
}

fn delimiter_regex(open_tag: &str, close_tag: &str) -> Option<Regex> {
    let pattern = format!(
        "{}(.*?){}",
        regex::escape(open_tag),
        regex::escape(close_tag)
    );

    // Escaped literals only fail on the compiled-size limit.
    match RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .dot_matches_new_line(true)
        .build()
    {
        Ok(regex) => Some(regex),
        Err(e) => {
            log::warn!("Cannot search for delimiters {:?}/{:?}: {}", open_tag, close_tag, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_and_trimmed() {
        let html = "<html><TITLE>  Hello World  </TITLE></html>";
        assert_eq!(
            extract_field(html, "<title>", "</title>"),
            ExtractedField::Present("Hello World".to_string())
        );
        assert_eq!(extract_title(html).value(), Some("Hello World"));
    }

    #[test]
    fn test_missing_title_is_absent() {
        let html = "<html><body>no title here</body></html>";
        let field = extract_title(html);
        assert_eq!(field, ExtractedField::Absent);
        assert_eq!(field.or_fallback(NO_TITLE_FALLBACK), "No title found");
    }

    #[test]
    fn test_empty_input_is_absent() {
        assert_eq!(extract_field("", "<title>", "</title>"), ExtractedField::Absent);
        assert_eq!(extract_field("", "[", "]"), ExtractedField::Absent);
    }

    #[test]
    fn test_interior_spans_lines() {
        let html = "<head>\n<title>\n   Release\n   Notes\n</title>\n</head>";
        assert_eq!(extract_title(html).value(), Some("Release\n   Notes"));
    }

    #[test]
    fn test_only_first_region_counts() {
        let html = "<title>One</title><title>Two</title>";
        assert_eq!(extract_title(html).value(), Some("One"));
    }

    #[test]
    fn test_unclosed_or_reversed_tags_are_absent() {
        assert_eq!(extract_title("<title>never closed"), ExtractedField::Absent);
        assert_eq!(extract_title("</title>backwards<title>"), ExtractedField::Absent);
    }

    #[test]
    fn test_attributes_on_open_tag_do_not_match() {
        // The open marker is a literal, not an element name.
        assert_eq!(
            extract_title("<title lang=\"en\">Hi</title>"),
            ExtractedField::Absent
        );
    }

    #[test]
    fn test_entities_are_not_decoded() {
        let html = "<title>Fish &amp; Chips</title>";
        assert_eq!(extract_title(html).value(), Some("Fish &amp; Chips"));
    }

    #[test]
    fn test_empty_interior_is_present() {
        let field = extract_title("<title>   </title>");
        assert_eq!(field, ExtractedField::Present(String::new()));
        assert!(field.is_present());
    }

    #[test]
    fn test_custom_delimiters_are_literal() {
        let text = "value = [[ a.b* ]] and [[ later ]]";
        assert_eq!(extract_field(text, "[[", "]]").value(), Some("a.b*"));
        assert_eq!(extract_field("a+b", "(", ")"), ExtractedField::Absent);
    }

    #[test]
    fn test_serializes_as_optional_string() {
        let present = serde_json::to_string(&ExtractedField::Present("x".to_string())).unwrap();
        let absent = serde_json::to_string(&ExtractedField::Absent).unwrap();
        assert_eq!(present, "\"x\"");
        assert_eq!(absent, "null");
    }
}
