//! Email-like token recognition and normalisation.
//!
//! The grammar is deliberately loose and must stay byte-for-byte compatible
//! with previously produced outputs:
//!
//! ```text
//! local  ::= [A-Za-z0-9._%+-]+
//! domain ::= [A-Za-z0-9.-]+
//! tld    ::= [A-Za-z]{2,}
//! token  ::= local "@" domain "." tld
//! ```
//!
//! Matching is leftmost-first with greedy repetition and matches never
//! overlap. Nothing beyond the grammar is validated: consecutive dots,
//! leading dots and unregistrable suffixes are all accepted.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::LazyLock;

/// Source pattern for [`find_tokens`].
pub const EMAIL_PATTERN: &str = r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}";

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"));

/// A substring of the input recognised by the token grammar.
///
/// Equality and hashing look at `value` only; `start` is positional metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextToken {
    pub value: String,
    /// Byte offset of the match in the scanned text.
    pub start: usize,
}

impl TextToken {
    pub fn new<S: Into<String>>(value: S, start: usize) -> Self {
        Self {
            value: value.into(),
            start,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl PartialEq for TextToken {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for TextToken {}

impl Hash for TextToken {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl fmt::Display for TextToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl From<TextToken> for String {
    fn from(token: TextToken) -> Self {
        token.value
    }
}

/// Lazily yields tokens in document order.
pub fn iter_tokens(text: &str) -> impl Iterator<Item = TextToken> + '_ {
    EMAIL_REGEX
        .find_iter(text)
        .map(|m| TextToken::new(m.as_str(), m.start()))
}

/// Every grammar match in `text`, in document order, duplicates included.
pub fn find_tokens(text: &str) -> Vec<TextToken> {
    iter_tokens(text).collect()
}

/// Sorted, duplicate-free token values.
///
/// Ordering is by code point, so uppercase sorts before lowercase and
/// `A@B.CO` and `a@b.co` are distinct entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchSet(Vec<String>);

impl MatchSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.0
            .binary_search_by(|probe| probe.as_str().cmp(value))
            .is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl<'a> IntoIterator for &'a MatchSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for MatchSet {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Collapses exact-string duplicates and sorts the survivors.
///
/// Accepts raw tokens as well as plain strings, so normalising an already
/// normalised set is a no-op.
pub fn normalize<I, T>(tokens: I) -> MatchSet
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    // UTF-8 byte order coincides with code-point order.
    let unique: BTreeSet<String> = tokens.into_iter().map(Into::into).collect();
    MatchSet(unique.into_iter().collect())
}

/// `normalize(find_tokens(text))`.
pub fn collect_emails(text: &str) -> MatchSet {
    normalize(iter_tokens(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(tokens: &[TextToken]) -> Vec<&str> {
        tokens.iter().map(TextToken::as_str).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(find_tokens("").is_empty());
        assert!(collect_emails("").is_empty());
    }

    #[test]
    fn test_document_order_with_duplicates() {
        let text = "contact a@b.co and A@B.CO and a@b.co";
        let tokens = find_tokens(text);

        assert_eq!(values(&tokens), vec!["a@b.co", "A@B.CO", "a@b.co"]);
        assert_eq!(
            tokens.iter().map(|t| t.start).collect::<Vec<_>>(),
            vec![8, 19, 30]
        );
    }

    #[test]
    fn test_token_identity_ignores_offset() {
        let tokens = find_tokens("a@b.co a@b.co A@B.CO");
        assert_eq!(tokens[0].start, 0);
        assert_eq!(tokens[1].start, 7);
        assert_eq!(tokens[0], tokens[1]);
        assert_ne!(tokens[0], tokens[2]);

        let unique: std::collections::HashSet<_> = tokens.into_iter().collect();
        assert_eq!(unique.len(), 2);
    }

    #[test]
    fn test_case_sensitive_dedup_and_code_point_order() {
        let text = "contact a@b.co and A@B.CO and a@b.co";
        let set = normalize(find_tokens(text));

        assert_eq!(set.as_slice(), &["A@B.CO".to_string(), "a@b.co".to_string()]);
        assert!(set.contains("a@b.co"));
        assert!(!set.contains("b@b.co"));
    }

    #[test]
    fn test_doubled_at_sign_yields_nothing() {
        // Neither side of "@@" can satisfy local "@" domain on its own.
        assert!(find_tokens("user@@example.com").is_empty());
    }

    #[test]
    fn test_loose_grammar_is_preserved() {
        let tokens = find_tokens("x..y@-sub..example.co.uk");
        assert_eq!(values(&tokens), vec!["x..y@-sub..example.co.uk"]);

        // Trailing sentence punctuation is not part of the token.
        let tokens = find_tokens("write to name@domain.com.");
        assert_eq!(values(&tokens), vec!["name@domain.com"]);
    }

    #[test]
    fn test_short_tld_is_rejected() {
        assert!(find_tokens("a@b.c").is_empty());
    }

    #[test]
    fn test_greedy_tld_consumes_following_letters() {
        let tokens = find_tokens("a@b.coc@d.org");
        assert_eq!(values(&tokens), vec!["a@b.coc"]);
    }

    #[test]
    fn test_tokens_inside_markup() {
        let text = "<a href=\"mailto:jane.doe+news@mail.example.org\">Jane</a>";
        let tokens = find_tokens(text);
        assert_eq!(values(&tokens), vec!["jane.doe+news@mail.example.org"]);
        assert_eq!(tokens[0].start, "<a href=\"mailto:".len());
    }

    #[test]
    fn test_multiline_input() {
        let text = "first: one@example.com\nsecond: two@example.net\r\nthird: one@example.com";
        let set = collect_emails(text);
        assert_eq!(set.into_vec(), vec!["one@example.com", "two@example.net"]);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let text = "z@z.zz y@y.yy z@z.zz A@a.aa";
        let once = collect_emails(text);
        let twice = normalize(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_normalize_independent_of_occurrence_order() {
        let forward = normalize(vec!["b@x.io", "a@x.io", "b@x.io"]);
        let backward = normalize(vec!["b@x.io", "b@x.io", "a@x.io"]);
        assert_eq!(forward, backward);
        assert_eq!(forward.len(), 2);
    }

    #[test]
    fn test_normalize_does_not_touch_whitespace() {
        let set = normalize(vec!["a@b.co", " a@b.co"]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.iter().next(), Some(" a@b.co"));
    }

    #[test]
    fn test_match_set_serializes_as_list() {
        let set = collect_emails("b@x.io a@x.io");
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["a@x.io","b@x.io"]"#);
    }
}
