pub mod field;
pub mod tokens;

pub use field::{
    extract_field, extract_title, ExtractedField, NO_TITLE_FALLBACK, TITLE_CLOSE_TAG,
    TITLE_OPEN_TAG,
};
pub use tokens::{collect_emails, find_tokens, iter_tokens, normalize, MatchSet, TextToken};
