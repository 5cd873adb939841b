pub mod fetcher;

pub use fetcher::{parse_locator, validate_locator, DocumentFetcher, HttpFetcher};
