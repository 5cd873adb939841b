pub mod enumerator;
pub mod filter;
pub mod relocator;

pub use enumerator::{DirectoryEnumerator, MoveOutcome};
pub use filter::ExtensionFilter;
pub use relocator::{FileRelocator, RelocationProgress};
