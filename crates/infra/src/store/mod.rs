//! Snapshot persistence boundary.
//!
//! The engine only depends on [`FundStore`]; where the snapshot lives is up to
//! the implementation.

pub mod in_memory;
pub mod json_file;
pub mod r#trait;

pub use in_memory::InMemoryFundStore;
pub use json_file::JsonFileFundStore;
pub use r#trait::{FundStore, StoreError};
