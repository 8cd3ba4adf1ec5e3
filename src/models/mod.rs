//! Data models for the file index.
//!
//! - [`FileRecord`] - One indexed file, one line of the index file
//! - [`SearchResultEntry`] - A matched record plus its byte offset in the index file

pub mod record;
pub mod search;

pub use record::FileRecord;
pub use search::SearchResultEntry;
