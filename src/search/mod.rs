//! Linear search over the index file
//!
//! The index is scanned front to back; there is no in-memory index. Each match carries
//! its byte offset as `id`, which [`read_record_at`] and [`search_from`] accept back.

pub mod engine;

pub use engine::{SearchPage, read_record_at, search, search_from};
