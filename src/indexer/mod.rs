//! Index building for a source directory tree
//!
//! # Error Handling Strategy
//!
//! - **Configuration errors**: an invalid tag pattern fails [`Indexer::new`] before any
//!   file is touched. It is fatal ([`Error::is_fatal`](crate::Error::is_fatal)) and the
//!   binary exits on it.
//!
//! - **Entry-level failures**: an entry that cannot be read during the walk is logged at
//!   `warn` and skipped, so one unreadable directory doesn't lose the whole index.
//!
//! - **Output failures**: failing to create or write the index, a dictionary or the
//!   rebuild metadata aborts the build and is returned to the caller.
//!
//! - **Crash safety**: the rebuild metadata is written last. When [`Indexer::create`] is
//!   interrupted, the stale metadata it started from is still on disk, so the next run
//!   rebuilds instead of trusting partial output.

pub mod builder;
pub mod tags;
pub mod walker;

pub use builder::{BuildOutcome, BuildStats, Indexer, init_index};
pub use tags::TagExtractor;
pub use walker::{WalkSummary, walk_source_tree};
