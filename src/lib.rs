//! Explore Index - index a directory tree into a line-oriented record file and search it
//!
//! Each regular file under the source root becomes one JSON line carrying its name, its
//! `/`-separated path relative to the root, its lower-cased extension and the tags
//! extracted from its name by a configurable regular expression. It supports:
//!
//! - Building the index plus extension and tag dictionaries, skipped when the source
//!   root's modification time is unchanged since the last build
//! - Streaming the index record by record with each record's byte offset as its id
//! - Conjunctive name/path/extension/tag search with a result limit
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use explore_index::{Indexer, ScanConfig, SearchFilter, search};
//!
//! let config = ScanConfig::default();
//! let indexer = Indexer::new(&config)?;
//! indexer.create(Path::new("/srv/photos"), Path::new("/var/lib/explore-index"))?;
//!
//! let filter = SearchFilter::new().with_ext("jpg").with_tag("cat");
//! let index_path = config.index_path(Path::new("/var/lib/explore-index"));
//! for entry in search(&index_path, &filter, Some(20))? {
//!     println!("{} {}", entry.id, entry.record.path);
//! }
//! # Ok::<(), explore_index::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod filters;
pub mod index_file;
pub mod index_storage;
pub mod indexer;
pub mod models;
pub mod search;
pub mod utils;

// Re-export commonly used types
pub use config::{Config, ScanConfig};
pub use error::{Error, Result};
pub use filters::{SearchFilter, parse_filter};
pub use index_file::RecordStream;
pub use indexer::{BuildOutcome, BuildStats, Indexer, init_index};
pub use models::{FileRecord, SearchResultEntry};
pub use search::{SearchPage, read_record_at, search, search_from};
