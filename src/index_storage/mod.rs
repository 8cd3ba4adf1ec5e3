//! Files written next to the index
//!
//! - the rebuild metadata (`meta.json` by default): source root mtime at the last build
//!   and when that build ran, used to skip rebuilds of an unchanged tree
//! - the extension dictionary: JSON object, every extension seen mapped to `true`
//! - the tag dictionary: JSON array of every distinct tag
//!
//! All three are written atomically (temp file + rename). The metadata is always written
//! last, so an interrupted build leaves stale metadata and the next run rebuilds.

pub mod metadata;
pub mod persistence;

pub use metadata::{RebuildMetadata, modified_time};
pub use persistence::{
    load_extension_dictionary, load_tag_dictionary, save_extension_dictionary, save_metadata,
    save_tag_dictionary,
};
