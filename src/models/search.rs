use serde::{Deserialize, Serialize};

use super::record::FileRecord;

/// A record matched by a search.
///
/// `id` is the byte offset of the record's line in the index file. It stays valid only
/// until the index is rebuilt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultEntry {
    pub id: u64,
    #[serde(flatten)]
    pub record: FileRecord,
}
