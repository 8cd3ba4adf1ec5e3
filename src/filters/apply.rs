use super::ast::SearchFilter;
use crate::models::FileRecord;

/// Evaluate a filter against one record
///
/// - `name`, `path`: case-sensitive substring
/// - `ext`: case-sensitive equality with the stored (lower-case) extension
/// - `tag`: case-sensitive equality with any of the record's tags
///
/// Criteria are AND'd; empty criteria are skipped.
pub fn matches_filter(record: &FileRecord, filter: &SearchFilter) -> bool {
    (filter.path.is_empty() || record.path.contains(&filter.path))
        && (filter.name.is_empty() || record.name.contains(&filter.name))
        && (filter.ext.is_empty() || record.ext == filter.ext)
        && (filter.tag.is_empty() || record.has_tag(&filter.tag))
}

impl SearchFilter {
    pub fn matches(&self, record: &FileRecord) -> bool {
        matches_filter(record, self)
    }
}
