use std::fs::File;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::filters::SearchFilter;
use crate::index_file::RecordStream;
use crate::models::{FileRecord, SearchResultEntry};

/// One page of search results
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPage {
    /// Matches in file order
    pub entries: Vec<SearchResultEntry>,
    /// Where to resume when the limit cut the scan short and more lines follow; `None`
    /// when nothing is left to read
    pub next_offset: Option<u64>,
}

/// Search the whole index, returning at most `limit` matches in file order
///
/// `limit: None` means unbounded. A malformed record aborts the search.
pub fn search(
    index_path: &Path,
    filter: &SearchFilter,
    limit: Option<usize>,
) -> Result<Vec<SearchResultEntry>> {
    search_from(index_path, filter, limit, 0).map(|page| page.entries)
}

/// Search starting at byte offset `start`
///
/// `start` must be a record boundary: 0, or a `next_offset` returned by an earlier
/// page of the same index version.
pub fn search_from(
    index_path: &Path,
    filter: &SearchFilter,
    limit: Option<usize>,
    start: u64,
) -> Result<SearchPage> {
    let mut page = SearchPage::default();
    let mut stream = open_stream(index_path)?;
    if start > 0 {
        stream.seek_to(start)?;
    }

    if limit == Some(0) {
        page.next_offset = next_offset(&mut stream)?;
        return Ok(page);
    }

    let mut scanned = 0usize;
    while let Some((id, record)) = stream.next_record()? {
        scanned += 1;
        if !filter.matches(&record) {
            continue;
        }

        page.entries.push(SearchResultEntry { id, record });
        if limit.is_some_and(|limit| page.entries.len() >= limit) {
            page.next_offset = next_offset(&mut stream)?;
            break;
        }
    }

    debug!(
        "Scanned {} records from offset {} in {}, {} matched",
        scanned,
        start,
        index_path.display(),
        page.entries.len()
    );
    Ok(page)
}

/// Read the record whose line starts at byte offset `id`
pub fn read_record_at(index_path: &Path, id: u64) -> Result<FileRecord> {
    let mut stream = open_stream(index_path)?;
    stream.seek_to(id)?;
    match stream.next_record()? {
        Some((_, record)) => Ok(record),
        None => Err(Error::RecordNotFound { offset: id }),
    }
}

/// Resume point after a page cut short by its limit; `None` if nothing is left to read
fn next_offset(stream: &mut RecordStream<File>) -> Result<Option<u64>> {
    Ok(stream.has_more()?.then(|| stream.offset()))
}

fn open_stream(index_path: &Path) -> Result<RecordStream<File>> {
    let file = File::open(index_path).map_err(|e| {
        Error::io(format!("Failed to open index file {}", index_path.display()), index_path, e)
    })?;
    RecordStream::new(file)
}
