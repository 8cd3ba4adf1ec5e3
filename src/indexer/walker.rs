//! Source tree traversal with ignore-name pruning

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::error::Result;

/// Counts of entries the walk passed over without visiting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkSummary {
    /// Files and directories skipped because their name is ignored
    pub ignored: usize,
    /// Symlinks, sockets and other entries that are not regular files
    pub not_regular: usize,
    /// Entries that could not be read
    pub errors: usize,
}

/// Walk `root` and call `visit` for every regular file not excluded by name
///
/// - An entry whose base name is in `ignore_names` is skipped; if it is a directory its
///   whole subtree is pruned. The root itself is never matched against `ignore_names`.
/// - Directories are descended into but never visited.
/// - `exclude`, when given, is pruned like an ignored name. It is compared against
///   entry paths as walked, so it must be `root` joined with a relative path.
/// - Entries are visited in lexical file-name order within each directory. Symlinks are
///   not followed.
/// - Errors reading an entry are logged and counted, not returned. An error returned by
///   `visit` stops the walk and is propagated.
pub fn walk_source_tree<F>(
    root: &Path,
    ignore_names: &HashSet<String>,
    exclude: Option<&Path>,
    mut visit: F,
) -> Result<WalkSummary>
where
    F: FnMut(&DirEntry) -> Result<()>,
{
    let mut summary = WalkSummary::default();
    let mut entries = WalkDir::new(root).follow_links(false).sort_by_file_name().into_iter();

    while let Some(next) = entries.next() {
        let entry = match next {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                summary.errors += 1;
                continue;
            }
        };

        if entry.depth() == 0 {
            continue;
        }

        let file_type = entry.file_type();
        if exclude.is_some_and(|excluded| entry.path() == excluded) {
            debug!("Pruning output directory {}", entry.path().display());
            if file_type.is_dir() {
                entries.skip_current_dir();
            }
            summary.ignored += 1;
            continue;
        }

        if ignore_names.contains(entry.file_name().to_string_lossy().as_ref()) {
            if file_type.is_dir() {
                debug!("Pruning ignored directory {}", entry.path().display());
                entries.skip_current_dir();
            } else {
                debug!("Skipping ignored file {}", entry.path().display());
            }
            summary.ignored += 1;
            continue;
        }

        if file_type.is_dir() {
            continue;
        }

        if !file_type.is_file() {
            debug!("Skipping non-regular file {}", entry.path().display());
            summary.not_regular += 1;
            continue;
        }

        visit(&entry)?;
    }

    Ok(summary)
}
