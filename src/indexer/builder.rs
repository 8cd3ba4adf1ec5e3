//! Index builder for a source directory tree.
//!
//! One [`Indexer`] holds the compiled configuration; every call to [`Indexer::create`]
//! or [`Indexer::rebuild`] starts from empty extension and tag sets, so nothing leaks
//! from one build into the next.

use std::collections::{BTreeSet, HashSet};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::DirEntry;

use super::tags::TagExtractor;
use super::walker::{WalkSummary, walk_source_tree};
use crate::config::{Config, ScanConfig};
use crate::error::{Error, Result};
use crate::index_file::encode_record;
use crate::index_storage::{
    RebuildMetadata, modified_time, save_extension_dictionary, save_metadata, save_tag_dictionary,
};
use crate::models::FileRecord;
use crate::utils::{file_extension, record_path};

/// What a call to [`Indexer::create`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    /// The source root is unchanged since the last build; nothing was written
    Skipped,
    Rebuilt(BuildStats),
}

/// Summary of one rebuild
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Records written to the index file
    pub records: usize,
    /// Entries left out by the ignore-name or ignore-extension rules
    pub ignored: usize,
    /// Entries skipped because they could not be read or are not regular files
    pub skipped: usize,
    /// Distinct extensions in the extension dictionary
    pub extensions: usize,
    /// Distinct tags in the tag dictionary
    pub tags: usize,
}

/// Builds the index file, dictionaries and rebuild metadata for a source tree
#[derive(Debug, Clone)]
pub struct Indexer {
    config: ScanConfig,
    ignore_names: HashSet<String>,
    ignore_exts: HashSet<String>,
    tags: TagExtractor,
}

/// Classification state of a single build
#[derive(Default)]
struct BuildState {
    seen_exts: BTreeSet<String>,
    seen_tags: BTreeSet<String>,
    records: usize,
    ignored_exts: usize,
}

impl Indexer {
    /// Compile the configuration. Fails only on an invalid tag pattern.
    pub fn new(config: &ScanConfig) -> Result<Self> {
        let tags = TagExtractor::new(&config.tag_expr)?;
        Ok(Self {
            config: config.clone(),
            ignore_names: config.ignore_name.iter().cloned().collect(),
            ignore_exts: config.ignore_ext.iter().map(|ext| ext.to_lowercase()).collect(),
            tags,
        })
    }

    /// Rebuild the index for `source_root` into `data_root` unless the source root's
    /// modification time matches the one recorded by the last build
    ///
    /// Only the root's own modification time is compared: a change deep inside an
    /// unchanged subdirectory is picked up by the next build that does run, or by
    /// [`Indexer::rebuild`].
    pub fn create(&self, source_root: &Path, data_root: &Path) -> Result<BuildOutcome> {
        let meta_path = self.config.meta_path(data_root);
        let mut metadata = RebuildMetadata::load(&meta_path);

        // The data root may live inside the source root; create it before reading the
        // root's mtime so creating it does not count as a change
        prepare_roots(source_root, data_root)?;
        let mtime = modified_time(source_root)?;
        if metadata.is_current(mtime) {
            info!("Index for {} is up to date, skipping rebuild", source_root.display());
            return Ok(BuildOutcome::Skipped);
        }

        metadata.mark_rebuilt(mtime);
        self.build(source_root, data_root, &metadata).map(BuildOutcome::Rebuilt)
    }

    /// Rebuild unconditionally, ignoring any stored metadata
    pub fn rebuild(&self, source_root: &Path, data_root: &Path) -> Result<BuildStats> {
        prepare_roots(source_root, data_root)?;
        let mut metadata = RebuildMetadata::default();
        metadata.mark_rebuilt(modified_time(source_root)?);
        self.build(source_root, data_root, &metadata)
    }

    fn build(
        &self,
        source_root: &Path,
        data_root: &Path,
        metadata: &RebuildMetadata,
    ) -> Result<BuildStats> {
        let index_path = self.config.index_path(data_root);
        info!("Indexing {} into {}", source_root.display(), index_path.display());

        let output_dir = nested_data_root(source_root, data_root)?;
        let (state, walk) = self.write_index(source_root, &index_path, output_dir.as_deref())?;

        save_extension_dictionary(&self.config.ext_list_path(data_root), &state.seen_exts)?;
        save_tag_dictionary(&self.config.tag_list_path(data_root), &state.seen_tags)?;
        // Written last: see the crash-safety note on the module
        save_metadata(&self.config.meta_path(data_root), metadata)?;

        let stats = BuildStats {
            records: state.records,
            ignored: walk.ignored + state.ignored_exts,
            skipped: walk.not_regular + walk.errors,
            extensions: state.seen_exts.len(),
            tags: state.seen_tags.len(),
        };
        info!(
            "Indexed {} files ({} ignored, {} skipped, {} extensions, {} tags)",
            stats.records, stats.ignored, stats.skipped, stats.extensions, stats.tags
        );
        if walk.errors > 0 {
            warn!("{} entries under {} could not be read", walk.errors, source_root.display());
        }

        Ok(stats)
    }

    /// Walk the tree and write one record per indexed file, truncating any old index
    fn write_index(
        &self,
        source_root: &Path,
        index_path: &Path,
        output_dir: Option<&Path>,
    ) -> Result<(BuildState, WalkSummary)> {
        let file = File::create(index_path).map_err(|e| {
            let message = format!("Failed to create index file {}", index_path.display());
            Error::io(message, index_path, e)
        })?;
        let mut writer = BufWriter::new(file);
        let mut state = BuildState::default();

        let walk = walk_source_tree(source_root, &self.ignore_names, output_dir, |entry| {
            let Some(record) = self.classify(source_root, entry, &mut state) else {
                return Ok(());
            };
            let line = encode_record(&record)?;
            writer.write_all(&line).map_err(|e| write_error(index_path, e))?;
            state.records += 1;
            Ok(())
        })?;

        writer.flush().map_err(|e| write_error(index_path, e))?;
        Ok((state, walk))
    }

    /// Turn a walked file into a record, or `None` if its extension is ignored
    fn classify(
        &self,
        source_root: &Path,
        entry: &DirEntry,
        state: &mut BuildState,
    ) -> Option<FileRecord> {
        let name = entry.file_name().to_string_lossy().into_owned();
        let ext = file_extension(&name);

        if self.ignore_exts.contains(&ext) {
            debug!("Skipping {} (ignored extension {:?})", entry.path().display(), ext);
            state.ignored_exts += 1;
            return None;
        }

        let Some(path) = record_path(source_root, entry.path()) else {
            warn!("Skipping {}: not under {}", entry.path().display(), source_root.display());
            return None;
        };

        let tags = self.tags.extract(&name);
        state.seen_tags.extend(tags.iter().cloned());
        state.seen_exts.insert(ext.clone());

        Some(FileRecord { name, path, tags, ext })
    }
}

/// Check the source root is a directory and create the data root
fn prepare_roots(source_root: &Path, data_root: &Path) -> Result<()> {
    if !source_root.is_dir() {
        return Err(Error::io(
            format!("Source root is not a directory: {}", source_root.display()),
            source_root,
            io::Error::other("not a directory"),
        ));
    }

    fs::create_dir_all(data_root).map_err(|e| {
        Error::io(format!("Failed to create data root {}", data_root.display()), data_root, e)
    })
}

/// The data root as the walk will see it, if it lies strictly inside the source root
fn nested_data_root(source_root: &Path, data_root: &Path) -> Result<Option<PathBuf>> {
    let canonical = |path: &Path| {
        fs::canonicalize(path)
            .map_err(|e| Error::io(format!("Failed to resolve {}", path.display()), path, e))
    };
    let source = canonical(source_root)?;
    let data = canonical(data_root)?;

    match data.strip_prefix(&source) {
        Ok(relative) if !relative.as_os_str().is_empty() => Ok(Some(source_root.join(relative))),
        _ => Ok(None),
    }
}

fn write_error(index_path: &Path, source: io::Error) -> Error {
    Error::io(format!("Failed to write index file {}", index_path.display()), index_path, source)
}

/// Build the index described by `config`, skipping the build if the source root is
/// unchanged since the last one
pub fn init_index(config: &Config) -> Result<BuildOutcome> {
    Indexer::new(&config.scan)?.create(&config.src_root, &config.data_root)
}
