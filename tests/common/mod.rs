//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use explore_index::ScanConfig;
use explore_index::index_file::RecordStream;
use explore_index::models::FileRecord;
use tempfile::TempDir;

/// Builder for a temporary source tree with a sibling data directory
///
/// Layout: `<tmp>/src` is the tree to index, `<tmp>/data` receives the index.
pub struct SourceTreeBuilder {
    temp_dir: TempDir,
}

impl SourceTreeBuilder {
    /// Create a new builder with an empty source directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir(temp_dir.path().join("src")).expect("Failed to create src dir");
        Self { temp_dir }
    }

    /// Add an empty file; parent directories are created as needed
    pub fn with_file(self, relative: &str) -> Self {
        self.with_file_content(relative, "")
    }

    pub fn with_file_content(self, relative: &str, content: &str) -> Self {
        let path = self.temp_dir.path().join("src").join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(&path, content).expect("Failed to write file");
        self
    }

    /// Add an empty directory
    pub fn with_dir(self, relative: &str) -> Self {
        let path = self.temp_dir.path().join("src").join(relative);
        fs::create_dir_all(path).expect("Failed to create dir");
        self
    }

    pub fn build(self) -> SourceTree {
        SourceTree { temp_dir: self.temp_dir }
    }
}

impl Default for SourceTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A built source tree; removed when dropped
pub struct SourceTree {
    temp_dir: TempDir,
}

impl SourceTree {
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn src(&self) -> PathBuf {
        self.temp_dir.path().join("src")
    }

    pub fn data(&self) -> PathBuf {
        self.temp_dir.path().join("data")
    }

    pub fn index_path(&self, config: &ScanConfig) -> PathBuf {
        config.index_path(&self.data())
    }
}

/// Every record of an index file with its id, in file order
pub fn read_index(path: &Path) -> Vec<(u64, FileRecord)> {
    let file = fs::File::open(path).expect("Failed to open index file");
    RecordStream::new(file)
        .expect("Failed to create record stream")
        .collect::<Result<Vec<_>, _>>()
        .expect("Index file contains a malformed record")
}

/// Sorted record paths of an index file
pub fn indexed_paths(path: &Path) -> Vec<String> {
    let mut paths: Vec<String> = read_index(path).into_iter().map(|(_, r)| r.path).collect();
    paths.sort();
    paths
}

/// A small photo library with tags in brackets and some noise to ignore
pub fn realistic_source_tree() -> SourceTree {
    SourceTreeBuilder::new()
        .with_file("photos/2024/[cat][beach] IMG_0001.JPG")
        .with_file("photos/2024/[cat] IMG_0002.jpg")
        .with_file("photos/2023/[dog] IMG_0100.png")
        .with_file("photos/2023/notes.txt")
        .with_file("docs/[work] report.pdf")
        .with_file("docs/README")
        .with_file("docs/draft.tmp")
        .with_file(".git/HEAD")
        .with_file(".git/objects/ab/cdef")
        .with_file(".DS_Store")
        .with_dir("empty")
        .build()
}
