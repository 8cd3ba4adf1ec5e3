//! Dictionary and metadata persistence with atomic writes

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use super::metadata::RebuildMetadata;
use crate::error::{Error, Result};

/// Write the extension dictionary: `{"jpg": true, "txt": true}`
pub fn save_extension_dictionary(path: &Path, extensions: &BTreeSet<String>) -> Result<()> {
    let dictionary: BTreeMap<&str, bool> =
        extensions.iter().map(|ext| (ext.as_str(), true)).collect();
    write_json_atomic(path, &serde_json::to_vec(&dictionary).map_err(Error::Encode)?)
}

/// Write the tag dictionary: `["2024", "cat"]`
pub fn save_tag_dictionary(path: &Path, tags: &BTreeSet<String>) -> Result<()> {
    write_json_atomic(path, &serde_json::to_vec(tags).map_err(Error::Encode)?)
}

pub fn save_metadata(path: &Path, metadata: &RebuildMetadata) -> Result<()> {
    write_json_atomic(path, &serde_json::to_vec_pretty(metadata).map_err(Error::Encode)?)
}

/// Extensions listed in an extension dictionary, sorted
pub fn load_extension_dictionary(path: &Path) -> Result<Vec<String>> {
    let dictionary: BTreeMap<String, bool> = read_json(path)?;
    Ok(dictionary.into_keys().collect())
}

pub fn load_tag_dictionary(path: &Path) -> Result<Vec<String>> {
    read_json(path)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read(path)
        .map_err(|e| Error::io(format!("Failed to read {}", path.display()), path, e))?;
    serde_json::from_slice(&content).map_err(|e| Error::Io {
        message: format!("Failed to parse {}", path.display()),
        path: Some(path.to_path_buf()),
        source: e.into(),
    })
}

/// Write `bytes` to a temp file next to `path`, then rename it into place
fn write_json_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let temp = temp_path(path);
    fs::write(&temp, bytes)
        .map_err(|e| Error::io(format!("Failed to write {}", temp.display()), &temp, e))?;
    fs::rename(&temp, path).map_err(|e| {
        Error::io(format!("Failed to rename {} into place", temp.display()), path, e)
    })
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
