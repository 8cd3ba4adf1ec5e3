//! Indexer configuration
//!
//! Loaded from a JSON file. Every field has a default, so `{}` is a complete config:
//!
//! ```json
//! {
//!   "src_root": "/srv/media",
//!   "data_root": "/var/lib/explore-index",
//!   "ignore_name": [".git", "node_modules"],
//!   "ignore_ext": ["tmp"],
//!   "tag_expr": "\\[([^\\[\\]]+)\\]"
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_TAG_EXPR: &str = r"\[([^\[\]]+)\]";
pub const DEFAULT_INDEX_FILE: &str = "index.jsonl";
pub const DEFAULT_EXT_LIST_FILE: &str = "extensions.json";
pub const DEFAULT_TAG_LIST_FILE: &str = "tags.json";
pub const DEFAULT_META_FILE: &str = "meta.json";

/// Top-level configuration: where to read from, where to write to, and how to scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_src_root")]
    pub src_root: PathBuf,
    #[serde(default = "default_data_root")]
    pub data_root: PathBuf,
    #[serde(flatten)]
    pub scan: ScanConfig,
}

/// Settings consumed by the indexer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Base names (files or directories) excluded entirely
    #[serde(default = "default_ignore_name")]
    pub ignore_name: Vec<String>,
    /// Extensions excluded from the index, compared lower-cased
    #[serde(default)]
    pub ignore_ext: Vec<String>,
    /// The first capture group of every match becomes a tag
    #[serde(default = "default_tag_expr")]
    pub tag_expr: String,
    #[serde(default = "default_index_file")]
    pub index_file: String,
    #[serde(default = "default_ext_list_file")]
    pub ext_list_file: String,
    #[serde(default = "default_tag_list_file")]
    pub tag_list_file: String,
    #[serde(default = "default_meta_file")]
    pub meta_file: String,
}

fn default_src_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_data_root() -> PathBuf {
    PathBuf::from("data")
}

fn default_ignore_name() -> Vec<String> {
    vec![".git".to_string(), ".DS_Store".to_string()]
}

fn default_tag_expr() -> String {
    DEFAULT_TAG_EXPR.to_string()
}

fn default_index_file() -> String {
    DEFAULT_INDEX_FILE.to_string()
}

fn default_ext_list_file() -> String {
    DEFAULT_EXT_LIST_FILE.to_string()
}

fn default_tag_list_file() -> String {
    DEFAULT_TAG_LIST_FILE.to_string()
}

fn default_meta_file() -> String {
    DEFAULT_META_FILE.to_string()
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            ignore_name: default_ignore_name(),
            ignore_ext: Vec::new(),
            tag_expr: default_tag_expr(),
            index_file: default_index_file(),
            ext_list_file: default_ext_list_file(),
            tag_list_file: default_tag_list_file(),
            meta_file: default_meta_file(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            src_root: default_src_root(),
            data_root: default_data_root(),
            scan: ScanConfig::default(),
        }
    }
}

impl Config {
    /// Read a JSON config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load `path` if given, otherwise fall back to defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn index_path(&self) -> PathBuf {
        self.scan.index_path(&self.data_root)
    }
}

impl ScanConfig {
    pub fn index_path(&self, data_root: &Path) -> PathBuf {
        data_root.join(&self.index_file)
    }

    pub fn ext_list_path(&self, data_root: &Path) -> PathBuf {
        data_root.join(&self.ext_list_file)
    }

    pub fn tag_list_path(&self, data_root: &Path) -> PathBuf {
        data_root.join(&self.tag_list_file)
    }

    pub fn meta_path(&self, data_root: &Path) -> PathBuf {
        data_root.join(&self.meta_file)
    }
}
