use serde::{Deserialize, Serialize};

/// One indexed file.
///
/// `path` is relative to the source root, `/`-separated and always starts with `/`.
/// `ext` is already lower-cased. `tags` keeps match order and duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub ext: String,
}

impl FileRecord {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}
