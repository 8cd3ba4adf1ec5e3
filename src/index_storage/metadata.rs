//! Rebuild metadata for staleness detection

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};

/// Timestamps gating whether a rebuild is necessary
///
/// `None` is the zero value: nothing has been built yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebuildMetadata {
    /// Source root modification time observed at the last successful build
    #[serde(default)]
    pub last_update: Option<DateTime<Utc>>,
    /// Wall-clock time of the last build
    #[serde(default)]
    pub create_time: Option<DateTime<Utc>>,
}

impl RebuildMetadata {
    /// Load metadata, treating a missing or unreadable file as zero-valued
    pub fn load(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => return Self::default(),
        };

        match serde_json::from_str(&content) {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!("Ignoring corrupt rebuild metadata {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Whether an index built at `last_update` still reflects a root modified at `mtime`
    pub fn is_current(&self, mtime: DateTime<Utc>) -> bool {
        self.last_update == Some(mtime)
    }

    /// Record a build of a root whose modification time is `mtime`, happening now
    pub fn mark_rebuilt(&mut self, mtime: DateTime<Utc>) {
        self.create_time = Some(Utc::now());
        self.last_update = Some(mtime);
    }
}

/// Modification time of `path`
pub fn modified_time(path: &Path) -> Result<DateTime<Utc>> {
    let metadata = fs::metadata(path)
        .map_err(|e| Error::io(format!("Failed to stat {}", path.display()), path, e))?;
    let mtime = metadata.modified().map_err(|e| {
        Error::io(format!("Failed to read modification time of {}", path.display()), path, e)
    })?;
    Ok(DateTime::<Utc>::from(mtime))
}
