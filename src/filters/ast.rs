use std::fmt;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// Record fields a search can constrain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    /// Substring of the file name
    Name,
    /// Substring of the normalized relative path
    Path,
    /// Exact (lower-case) extension
    Ext,
    /// Exact match against any tag
    Tag,
}

impl FilterField {
    pub const ALL: [FilterField; 4] =
        [FilterField::Name, FilterField::Path, FilterField::Ext, FilterField::Tag];

    pub fn as_str(self) -> &'static str {
        match self {
            FilterField::Name => "name",
            FilterField::Path => "path",
            FilterField::Ext => "ext",
            FilterField::Tag => "tag",
        }
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Conjunctive search filter
///
/// Every non-empty criterion must hold; an empty criterion always holds, so the
/// default filter matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilter {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub ext: String,
    #[serde(default)]
    pub tag: String,
}

impl SearchFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_ext(mut self, ext: impl Into<String>) -> Self {
        self.ext = ext.into();
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn is_empty(&self) -> bool {
        FilterField::ALL.iter().all(|&field| self.get(field).is_empty())
    }

    pub fn get(&self, field: FilterField) -> &str {
        match field {
            FilterField::Name => &self.name,
            FilterField::Path => &self.path,
            FilterField::Ext => &self.ext,
            FilterField::Tag => &self.tag,
        }
    }

    /// Set a criterion that has not been set yet
    ///
    /// A filter holds one value per field, so setting a field twice is an error rather
    /// than an implicit OR.
    pub fn set(&mut self, field: FilterField, value: impl Into<String>) -> Result<()> {
        let value = value.into();
        if value.is_empty() {
            bail!("Empty value for field '{}'", field);
        }

        let slot = match field {
            FilterField::Name => &mut self.name,
            FilterField::Path => &mut self.path,
            FilterField::Ext => &mut self.ext,
            FilterField::Tag => &mut self.tag,
        };
        if !slot.is_empty() {
            bail!("Field '{}' given more than once ('{}' and '{}')", field, slot, value);
        }
        *slot = value;
        Ok(())
    }

    /// Combine two filters; fails if both constrain the same field
    pub fn merge(mut self, other: SearchFilter) -> Result<Self> {
        for field in FilterField::ALL {
            let value = other.get(field);
            if !value.is_empty() {
                self.set(field, value)?;
            }
        }
        Ok(self)
    }
}
