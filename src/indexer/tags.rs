use regex::Regex;

use crate::error::{Error, Result};

/// Extracts tags from file names with a configured pattern
///
/// Every non-overlapping match contributes its first capture group, in match order.
/// With `\[(\w+)\]`, `photo[cat][2024].jpg` yields `["cat", "2024"]`.
#[derive(Debug, Clone)]
pub struct TagExtractor {
    pattern: Regex,
}

impl TagExtractor {
    /// Compile `expr`. Fails with [`Error::InvalidTagPattern`] if it does not compile or
    /// has no capture group to take tags from.
    pub fn new(expr: &str) -> Result<Self> {
        let pattern = Regex::new(expr).map_err(|e| Error::InvalidTagPattern {
            pattern: expr.to_string(),
            reason: e.to_string(),
        })?;

        // Group 0 is the whole match
        if pattern.captures_len() < 2 {
            return Err(Error::InvalidTagPattern {
                pattern: expr.to_string(),
                reason: "pattern has no capture group".to_string(),
            });
        }

        Ok(Self { pattern })
    }

    /// Tags in `name`, duplicates kept. Matches where the first group did not
    /// participate contribute nothing.
    pub fn extract(&self, name: &str) -> Vec<String> {
        self.pattern
            .captures_iter(name)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .collect()
    }
}
