//! Album name resolution.
//!
//! The final album name is the marker override when present, otherwise the
//! directory name passed through the optional user-supplied pattern.

use regex::Regex;
use thiserror::Error;

/// Errors from resolving an album name. Both skip the affected
/// specification without aborting the run.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NameError {
    /// The user-supplied pattern did not match the directory name.
    #[error("pattern '{pattern}' did not match directory name '{raw_name}'")]
    NoMatch {
        /// The pattern as supplied by the user
        pattern: String,
        /// The directory name it was applied to
        raw_name: String,
    },

    /// Resolution produced an empty name.
    #[error("resolved album name is empty for directory '{raw_name}'")]
    Empty {
        /// The directory name that resolved to nothing
        raw_name: String,
    },
}

/// A compiled user-supplied transform from directory name to album name.
///
/// When the pattern contains a capture group, group 1 becomes the album
/// name; otherwise the whole match is used. A directory name the pattern
/// does not match at all is an error, so operators can verify their pattern
/// with a dry run instead of silently getting untransformed names.
#[derive(Debug, Clone)]
pub struct NamePattern {
    regex: Regex,
}

impl NamePattern {
    /// Compile a pattern.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }

    /// The original pattern string.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    fn apply(&self, raw_name: &str) -> Result<String, NameError> {
        self.regex.captures(raw_name).map_or_else(
            || {
                Err(NameError::NoMatch {
                    pattern: self.regex.as_str().to_string(),
                    raw_name: raw_name.to_string(),
                })
            },
            |caps| {
                let matched = caps
                    .get(1)
                    .or_else(|| caps.get(0))
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default();
                Ok(matched)
            },
        )
    }
}

/// Resolve the final album name for a specification.
///
/// Pure function: override wins when set and non-empty, then the pattern
/// (which must match), then the raw directory name unchanged.
pub fn resolve_name(
    raw_name: &str,
    override_name: Option<&str>,
    pattern: Option<&NamePattern>,
) -> Result<String, NameError> {
    if let Some(name) = override_name {
        if !name.is_empty() {
            return Ok(name.to_string());
        }
    }

    let resolved = match pattern {
        Some(pattern) => pattern.apply(raw_name)?,
        None => raw_name.to_string(),
    };

    if resolved.is_empty() {
        return Err(NameError::Empty {
            raw_name: raw_name.to_string(),
        });
    }
    Ok(resolved)
}
