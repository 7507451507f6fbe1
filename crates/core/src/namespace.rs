//! Dotted namespace paths and their slash-delimited physical form.

use crate::error::{Result, ScanError};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const SEGMENT_DELIMITER: char = '.';
pub const PHYSICAL_DELIMITER: char = '/';

/// A validated package path such as `com.acme.plugins`.
///
/// The empty path is valid and names the root namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NamespacePath(String);

impl NamespacePath {
    pub fn parse(path: &str) -> Result<Self> {
        if path.is_empty() {
            return Ok(Self::root());
        }
        for segment in path.split(SEGMENT_DELIMITER) {
            check_segment(path, segment)?;
        }
        Ok(Self(path.to_string()))
    }

    /// Parses a slash-delimited relative path (`com/acme/plugins`).
    ///
    /// Leading and trailing slashes are tolerated, since archive and URL
    /// forms carry them.
    pub fn from_physical(physical: &str) -> Result<Self> {
        let trimmed = physical.trim_matches(PHYSICAL_DELIMITER);
        if trimmed.is_empty() {
            return Ok(Self::root());
        }
        let mut segments = Vec::new();
        for segment in trimmed.split(PHYSICAL_DELIMITER) {
            if segment.contains(SEGMENT_DELIMITER) {
                return Err(malformed(physical, "segment contains a dot"));
            }
            check_segment(physical, segment)?;
            segments.push(segment);
        }
        Ok(Self(segments.join(".")))
    }

    pub fn root() -> Self {
        Self(String::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(SEGMENT_DELIMITER).filter(|s| !s.is_empty())
    }

    pub fn to_physical(&self) -> String {
        self.0.replace(SEGMENT_DELIMITER, "/")
    }

    /// Extends the path by one segment.
    pub fn child(&self, segment: &str) -> Result<Self> {
        check_segment(segment, segment)?;
        if segment.contains(SEGMENT_DELIMITER) {
            return Err(malformed(segment, "segment contains a dot"));
        }
        Ok(Self(self.qualify(segment)))
    }

    /// Fully-qualified name of `simple_name` inside this namespace.
    pub fn qualify(&self, simple_name: &str) -> String {
        if self.is_root() {
            simple_name.to_string()
        } else {
            format!("{}.{}", self.0, simple_name)
        }
    }
}

fn check_segment(path: &str, segment: &str) -> Result<()> {
    if segment.is_empty() {
        return Err(malformed(path, "empty segment"));
    }
    if segment.trim().is_empty() {
        return Err(malformed(path, "blank segment"));
    }
    if segment.contains(PHYSICAL_DELIMITER) || segment.contains('\\') {
        return Err(malformed(path, "embedded path separator"));
    }
    if segment.contains('\0') {
        return Err(malformed(path, "embedded NUL"));
    }
    Ok(())
}

fn malformed(path: &str, reason: &'static str) -> ScanError {
    ScanError::MalformedPath {
        path: path.to_string(),
        reason,
    }
}

impl fmt::Display for NamespacePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for NamespacePath {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for NamespacePath {
    type Error = ScanError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<NamespacePath> for String {
    fn from(value: NamespacePath) -> Self {
        value.0
    }
}
