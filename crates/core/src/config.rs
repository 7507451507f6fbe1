use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// How archive entry names are matched against the namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchiveMatch {
    /// Entry name contains the physical namespace anywhere. Also matches
    /// sibling namespaces sharing a prefix (`plugins` vs `pluginsextra`).
    #[default]
    Substring,
    /// Entry name lives under `<physical>/`.
    SegmentPrefix,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Compiled-unit file extension, without the dot.
    pub extension: String,
    /// Keep nested types (names containing `$`).
    pub include_nested: bool,
    pub follow_links: bool,
    pub archive_match: ArchiveMatch,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extension: "class".to_string(),
            include_nested: true,
            follow_links: true,
            archive_match: ArchiveMatch::default(),
        }
    }
}

impl ScanConfig {
    /// Strips the compiled-unit extension from a file or entry name.
    pub(crate) fn unit_stem<'a>(&self, name: &'a str) -> Option<&'a str> {
        let stem = name.strip_suffix(self.extension.as_str())?.strip_suffix('.')?;
        if stem.is_empty() || stem.ends_with('/') {
            return None;
        }
        Some(stem)
    }

    pub(crate) fn accepts_name(&self, type_name: &str) -> bool {
        self.include_nested || !type_name.contains('$')
    }
}

/// Ordered lookup roots: directories and archive files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Classpath {
    roots: Vec<PathBuf>,
}

impl Classpath {
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }

    /// Parses a platform path list (`:`-separated on Unix, `;` on Windows).
    pub fn parse(list: impl AsRef<OsStr>) -> Self {
        Self {
            roots: std::env::split_paths(&list)
                .filter(|p| !p.as_os_str().is_empty())
                .collect(),
        }
    }

    pub fn push(&mut self, root: impl Into<PathBuf>) {
        self.roots.push(root.into());
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.roots.iter().map(PathBuf::as_path)
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}
