//! Resource locator: which lookup roots back a namespace.

use crate::config::Classpath;
use crate::error::{Result, ScanError};
use crate::namespace::NamespacePath;
use serde::Serialize;
use std::fs::{File, Metadata};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;
use zip::ZipArchive;

/// A physical store backing a namespace during one scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "lowercase")]
pub enum Location {
    /// The directory that corresponds to the namespace itself, not its root.
    Directory(PathBuf),
    /// An archive with at least one entry under the namespace.
    Archive(PathBuf),
}

impl Location {
    pub fn path(&self) -> &Path {
        match self {
            Location::Directory(path) | Location::Archive(path) => path,
        }
    }
}

pub struct ResourceLocator<'a> {
    classpath: &'a Classpath,
}

impl<'a> ResourceLocator<'a> {
    pub fn new(classpath: &'a Classpath) -> Self {
        Self { classpath }
    }

    /// One location per backing root, in classpath order.
    pub fn locate(&self, namespace: &NamespacePath) -> Result<Vec<Location>> {
        let physical = namespace.to_physical();
        let mut locations = Vec::new();

        for root in self.classpath.iter() {
            let Some(metadata) = existing_metadata(root).map_err(|e| ScanError::Location {
                path: root.to_path_buf(),
                source: e,
            })?
            else {
                debug!("Lookup root {:?} does not exist, skipping", root);
                continue;
            };

            if metadata.is_dir() {
                let dir = root.join(&physical);
                let backing = existing_metadata(&dir).map_err(|e| ScanError::Location {
                    path: dir.clone(),
                    source: e,
                })?;
                if backing.is_some_and(|m| m.is_dir()) {
                    debug!("{} backed by directory {:?}", namespace, dir);
                    locations.push(Location::Directory(dir));
                }
            } else if archive_backs(root, &physical)? {
                debug!("{} backed by archive {:?}", namespace, root);
                locations.push(Location::Archive(root.to_path_buf()));
            }
        }

        Ok(locations)
    }
}

/// `metadata` for `path`, with `None` when nothing exists there.
///
/// Only `NotFound` and `NotADirectory` count as absent. Every other failure
/// (permissions, symlink loops, device errors) is returned to the caller.
pub fn existing_metadata(path: &Path) -> std::io::Result<Option<Metadata>> {
    match std::fs::metadata(path) {
        Ok(metadata) => Ok(Some(metadata)),
        Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => Ok(None),
        Err(e) => Err(e),
    }
}

fn archive_backs(archive: &Path, physical: &str) -> Result<bool> {
    let file = File::open(archive).map_err(|e| ScanError::Location {
        path: archive.to_path_buf(),
        source: e,
    })?;
    let archive_reader = ZipArchive::new(file).map_err(|e| ScanError::Archive {
        path: archive.to_path_buf(),
        source: e,
    })?;

    let prefix = format!("{physical}/");
    Ok(archive_reader
        .file_names()
        .map(|name| name.trim_start_matches('/'))
        .any(|name| name.starts_with(&prefix)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_jar(path: &Path, entries: &[&str]) {
        let file = File::create(path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default();
        for entry in entries {
            zip.start_file(*entry, options).unwrap();
            zip.write_all(b"unit").unwrap();
        }
        zip.finish().unwrap();
    }

    #[test]
    fn test_locate_directory_and_archive() {
        let dir = tempdir().unwrap();
        let classes = dir.path().join("classes");
        std::fs::create_dir_all(classes.join("com/acme")).unwrap();
        let jar = dir.path().join("lib.jar");
        write_jar(&jar, &["com/acme/Foo.class"]);
        let other_jar = dir.path().join("other.jar");
        write_jar(&other_jar, &["org/other/Foo.class"]);

        let classpath = Classpath::new([classes.clone(), jar.clone(), other_jar]);
        let namespace = NamespacePath::parse("com.acme").unwrap();
        let locations = ResourceLocator::new(&classpath).locate(&namespace).unwrap();

        assert_eq!(
            locations,
            vec![
                Location::Directory(classes.join("com/acme")),
                Location::Archive(jar)
            ]
        );
    }

    #[test]
    fn test_locate_skips_missing_roots() {
        let dir = tempdir().unwrap();
        let classpath = Classpath::new([dir.path().join("nope")]);
        let namespace = NamespacePath::parse("com.acme").unwrap();
        let locations = ResourceLocator::new(&classpath).locate(&namespace).unwrap();
        assert!(locations.is_empty());
    }

    #[test]
    fn test_locate_reports_unreadable_archive() {
        let dir = tempdir().unwrap();
        let bogus = dir.path().join("bogus.jar");
        std::fs::write(&bogus, b"not a zip").unwrap();
        let classpath = Classpath::new([bogus]);
        let namespace = NamespacePath::parse("com.acme").unwrap();
        let err = ResourceLocator::new(&classpath).locate(&namespace).unwrap_err();
        assert!(matches!(err, ScanError::Archive { .. }));
    }

    #[test]
    fn test_locate_ignores_plain_file_at_namespace() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("com")).unwrap();
        std::fs::write(dir.path().join("com/acme"), b"").unwrap();
        let classpath = Classpath::new([dir.path()]);
        let namespace = NamespacePath::parse("com.acme.plugins").unwrap();
        let locations = ResourceLocator::new(&classpath).locate(&namespace).unwrap();
        assert!(locations.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_locate_surfaces_symlink_loop() {
        let dir = tempdir().unwrap();
        std::os::unix::fs::symlink("com", dir.path().join("com")).unwrap();
        let classpath = Classpath::new([dir.path()]);
        let namespace = NamespacePath::parse("com.acme").unwrap();

        let err = ResourceLocator::new(&classpath).locate(&namespace).unwrap_err();
        match err {
            ScanError::Location { path, .. } => assert_eq!(path, dir.path().join("com/acme")),
            other => panic!("expected a location error, got {other:?}"),
        }
    }

    #[test]
    fn test_archive_prefix_is_segment_bounded() {
        let dir = tempdir().unwrap();
        let jar = dir.path().join("lib.jar");
        write_jar(&jar, &["com/acmex/Foo.class"]);
        let classpath = Classpath::new([jar]);
        let namespace = NamespacePath::parse("com.acme").unwrap();
        let locations = ResourceLocator::new(&classpath).locate(&namespace).unwrap();
        assert!(locations.is_empty());
    }
}
