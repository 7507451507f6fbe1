//! Class-loader style byte lookup over a classpath: first root that has the
//! class wins.

use dashmap::DashMap;
use pkgscan_core::{Classpath, LoadError, existing_metadata};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, trace};
use zip::ZipArchive;
use zip::result::ZipError;

pub const CLASS_EXTENSION: &str = "class";

type OpenArchive = Arc<Mutex<ZipArchive<File>>>;

/// `com.acme.Outer$Inner` -> `com/acme/Outer$Inner.class`
pub fn class_entry_path(name: &str) -> String {
    format!("{}.{}", name.replace('.', "/"), CLASS_EXTENSION)
}

/// Class bytes from a classpath.
///
/// Jar roots are opened and their central directory read once, on first
/// use; later lookups reuse the open archive.
pub struct ClassSource {
    classpath: Classpath,
    archives: DashMap<PathBuf, OpenArchive>,
}

impl ClassSource {
    pub fn new(classpath: Classpath) -> Self {
        Self {
            classpath,
            archives: DashMap::new(),
        }
    }

    pub fn classpath(&self) -> &Classpath {
        &self.classpath
    }

    pub fn open_archive_count(&self) -> usize {
        self.archives.len()
    }

    /// Reads the bytes of the class `name` from the first root that has it.
    pub fn read(&self, name: &str) -> Result<Vec<u8>, LoadError> {
        let entry_path = class_entry_path(name);

        for root in self.classpath.iter() {
            let Some(metadata) = existing_metadata(root).map_err(|e| io_error(name, e))? else {
                continue;
            };

            if metadata.is_dir() {
                let file = root.join(&entry_path);
                let found = existing_metadata(&file).map_err(|e| io_error(name, e))?;
                if found.is_some_and(|m| m.is_file()) {
                    trace!("Loading {} from {:?}", name, file);
                    return std::fs::read(&file).map_err(|e| io_error(name, e));
                }
            } else if let Some(bytes) = self.read_from_archive(root, &entry_path, name)? {
                trace!("Loading {} from archive {:?}", name, root);
                return Ok(bytes);
            }
        }

        Err(LoadError::NotFound(name.to_string()))
    }

    fn read_from_archive(
        &self,
        archive_path: &Path,
        entry_path: &str,
        name: &str,
    ) -> Result<Option<Vec<u8>>, LoadError> {
        let archive = self.open(archive_path, name)?;
        let mut archive = archive.lock().unwrap_or_else(PoisonError::into_inner);

        let mut entry = match archive.by_name(entry_path) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(e) => {
                return Err(LoadError::malformed(
                    name,
                    format!("Bad entry in {}: {e}", archive_path.display()),
                ));
            }
        };

        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes).map_err(|e| io_error(name, e))?;
        Ok(Some(bytes))
    }

    /// The shared handle for `archive_path`, opening it on first use.
    ///
    /// Failures are not cached, so a broken jar is reported on every lookup.
    fn open(&self, archive_path: &Path, name: &str) -> Result<OpenArchive, LoadError> {
        if let Some(archive) = self.archives.get(archive_path) {
            return Ok(archive.value().clone());
        }

        let file = File::open(archive_path).map_err(|e| io_error(name, e))?;
        let archive = ZipArchive::new(file).map_err(|e| {
            LoadError::malformed(name, format!("Unreadable archive {}: {e}", archive_path.display()))
        })?;
        debug!("Opened archive {:?} ({} entries)", archive_path, archive.len());

        Ok(self
            .archives
            .entry(archive_path.to_path_buf())
            .or_insert_with(|| Arc::new(Mutex::new(archive)))
            .clone())
    }
}

fn io_error(name: &str, source: std::io::Error) -> LoadError {
    LoadError::Io {
        name: name.to_string(),
        source,
    }
}
