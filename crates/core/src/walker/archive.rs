use super::load_into;
use crate::catalog::TypeCatalog;
use crate::config::{ArchiveMatch, ScanConfig};
use crate::error::{LoadError, Result, ScanError};
use crate::namespace::NamespacePath;
use crate::report::ScanReport;
use std::fs::File;
use std::path::Path;
use tracing::debug;
use zip::ZipArchive;

/// Collects compiled units from a zip/jar archive whose entry names fall
/// under `namespace`.
///
/// With [`ArchiveMatch::Substring`] an entry qualifies when its name contains
/// the physical namespace anywhere, so `com/acme/plugins` also picks up
/// `com/acme/pluginsextra/Baz.class`.
pub fn walk_archive(
    archive_path: &Path,
    namespace: &NamespacePath,
    catalog: &dyn TypeCatalog,
    config: &ScanConfig,
    report: &mut ScanReport,
) -> Result<()> {
    let file = File::open(archive_path).map_err(|e| ScanError::Location {
        path: archive_path.to_path_buf(),
        source: e,
    })?;
    let archive = ZipArchive::new(file).map_err(|e| archive_error(archive_path, e))?;

    let physical = namespace.to_physical();
    let prefix = format!("{physical}/");
    let before = report.types.len();

    for raw_name in archive.file_names() {
        // Directory markers end with a separator.
        if raw_name.ends_with('/') || raw_name.ends_with('\\') {
            continue;
        }

        let name = raw_name.trim_start_matches('/');
        let matched = match config.archive_match {
            ArchiveMatch::Substring => name.contains(&physical),
            ArchiveMatch::SegmentPrefix => name.starts_with(&prefix),
        };
        if !matched {
            continue;
        }
        let Some(stem) = config.unit_stem(name) else {
            continue;
        };

        match unit_name(stem) {
            Ok(type_name) => load_into(catalog, config, name.to_string(), type_name, report),
            Err(e) => {
                let type_name = stem.replace('/', ".");
                report.reject(
                    name.to_string(),
                    type_name.clone(),
                    LoadError::malformed(type_name, e.to_string()),
                );
            }
        }
    }

    debug!(
        "Archive {:?} contributed {} types",
        archive_path,
        report.types.len() - before
    );
    Ok(())
}

/// `com/acme/Foo` -> `com.acme.Foo`, rejecting segments that would not map back.
fn unit_name(stem: &str) -> Result<String> {
    let (package, simple_name) = stem.rsplit_once('/').unwrap_or(("", stem));
    let unit = NamespacePath::from_physical(package)?.child(simple_name)?;
    Ok(unit.into())
}

fn archive_error(path: &Path, source: zip::result::ZipError) -> ScanError {
    ScanError::Archive {
        path: path.to_path_buf(),
        source,
    }
}
