use super::load_into;
use crate::catalog::TypeCatalog;
use crate::config::ScanConfig;
use crate::error::{LoadError, Result, ScanError};
use crate::namespace::NamespacePath;
use crate::report::ScanReport;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// Recursively collects compiled units below `dir`, which backs `namespace`.
///
/// Nested directories extend the namespace by their name. Files without the
/// compiled-unit extension are ignored.
pub fn walk_directory(
    dir: &Path,
    namespace: &NamespacePath,
    catalog: &dyn TypeCatalog,
    config: &ScanConfig,
    report: &mut ScanReport,
) -> Result<()> {
    let before = report.types.len();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .follow_links(config.follow_links)
    {
        let entry = entry.map_err(|e| ScanError::Walk {
            path: dir.to_path_buf(),
            source: e,
        })?;
        if entry.file_type().is_dir() {
            continue;
        }

        let Some(file_name) = entry.file_name().to_str() else {
            debug!("Ignoring non UTF-8 file name {:?}", entry.path());
            continue;
        };
        let Some(simple_name) = config.unit_stem(file_name) else {
            continue;
        };

        let entry_path = entry.path().display().to_string();
        match qualified_name(dir, entry.path(), namespace, simple_name) {
            Ok(type_name) => load_into(catalog, config, entry_path, type_name, report),
            Err(reason) => {
                let name = lossy_name(dir, entry.path(), namespace, simple_name);
                report.reject(entry_path, name.clone(), LoadError::malformed(name, reason));
            }
        }
    }

    debug!(
        "Directory {:?} contributed {} types",
        dir,
        report.types.len() - before
    );
    Ok(())
}

/// Package directories between `dir` and `file`, below `dir` itself.
fn package_dirs<'p>(dir: &Path, file: &'p Path) -> std::path::Components<'p> {
    file.strip_prefix(dir)
        .ok()
        .and_then(Path::parent)
        .unwrap_or(Path::new(""))
        .components()
}

/// Every directory segment and the simple name go through
/// [`NamespacePath::child`], so two distinct files never share a name.
fn qualified_name(
    dir: &Path,
    file: &Path,
    namespace: &NamespacePath,
    simple_name: &str,
) -> std::result::Result<String, String> {
    let mut package = namespace.clone();
    for component in package_dirs(dir, file) {
        let segment = component
            .as_os_str()
            .to_str()
            .ok_or_else(|| "non UTF-8 directory name".to_string())?;
        package = package.child(segment).map_err(|e| e.to_string())?;
    }
    package
        .child(simple_name)
        .map(String::from)
        .map_err(|e| e.to_string())
}

/// Best-effort dotted name for an entry that failed [`qualified_name`].
fn lossy_name(dir: &Path, file: &Path, namespace: &NamespacePath, simple_name: &str) -> String {
    let mut parts: Vec<String> = package_dirs(dir, file)
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    parts.push(simple_name.to_string());
    namespace.qualify(&parts.join("."))
}
