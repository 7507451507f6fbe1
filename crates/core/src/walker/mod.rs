//! Per-location walkers. Both feed resolved types into a [`ScanReport`].
//!
//! [`ScanReport`]: crate::ScanReport

mod archive;
mod directory;

pub use archive::walk_archive;
pub use directory::walk_directory;

use crate::catalog::TypeCatalog;
use crate::config::ScanConfig;
use crate::report::ScanReport;

/// Resolves one candidate and records either the handle or the failure.
fn load_into(
    catalog: &dyn TypeCatalog,
    config: &ScanConfig,
    entry: String,
    type_name: String,
    report: &mut ScanReport,
) {
    if !config.accepts_name(&type_name) {
        return;
    }
    match catalog.resolve(&type_name) {
        Ok(handle) => report.accept(handle),
        Err(e) => report.reject(entry, type_name, e),
    }
}
