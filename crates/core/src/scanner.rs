//! Package scanner: locate, walk, merge, filter.

use crate::catalog::TypeCatalog;
use crate::config::{Classpath, ScanConfig};
use crate::error::Result;
use crate::filter::TypeFilter;
use crate::locator::{Location, ResourceLocator};
use crate::namespace::NamespacePath;
use crate::report::ScanReport;
use crate::walker::{walk_archive, walk_directory};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Discovers the types living under a package across every lookup root.
///
/// Every call walks the backing locations again; nothing is cached here. Type
/// loading and its cache belong to the [`TypeCatalog`].
pub struct PackageScanner {
    classpath: Classpath,
    catalog: Arc<dyn TypeCatalog>,
    config: ScanConfig,
}

impl PackageScanner {
    pub fn new(classpath: Classpath, catalog: Arc<dyn TypeCatalog>) -> Self {
        Self {
            classpath,
            catalog,
            config: ScanConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ScanConfig) -> Self {
        self.config = config;
        self
    }

    pub fn classpath(&self) -> &Classpath {
        &self.classpath
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Locations backing `path`, without walking them.
    pub fn locate(&self, path: &str) -> Result<Vec<Location>> {
        let namespace = NamespacePath::parse(path)?;
        ResourceLocator::new(&self.classpath).locate(&namespace)
    }

    /// All types under `path`.
    pub fn scan_namespace(&self, path: &str) -> Result<ScanReport> {
        self.scan(path, &TypeFilter::all())
    }

    /// Types under `path` assignable to `base`.
    pub fn scan_namespace_by_supertype(&self, path: &str, base: &str) -> Result<ScanReport> {
        self.scan(path, &TypeFilter::supertype(base))
    }

    /// Types under `path` carrying `marker`.
    pub fn scan_namespace_by_marker(&self, path: &str, marker: &str) -> Result<ScanReport> {
        self.scan(path, &TypeFilter::marker(marker))
    }

    pub fn scan_namespace_by_supertype_and_marker(
        &self,
        path: &str,
        base: &str,
        marker: &str,
    ) -> Result<ScanReport> {
        self.scan(path, &TypeFilter::supertype(base).and_marker(marker))
    }

    /// Materializes the full result set for `path`, then narrows it.
    ///
    /// The root namespace yields an empty report.
    pub fn scan(&self, path: &str, filter: &TypeFilter) -> Result<ScanReport> {
        let namespace = NamespacePath::parse(path)?;
        let mut report = ScanReport::default();
        if namespace.is_root() {
            debug!("Root namespace requested, nothing to scan");
            return Ok(report);
        }

        let start = Instant::now();
        let locations = ResourceLocator::new(&self.classpath).locate(&namespace)?;
        let catalog = self.catalog.as_ref();

        for location in &locations {
            debug!("Walking {:?}", location);
            match location {
                Location::Directory(dir) => {
                    walk_directory(dir, &namespace, catalog, &self.config, &mut report)?
                }
                Location::Archive(archive) => {
                    walk_archive(archive, &namespace, catalog, &self.config, &mut report)?
                }
            }
        }

        report.locations = locations;
        let found = report.types.len();
        filter.apply(&mut report.types);

        info!(
            "Scanned {}: {} locations, {} types, {} kept, {} failures in {:?}",
            namespace,
            report.locations.len(),
            found,
            report.types.len(),
            report.failures.len(),
            start.elapsed()
        );
        Ok(report)
    }
}
