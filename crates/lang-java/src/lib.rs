//! JVM class files as a [`TypeCatalog`](pkgscan_core::TypeCatalog).

pub mod catalog;
pub mod classfile;
pub mod source;

pub use catalog::ClassPathCatalog;
pub use classfile::ClassInfo;

use pkgscan_core::{Classpath, PackageScanner, ScanConfig};
use std::sync::Arc;

/// Scanner whose types are loaded from the same classpath it walks.
pub fn class_path_scanner(classpath: Classpath, config: ScanConfig) -> PackageScanner {
    let catalog = Arc::new(ClassPathCatalog::new(classpath.clone()));
    PackageScanner::new(classpath, catalog).with_config(config)
}
