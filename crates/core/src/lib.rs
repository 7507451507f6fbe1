//! Package scanning: resolve a dotted package path to the types that live
//! under it, across directories of compiled units and zip/jar archives.
//!
//! ```text
//! NamespacePath ──▶ ResourceLocator ──▶ Location[] ──┬─▶ walk_directory ─┐
//!                                                    └─▶ walk_archive ───┤
//!                                                                        ▼
//!                        TypeFilter ◀── ResultSet (dedup) ◀── TypeCatalog
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod locator;
pub mod logging;
pub mod model;
pub mod namespace;
pub mod report;
pub mod scanner;
pub mod walker;

pub use catalog::{StaticCatalog, TypeCatalog};
pub use config::{ArchiveMatch, Classpath, ScanConfig};
pub use error::{LoadError, Result, ScanError};
pub use filter::TypeFilter;
pub use locator::{Location, ResourceLocator, existing_metadata};
pub use model::{TypeHandle, TypeKind};
pub use namespace::NamespacePath;
pub use report::{EntryFailure, ResultSet, ScanReport};
pub use scanner::PackageScanner;
