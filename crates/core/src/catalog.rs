//! The type-loading seam: how a fully-qualified name becomes a [`TypeHandle`].

use crate::error::LoadError;
use crate::model::TypeHandle;
use dashmap::DashMap;
use std::sync::Arc;

/// Resolves fully-qualified names to loaded types.
///
/// Implementations own the process-wide type cache and must return the same
/// `Arc` for repeated resolves of one name.
pub trait TypeCatalog: Send + Sync {
    fn resolve(&self, name: &str) -> Result<Arc<TypeHandle>, LoadError>;
}

impl<C: TypeCatalog + ?Sized> TypeCatalog for Arc<C> {
    fn resolve(&self, name: &str) -> Result<Arc<TypeHandle>, LoadError> {
        (**self).resolve(name)
    }
}

/// In-memory catalog over types registered up front.
#[derive(Debug, Default)]
pub struct StaticCatalog {
    types: DashMap<String, Arc<TypeHandle>>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(self, handle: TypeHandle) -> Self {
        self.register(handle);
        self
    }

    /// Registers a type; an existing entry of the same name is kept.
    pub fn register(&self, handle: TypeHandle) -> Arc<TypeHandle> {
        self.types
            .entry(handle.name().to_string())
            .or_insert_with(|| Arc::new(handle))
            .clone()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl TypeCatalog for StaticCatalog {
    fn resolve(&self, name: &str) -> Result<Arc<TypeHandle>, LoadError> {
        self.types
            .get(name)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| LoadError::NotFound(name.to_string()))
    }
}
