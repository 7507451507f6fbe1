use crate::classfile::ClassInfo;
use crate::source::ClassSource;
use dashmap::DashMap;
use pkgscan_core::{Classpath, LoadError, TypeCatalog, TypeHandle};
use std::sync::Arc;
use tracing::debug;

/// [`TypeCatalog`] over JVM class files found on a classpath.
///
/// Each name is parsed at most once; later resolves return the cached
/// handle. Supertypes that are not on the classpath (usually the JDK) stay in
/// the chain by name but are not expanded further.
pub struct ClassPathCatalog {
    source: ClassSource,
    loaded: DashMap<String, Arc<TypeHandle>>,
}

impl ClassPathCatalog {
    pub fn new(classpath: Classpath) -> Self {
        Self {
            source: ClassSource::new(classpath),
            loaded: DashMap::new(),
        }
    }

    pub fn classpath(&self) -> &Classpath {
        self.source.classpath()
    }

    pub fn open_archive_count(&self) -> usize {
        self.source.open_archive_count()
    }

    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }

    fn load(&self, name: &str, resolving: &mut Vec<String>) -> Result<Arc<TypeHandle>, LoadError> {
        if let Some(handle) = self.loaded.get(name) {
            return Ok(handle.value().clone());
        }
        if resolving.iter().any(|n| n == name) {
            return Err(LoadError::malformed(
                name,
                format!("cyclic inheritance through {}", resolving.join(" -> ")),
            ));
        }

        let bytes = self.source.read(name)?;
        let info = ClassInfo::parse(name, bytes)?;
        if info.name != name {
            return Err(LoadError::malformed(
                name,
                format!("class file declares {}", info.name),
            ));
        }

        resolving.push(name.to_string());
        let supertypes = self.supertype_chain(&info, resolving);
        resolving.pop();
        let supertypes = supertypes?;

        let handle = TypeHandle::new(info.name)
            .with_kind(info.kind)
            .with_supertypes(supertypes)
            .with_markers(info.annotations);

        // A concurrent load of the same name may have won; share its handle.
        Ok(self
            .loaded
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(handle))
            .clone())
    }

    fn supertype_chain(
        &self,
        info: &ClassInfo,
        resolving: &mut Vec<String>,
    ) -> Result<Vec<String>, LoadError> {
        let mut chain = Vec::new();
        for direct in info.super_class.iter().chain(info.interfaces.iter()) {
            chain.push(direct.clone());
            match self.load(direct, resolving) {
                Ok(parent) => chain.extend(parent.supertypes().iter().cloned()),
                Err(LoadError::NotFound(_)) => {
                    debug!("Supertype {} of {} is not on the classpath", direct, info.name);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(chain)
    }
}

impl TypeCatalog for ClassPathCatalog {
    fn resolve(&self, name: &str) -> Result<Arc<TypeHandle>, LoadError> {
        self.load(name, &mut Vec::new())
    }
}
