//! Deduplicated scan results and the per-entry failures collected beside them.

use crate::error::LoadError;
use crate::locator::Location;
use crate::model::TypeHandle;
use indexmap::IndexMap;
use serde::Serialize;
use std::sync::Arc;

/// Types keyed by fully-qualified name, in discovery order.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    types: IndexMap<String, Arc<TypeHandle>>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if a type with the same name was already present; the
    /// first occurrence is kept.
    pub fn insert(&mut self, handle: Arc<TypeHandle>) -> bool {
        if self.types.contains_key(handle.name()) {
            return false;
        }
        self.types.insert(handle.name().to_string(), handle);
        true
    }

    pub fn get(&self, name: &str) -> Option<&Arc<TypeHandle>> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<TypeHandle>> {
        self.types.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&TypeHandle) -> bool) {
        self.types.retain(|_, handle| keep(handle));
    }
}

impl FromIterator<Arc<TypeHandle>> for ResultSet {
    fn from_iter<I: IntoIterator<Item = Arc<TypeHandle>>>(iter: I) -> Self {
        let mut set = ResultSet::new();
        for handle in iter {
            set.insert(handle);
        }
        set
    }
}

impl IntoIterator for ResultSet {
    type Item = Arc<TypeHandle>;
    type IntoIter = indexmap::map::IntoValues<String, Arc<TypeHandle>>;

    fn into_iter(self) -> Self::IntoIter {
        self.types.into_values()
    }
}

impl Serialize for ResultSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.types.values().map(|h| h.as_ref()))
    }
}

/// An entry that was skipped because its type could not be loaded.
#[derive(Debug)]
pub struct EntryFailure {
    /// File path or archive entry name the type was derived from.
    pub entry: String,
    pub type_name: String,
    pub error: LoadError,
}

impl Serialize for EntryFailure {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("EntryFailure", 3)?;
        state.serialize_field("entry", &self.entry)?;
        state.serialize_field("type_name", &self.type_name)?;
        state.serialize_field("error", &self.error.to_string())?;
        state.end()
    }
}

/// Outcome of one scan call.
#[derive(Debug, Default, Serialize)]
pub struct ScanReport {
    pub types: ResultSet,
    pub failures: Vec<EntryFailure>,
    pub locations: Vec<Location>,
    /// Types seen again in a later location and dropped.
    pub duplicates: usize,
}

impl ScanReport {
    pub(crate) fn accept(&mut self, handle: Arc<TypeHandle>) {
        if !self.types.insert(handle) {
            self.duplicates += 1;
        }
    }

    pub(crate) fn reject(&mut self, entry: String, type_name: String, error: LoadError) {
        tracing::warn!("Skipping {} ({}): {}", type_name, entry, error);
        self.failures.push(EntryFailure {
            entry,
            type_name,
            error,
        });
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}
