use crate::model::TypeHandle;
use crate::report::ResultSet;
use serde::{Deserialize, Serialize};

/// Predicate over a resolved type: optional base type and optional marker,
/// both by fully-qualified name. The empty filter accepts everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeFilter {
    pub supertype: Option<String>,
    pub marker: Option<String>,
}

impl TypeFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn supertype(base: impl Into<String>) -> Self {
        Self {
            supertype: Some(base.into()),
            marker: None,
        }
    }

    pub fn marker(marker: impl Into<String>) -> Self {
        Self {
            supertype: None,
            marker: Some(marker.into()),
        }
    }

    pub fn and_supertype(mut self, base: impl Into<String>) -> Self {
        self.supertype = Some(base.into());
        self
    }

    pub fn and_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = Some(marker.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.supertype.is_none() && self.marker.is_none()
    }

    pub fn matches(&self, handle: &TypeHandle) -> bool {
        self.supertype
            .as_deref()
            .is_none_or(|base| handle.is_subtype_of(base))
            && self
                .marker
                .as_deref()
                .is_none_or(|marker| handle.has_marker(marker))
    }

    pub fn apply(&self, set: &mut ResultSet) {
        if !self.is_empty() {
            set.retain(|handle| self.matches(handle));
        }
    }
}
