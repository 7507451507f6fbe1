use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    #[default]
    Class,
    Interface,
    Enum,
    Annotation,
}

/// A resolved, loaded type.
///
/// Handles are built once by a [`TypeCatalog`](crate::TypeCatalog) and shared
/// behind an `Arc`; nothing in the scanner mutates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeHandle {
    name: String,
    #[serde(default)]
    kind: TypeKind,
    /// Transitive supertypes, nearest first. Does not contain `name`.
    #[serde(default)]
    supertypes: Vec<String>,
    #[serde(default)]
    markers: BTreeSet<String>,
}

impl TypeHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Class,
            supertypes: Vec::new(),
            markers: BTreeSet::new(),
        }
    }

    pub fn with_kind(mut self, kind: TypeKind) -> Self {
        self.kind = kind;
        self
    }

    /// Appends supertypes to the chain, skipping names already present.
    pub fn with_supertypes<I, S>(mut self, supertypes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for supertype in supertypes {
            let supertype = supertype.into();
            if supertype != self.name && !self.supertypes.contains(&supertype) {
                self.supertypes.push(supertype);
            }
        }
        self
    }

    pub fn with_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.markers.extend(markers.into_iter().map(Into::into));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Last segment of the fully-qualified name.
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn supertypes(&self) -> &[String] {
        &self.supertypes
    }

    pub fn markers(&self) -> &BTreeSet<String> {
        &self.markers
    }

    /// Assignability test: a type is a subtype of itself.
    pub fn is_subtype_of(&self, base: &str) -> bool {
        self.name == base || self.supertypes.iter().any(|s| s == base)
    }

    pub fn has_marker(&self, marker: &str) -> bool {
        self.markers.contains(marker)
    }
}
