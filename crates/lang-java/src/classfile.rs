//! The parts of a JVM class file that matter for scanning.

use pkgscan_core::{LoadError, TypeKind};
use ristretto_classfile::attributes::Attribute;
use ristretto_classfile::{ClassAccessFlags, ClassFile, ConstantPool};
use std::io::Cursor;

/// Header facts of one class file, names in dotted form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassInfo {
    pub name: String,
    pub kind: TypeKind,
    /// `None` only for `java.lang.Object` and module descriptors.
    pub super_class: Option<String>,
    pub interfaces: Vec<String>,
    /// Visible and invisible (class-retention) annotations.
    pub annotations: Vec<String>,
}

impl ClassInfo {
    /// Parses `bytes`, reporting problems against `expected` (the name the
    /// bytes were looked up by).
    pub fn parse(expected: &str, bytes: Vec<u8>) -> Result<Self, LoadError> {
        let class = ClassFile::from_bytes(&mut Cursor::new(bytes))
            .map_err(|e| LoadError::malformed(expected, format!("Failed to parse class: {e:?}")))?;
        let pool = &class.constant_pool;

        let name = class_name(pool, class.this_class, expected)?;
        let super_class = if class.super_class == 0 {
            None
        } else {
            Some(class_name(pool, class.super_class, expected)?)
        };
        let interfaces = class
            .interfaces
            .iter()
            .map(|index| class_name(pool, *index, expected))
            .collect::<Result<Vec<_>, _>>()?;

        let mut annotations = Vec::new();
        for attribute in &class.attributes {
            let entries = match attribute {
                Attribute::RuntimeVisibleAnnotations { annotations, .. }
                | Attribute::RuntimeInvisibleAnnotations { annotations, .. } => annotations,
                _ => continue,
            };
            for annotation in entries {
                let descriptor = pool.try_get_utf8(annotation.type_index).map_err(|e| {
                    LoadError::malformed(expected, format!("Bad annotation type: {e:?}"))
                })?;
                if let Some(type_name) = descriptor_type_name(descriptor) {
                    annotations.push(type_name);
                }
            }
        }

        Ok(Self {
            name,
            kind: kind_of(class.access_flags),
            super_class,
            interfaces,
            annotations,
        })
    }
}

fn class_name(pool: &ConstantPool, index: u16, expected: &str) -> Result<String, LoadError> {
    pool.try_get_class(index)
        .map(|internal| internal.replace('/', "."))
        .map_err(|e| LoadError::malformed(expected, format!("Bad class reference #{index}: {e:?}")))
}

/// `Lcom/acme/Plugin;` -> `com.acme.Plugin`
fn descriptor_type_name(descriptor: &str) -> Option<String> {
    let internal = descriptor.strip_prefix('L')?.strip_suffix(';')?;
    Some(internal.replace('/', "."))
}

fn kind_of(flags: ClassAccessFlags) -> TypeKind {
    // Annotations also carry INTERFACE, so test them first.
    if flags.contains(ClassAccessFlags::ANNOTATION) {
        TypeKind::Annotation
    } else if flags.contains(ClassAccessFlags::INTERFACE) {
        TypeKind::Interface
    } else if flags.contains(ClassAccessFlags::ENUM) {
        TypeKind::Enum
    } else {
        TypeKind::Class
    }
}
