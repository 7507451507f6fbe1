//! Builds minimal JVM class files byte by byte: header, constant pool,
//! hierarchy, and class-level annotations. No fields, methods or code.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

pub const ACC_PUBLIC_SUPER: u16 = 0x0021;
#[allow(dead_code)]
pub const ACC_INTERFACE: u16 = 0x0601;
#[allow(dead_code)]
pub const ACC_ANNOTATION: u16 = 0x2601;
#[allow(dead_code)]
pub const ACC_ENUM: u16 = 0x4031;

#[derive(Default)]
struct ConstantPool {
    entries: Vec<Vec<u8>>,
}

impl ConstantPool {
    fn utf8(&mut self, value: &str) -> u16 {
        let mut entry = vec![1u8];
        entry.extend_from_slice(&(value.len() as u16).to_be_bytes());
        entry.extend_from_slice(value.as_bytes());
        self.push(entry)
    }

    fn class(&mut self, dotted: &str) -> u16 {
        let name_index = self.utf8(&dotted.replace('.', "/"));
        let mut entry = vec![7u8];
        entry.extend_from_slice(&name_index.to_be_bytes());
        self.push(entry)
    }

    fn push(&mut self, entry: Vec<u8>) -> u16 {
        if let Some(pos) = self.entries.iter().position(|e| *e == entry) {
            return pos as u16 + 1;
        }
        self.entries.push(entry);
        self.entries.len() as u16
    }
}

pub struct ClassSpec {
    name: String,
    access: u16,
    super_class: Option<String>,
    interfaces: Vec<String>,
    visible: Vec<String>,
    invisible: Vec<String>,
}

#[allow(dead_code)]
impl ClassSpec {
    pub fn class(name: &str) -> Self {
        Self {
            name: name.to_string(),
            access: ACC_PUBLIC_SUPER,
            super_class: Some("java.lang.Object".to_string()),
            interfaces: Vec::new(),
            visible: Vec::new(),
            invisible: Vec::new(),
        }
    }

    pub fn with_access(mut self, access: u16) -> Self {
        self.access = access;
        self
    }

    pub fn extends(mut self, super_class: &str) -> Self {
        self.super_class = Some(super_class.to_string());
        self
    }

    pub fn implements(mut self, interface: &str) -> Self {
        self.interfaces.push(interface.to_string());
        self
    }

    pub fn annotated(mut self, annotation: &str) -> Self {
        self.visible.push(annotation.to_string());
        self
    }

    pub fn annotated_invisible(mut self, annotation: &str) -> Self {
        self.invisible.push(annotation.to_string());
        self
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut pool = ConstantPool::default();
        let this_index = pool.class(&self.name);
        let super_index = self.super_class.as_deref().map(|s| pool.class(s)).unwrap_or(0);
        let interface_indices: Vec<u16> = self.interfaces.iter().map(|i| pool.class(i)).collect();

        let mut attributes: Vec<(u16, Vec<u8>)> = Vec::new();
        for (attribute_name, annotations) in [
            ("RuntimeVisibleAnnotations", &self.visible),
            ("RuntimeInvisibleAnnotations", &self.invisible),
        ] {
            if annotations.is_empty() {
                continue;
            }
            let name_index = pool.utf8(attribute_name);
            let mut body = Vec::new();
            body.extend_from_slice(&(annotations.len() as u16).to_be_bytes());
            for annotation in annotations {
                let type_index = pool.utf8(&format!("L{};", annotation.replace('.', "/")));
                body.extend_from_slice(&type_index.to_be_bytes());
                body.extend_from_slice(&0u16.to_be_bytes());
            }
            attributes.push((name_index, body));
        }

        let mut out = Vec::new();
        out.extend_from_slice(&[0xCA, 0xFE, 0xBA, 0xBE]);
        out.extend_from_slice(&0u16.to_be_bytes());
        out.extend_from_slice(&52u16.to_be_bytes());
        out.extend_from_slice(&(pool.entries.len() as u16 + 1).to_be_bytes());
        for entry in &pool.entries {
            out.extend_from_slice(entry);
        }
        out.extend_from_slice(&self.access.to_be_bytes());
        out.extend_from_slice(&this_index.to_be_bytes());
        out.extend_from_slice(&super_index.to_be_bytes());
        out.extend_from_slice(&(interface_indices.len() as u16).to_be_bytes());
        for index in interface_indices {
            out.extend_from_slice(&index.to_be_bytes());
        }
        out.extend_from_slice(&0u16.to_be_bytes()); // fields
        out.extend_from_slice(&0u16.to_be_bytes()); // methods
        out.extend_from_slice(&(attributes.len() as u16).to_be_bytes());
        for (name_index, body) in attributes {
            out.extend_from_slice(&name_index.to_be_bytes());
            out.extend_from_slice(&(body.len() as u32).to_be_bytes());
            out.extend_from_slice(&body);
        }
        out
    }

    pub fn entry_path(&self) -> String {
        format!("{}.class", self.name.replace('.', "/"))
    }
}

#[allow(dead_code)]
pub fn write_classes(root: &Path, classes: &[ClassSpec]) {
    for class in classes {
        let path = root.join(class.entry_path());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, class.to_bytes()).unwrap();
    }
}

#[allow(dead_code)]
pub fn write_jar(path: &Path, classes: &[ClassSpec]) {
    let mut zip = zip::ZipWriter::new(File::create(path).unwrap());
    let options = zip::write::SimpleFileOptions::default();
    for class in classes {
        zip.start_file(class.entry_path(), options).unwrap();
        zip.write_all(&class.to_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

/// `Foo extends Base implements Service` with `@Plugin`; `Bar` is plain;
/// `Service extends Named`; `Plugin` is the annotation type itself.
#[allow(dead_code)]
pub fn plugin_fixture() -> Vec<ClassSpec> {
    vec![
        ClassSpec::class("com.acme.Base"),
        ClassSpec::class("com.acme.Named").with_access(ACC_INTERFACE),
        ClassSpec::class("com.acme.Service")
            .with_access(ACC_INTERFACE)
            .implements("com.acme.Named"),
        ClassSpec::class("com.acme.Plugin")
            .with_access(ACC_ANNOTATION)
            .implements("java.lang.annotation.Annotation"),
        ClassSpec::class("com.acme.plugins.Foo")
            .extends("com.acme.Base")
            .implements("com.acme.Service")
            .annotated("com.acme.Plugin"),
        ClassSpec::class("com.acme.plugins.Bar"),
    ]
}
