use pkgscan_core::{StaticCatalog, TypeHandle};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

#[allow(dead_code)]
pub fn touch_units(root: &Path, relative_paths: &[&str]) {
    for relative in relative_paths {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"unit").unwrap();
    }
}

#[allow(dead_code)]
pub fn write_jar(path: &Path, entries: &[&str]) {
    let file = File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default();
    for entry in entries {
        zip.start_file(*entry, options).unwrap();
        zip.write_all(b"unit").unwrap();
    }
    zip.finish().unwrap();
}

/// `Foo` extends `Base` and carries `@Plugin`; `Bar` is a plain class.
#[allow(dead_code)]
pub fn plugin_catalog() -> StaticCatalog {
    StaticCatalog::new()
        .with_type(
            TypeHandle::new("com.acme.plugins.Foo")
                .with_supertypes(["com.acme.Base", "java.lang.Object"])
                .with_markers(["com.acme.Plugin"]),
        )
        .with_type(TypeHandle::new("com.acme.plugins.Bar").with_supertypes(["java.lang.Object"]))
        .with_type(
            TypeHandle::new("com.acme.plugins.Tagged")
                .with_supertypes(["java.lang.Object"])
                .with_markers(["com.acme.Plugin"]),
        )
        .with_type(
            TypeHandle::new("com.acme.plugins.Sub")
                .with_supertypes(["com.acme.Base", "java.lang.Object"]),
        )
        .with_type(TypeHandle::new("com.acme.pluginsextra.Baz"))
}
