//! Assembling one [`File`] per output path
//!
//! This is the entry point a renderer consumes: scan for directives, merge
//! the imports of each group, and extract every interface through one
//! qualifier so the file's import list matches the rendered signatures.

use std::collections::BTreeMap;
use std::path::PathBuf;

use ifacemock_core::ir::File;
use ifacemock_core::Package;
use tracing::debug;

use crate::directive::{scan, Group};
use crate::error::ExtractError;
use crate::imports::aggregate;
use crate::interface::extract_interface;
use crate::options::Options;
use crate::qualifier::{ImportQualifier, UsedImports};

/// Build the [`File`] for one scanned group.
///
/// Any failing declaration fails the whole group; no partial file is
/// returned.
pub fn assemble_group(
    packages: &[Package],
    group: &Group,
    options: &Options,
) -> Result<File, ExtractError> {
    let package = packages.get(group.package).ok_or_else(|| {
        ExtractError::LookupFailure(format!("package #{} was not loaded", group.package))
    })?;

    let mut imports = Vec::new();
    for id in &group.files {
        let file = package.file(*id).ok_or_else(|| {
            ExtractError::LookupFailure(format!(
                "file #{} not found in package {}",
                id.0, package.name
            ))
        })?;
        imports.extend(file.imports.iter().cloned());
    }
    let imports = aggregate(imports, options)?;

    let mut used = UsedImports::new();
    let mut qualifier = ImportQualifier::new(&package.path, &imports, &mut used);
    let mut interfaces = Vec::with_capacity(group.objects.len());
    for id in &group.objects {
        let object = package.object(*id).ok_or_else(|| {
            ExtractError::LookupFailure(format!(
                "object #{} not found in package {}",
                id.0, package.name
            ))
        })?;
        interfaces.push(extract_interface(package, object, &mut qualifier)?);
    }

    debug!(
        package = %package.path,
        interfaces = interfaces.len(),
        imports = used.len(),
        "assembled file"
    );
    Ok(File {
        package: package.name.clone(),
        imports: used.into_vec(),
        interfaces,
    })
}

/// Assemble every annotated declaration in `packages`, keeping each output
/// path's result separate.
///
/// Only a scanning failure aborts the whole run; a broken declaration fails
/// just its own path.
pub fn generate_each(
    packages: &[Package],
    options: &Options,
) -> Result<BTreeMap<PathBuf, Result<File, ExtractError>>, ExtractError> {
    let groups = scan(packages, options)?;
    Ok(groups
        .into_iter()
        .map(|(path, group)| {
            debug!(path = %path.display(), objects = group.objects.len(), "assembling group");
            let file = assemble_group(packages, &group, options);
            (path, file)
        })
        .collect())
}

/// Assemble every annotated declaration in `packages`, failing on the first
/// error.
pub fn generate_all(
    packages: &[Package],
    options: &Options,
) -> Result<BTreeMap<PathBuf, File>, ExtractError> {
    generate_each(packages, options)?
        .into_iter()
        .map(|(path, file)| file.map(|file| (path, file)))
        .collect()
}

/// Assemble a single interface of `package` by name, regardless of
/// directives. Only the declaring file's imports are considered.
pub fn generate_interface(
    package: &Package,
    name: &str,
    options: &Options,
) -> Result<File, ExtractError> {
    let id = package.lookup(name).ok_or_else(|| {
        ExtractError::LookupFailure(format!(
            "interface {} not found in package {}",
            name, package.name
        ))
    })?;
    let object = package.object(id).ok_or_else(|| {
        ExtractError::LookupFailure(format!(
            "interface {} not found in package {}",
            name, package.name
        ))
    })?;
    let file = package
        .file(object.position.file)
        .ok_or_else(|| {
            ExtractError::LookupFailure(format!(
                "declaration for interface {} not found in package {}'s syntax trees",
                name, package.name
            ))
        })?;

    let group = Group {
        package: 0,
        files: [file.id].into_iter().collect(),
        objects: vec![id],
    };
    assemble_group(std::slice::from_ref(package), &group, options)
}
