//! Finding annotated declarations and grouping them by output file
//!
//! A declaration opts in with a directive line in its doc comment:
//!
//! ```text
//! // Store persists widgets.
//! //
//! //go:mock store_mock.go
//! type Store interface { ... }
//! ```
//!
//! The argument is optional. Without it the configured default file name is
//! used, and failing that the source file name with the mock suffix.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Component, Path, PathBuf};

use ifacemock_core::source::{FileId, ObjectId, SourceFile};
use ifacemock_core::Package;

use crate::error::ExtractError;
use crate::options::Options;

/// Declarations directed to one output file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Group {
    /// Index of the declaring package in the scanned slice
    pub package: usize,
    /// Source files contributing declarations
    pub files: BTreeSet<FileId>,
    /// Annotated objects in discovery order
    pub objects: Vec<ObjectId>,
}

/// The argument of a directive line, or `None` when `line` is not one.
///
/// Whitespace after the marker is optional: `//go:mockout.go` names
/// `out.go`.
pub fn parse_directive<'l>(line: &'l str, marker: &str) -> Option<&'l str> {
    line.strip_prefix(marker).map(str::trim)
}

/// Where the mocks for declarations in `source` should be written
pub fn output_path(source: &Path, argument: &str, options: &Options) -> PathBuf {
    let dir = source.parent().unwrap_or_else(|| Path::new(""));
    if !argument.is_empty() {
        return join_clean(dir, argument);
    }
    if let Some(default) = options.default_output_file.as_deref().filter(|f| !f.is_empty()) {
        return join_clean(dir, default);
    }

    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match source.extension() {
        Some(ext) => format!("{}{}.{}", stem, options.mock_suffix, ext.to_string_lossy()),
        None => format!("{}{}", stem, options.mock_suffix),
    };
    dir.join(name)
}

/// Lexically join `rel` onto `dir`, resolving `.` and `..`. A rooted `rel`
/// is still taken relative to `dir`, even when `dir` is empty.
fn join_clean(dir: &Path, rel: &str) -> PathBuf {
    let rel = Path::new(rel)
        .components()
        .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)));

    let mut parts: Vec<Component<'_>> = Vec::new();
    for component in dir.components().chain(rel) {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }
    parts.iter().collect()
}

/// Group every annotated declaration in `packages` by output path.
///
/// Within a declaration the first directive line counts, and the first type
/// spec with a recorded object is taken. Whether the object is an interface
/// is checked later, during extraction.
pub fn scan(
    packages: &[Package],
    options: &Options,
) -> Result<BTreeMap<PathBuf, Group>, ExtractError> {
    let mut groups: BTreeMap<PathBuf, Group> = BTreeMap::new();

    for (index, package) in packages.iter().enumerate() {
        for file in &package.files {
            for (path, object) in annotated(file, options) {
                let group = groups.entry(path.clone()).or_insert_with(|| Group {
                    package: index,
                    ..Group::default()
                });
                if group.package != index {
                    return Err(ExtractError::MixedPackages { path });
                }
                group.files.insert(file.id);
                group.objects.push(object);
            }
        }
    }

    Ok(groups)
}

fn annotated<'f>(
    file: &'f SourceFile,
    options: &'f Options,
) -> impl Iterator<Item = (PathBuf, ObjectId)> + 'f {
    file.decls.iter().filter_map(move |decl| {
        let argument = decl
            .doc
            .iter()
            .find_map(|line| parse_directive(line, &options.marker))?;
        let object = decl.specs.iter().find_map(|spec| spec.object)?;
        Some((output_path(&file.path, argument, options), object))
    })
}
