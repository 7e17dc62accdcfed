//! Parsed, type-checked source packages as produced by the loader
//!
//! These are plain data: the loader serializes them, the pipeline reads them.
//! Nothing in this crate parses source text.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ir::Import;
use crate::types::{PackageRef, TypeGraph, TypeId};

/// Index of a file in the loader's file set
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct FileId(pub u32);

/// Source position
///
/// Ordering is file-set order first, then line and column, so positions from
/// different files compare like global source offsets do.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Position {
    pub file: FileId,
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(file: u32, line: u32, column: u32) -> Self {
        Self {
            file: FileId(file),
            line,
            column,
        }
    }
}

/// Handle to an [`Object`] in its package
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    TypeName,
    Var,
    Const,
    Func,
}

/// A declared package-level entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Object {
    pub name: String,
    pub kind: ObjectKind,
    pub ty: TypeId,
    pub position: Position,
}

/// One spec of a type declaration; `object` is unset when the checker
/// recorded no definition for the name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSpec {
    pub name: String,
    #[serde(default)]
    pub object: Option<ObjectId>,
}

/// A (possibly grouped) type declaration with its leading doc comment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decl {
    /// Raw comment lines, markers included (`// Foo is ...`, `//go:mock`)
    #[serde(default)]
    pub doc: Vec<String>,
    #[serde(default)]
    pub specs: Vec<TypeSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub id: FileId,
    pub path: PathBuf,
    #[serde(default)]
    pub imports: Vec<Import>,
    #[serde(default)]
    pub decls: Vec<Decl>,
}

/// A type-checking diagnostic, kept verbatim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Loader-formatted location such as `widgets/api.go:12:7`
    #[serde(default)]
    pub location: Option<String>,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{}: {}", location, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// A loaded package: syntax, objects, types and checker diagnostics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub files: Vec<SourceFile>,
    #[serde(default)]
    pub objects: Vec<Object>,
    /// Package-level scope
    #[serde(default)]
    pub scope: BTreeMap<String, ObjectId>,
    #[serde(default)]
    pub types: TypeGraph,
    #[serde(default)]
    pub diagnostics: Vec<Diagnostic>,
}

impl Package {
    pub fn package_ref(&self) -> PackageRef {
        PackageRef::new(self.path.clone(), self.name.clone())
    }

    pub fn object(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(id.0 as usize)
    }

    pub fn lookup(&self, name: &str) -> Option<ObjectId> {
        self.scope.get(name).copied()
    }

    pub fn file(&self, id: FileId) -> Option<&SourceFile> {
        self.files.iter().find(|file| file.id == id)
    }
}
