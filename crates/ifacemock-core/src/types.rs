//! Resolved type graph handed over by the source loader
//!
//! Every loaded package owns one [`TypeGraph`]: an arena of [`TypeKind`] nodes
//! addressed by [`TypeId`] handles. Named types refer back into the arena, so
//! the graph may contain cycles (an interface method taking the enclosing
//! interface as a parameter, mutually recursive structs, ...). Anything that
//! walks the graph must track visited ids.

use serde::{Deserialize, Serialize};

use crate::source::Position;

/// Handle to a node in a [`TypeGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeId(pub u32);

impl TypeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Identity of the package a named type belongs to
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PackageRef {
    /// Unique import path, e.g. `github.com/acme/widgets/internal`
    pub path: String,
    /// Name declared in the package clause
    pub name: String,
}

impl PackageRef {
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
        }
    }
}

/// Predeclared basic types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BasicKind {
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uintptr,
    Float32,
    Float64,
    Complex64,
    Complex128,
    String,
    UnsafePointer,
    Byte,
    Rune,
    UntypedNil,
    /// Placeholder left by the type checker for a reference it could not resolve
    Invalid,
}

impl BasicKind {
    pub fn name(self) -> &'static str {
        match self {
            BasicKind::Bool => "bool",
            BasicKind::Int => "int",
            BasicKind::Int8 => "int8",
            BasicKind::Int16 => "int16",
            BasicKind::Int32 => "int32",
            BasicKind::Int64 => "int64",
            BasicKind::Uint => "uint",
            BasicKind::Uint8 => "uint8",
            BasicKind::Uint16 => "uint16",
            BasicKind::Uint32 => "uint32",
            BasicKind::Uint64 => "uint64",
            BasicKind::Uintptr => "uintptr",
            BasicKind::Float32 => "float32",
            BasicKind::Float64 => "float64",
            BasicKind::Complex64 => "complex64",
            BasicKind::Complex128 => "complex128",
            BasicKind::String => "string",
            BasicKind::UnsafePointer => "unsafe.Pointer",
            BasicKind::Byte => "byte",
            BasicKind::Rune => "rune",
            BasicKind::UntypedNil => "untyped nil",
            BasicKind::Invalid => "invalid type",
        }
    }
}

/// Channel direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChanDir {
    #[default]
    Both,
    Send,
    Recv,
}

/// A named slot in a tuple or signature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Var {
    /// Empty for unnamed parameters/results
    #[serde(default)]
    pub name: String,
    pub ty: TypeId,
}

impl Var {
    pub fn new(name: impl Into<String>, ty: TypeId) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    pub fn unnamed(ty: TypeId) -> Self {
        Self::new("", ty)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub ty: TypeId,
    #[serde(default)]
    pub embedded: bool,
    #[serde(default)]
    pub tag: Option<String>,
}

/// A method declared directly in an interface body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSpec {
    pub name: String,
    /// Expected to point at a [`TypeKind::Signature`]
    pub signature: TypeId,
    pub position: Position,
}

/// Term of a type-set union (`~int | string`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    #[serde(default)]
    pub tilde: bool,
    pub ty: TypeId,
}

/// Type parameter declared on a generic named type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeParamSpec {
    pub name: String,
    pub constraint: TypeId,
}

/// One node of the type graph
///
/// The set of variants is closed; kinds the loader knows about but this crate
/// does not model deserialize as [`TypeKind::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeKind {
    Basic {
        basic: BasicKind,
    },
    Array {
        len: u64,
        elem: TypeId,
    },
    Slice {
        elem: TypeId,
    },
    Struct {
        #[serde(default)]
        fields: Vec<Field>,
    },
    Pointer {
        elem: TypeId,
    },
    Tuple {
        #[serde(default)]
        vars: Vec<Var>,
    },
    Signature {
        #[serde(default)]
        params: Vec<Var>,
        #[serde(default)]
        results: Vec<Var>,
        /// The last parameter is `...T` (its type is then a slice)
        #[serde(default)]
        variadic: bool,
    },
    Interface {
        /// Explicitly declared methods only
        #[serde(default)]
        methods: Vec<MethodSpec>,
        #[serde(default)]
        embeddeds: Vec<TypeId>,
        /// Constraint written without `interface{...}`, e.g. `[T ~int]`
        #[serde(default)]
        implicit: bool,
    },
    Union {
        terms: Vec<Term>,
    },
    Map {
        key: TypeId,
        elem: TypeId,
    },
    Chan {
        #[serde(default)]
        dir: ChanDir,
        elem: TypeId,
    },
    Named {
        name: String,
        /// `None` for predeclared names such as `error` or `comparable`
        #[serde(default)]
        package: Option<PackageRef>,
        #[serde(default)]
        type_params: Vec<TypeParamSpec>,
        #[serde(default)]
        type_args: Vec<TypeId>,
        underlying: TypeId,
    },
    TypeParam {
        name: String,
        constraint: TypeId,
    },
    Alias {
        name: String,
        #[serde(default)]
        package: Option<PackageRef>,
        target: TypeId,
    },
    #[serde(other)]
    Unknown,
}

impl TypeKind {
    pub fn is_interface(&self) -> bool {
        matches!(self, TypeKind::Interface { .. })
    }
}

/// Arena of resolved types for one package
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeGraph {
    types: Vec<TypeKind>,
}

impl TypeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, kind: TypeKind) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.types.push(kind);
        id
    }

    /// Overwrite a node in place. Used to close cycles: reserve a named type,
    /// build the types that refer to it, then fill in its underlying type.
    pub fn replace(&mut self, id: TypeId, kind: TypeKind) -> Option<TypeKind> {
        self.types
            .get_mut(id.index())
            .map(|slot| std::mem::replace(slot, kind))
    }

    pub fn get(&self, id: TypeId) -> Option<&TypeKind> {
        self.types.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Follow named types and aliases down to the first structural type.
    ///
    /// Returns `None` for dangling ids or a named/alias chain that loops.
    pub fn underlying(&self, id: TypeId) -> Option<TypeId> {
        let mut current = id;
        // A well-formed chain visits each node at most once
        for _ in 0..=self.types.len() {
            match self.get(current)? {
                TypeKind::Named { underlying, .. } => current = *underlying,
                TypeKind::Alias { target, .. } => current = *target,
                _ => return Some(current),
            }
        }
        None
    }
}
