//! Intermediate representation consumed by the mock template
//!
//! One [`File`] per generated output path. All type expressions are already
//! rendered to text and qualified against the file's import list, so a
//! renderer only has to splice strings.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::naming::last_path_segment;
use crate::source::Position;

/// Rendered form of the context parameter type. Renderers key tracing
/// instrumentation off this exact string.
pub const CONTEXT_TYPE: &str = "context.Context";

/// Alias marking an import kept only for its side effects
pub const BLANK_IMPORT: &str = "_";

/// Alias merging the imported package into the file's namespace
pub const DOT_IMPORT: &str = ".";

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Import {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Import {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: None,
        }
    }

    pub fn named(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: Some(name.into()),
        }
    }

    /// The identifier this import is referred to by inside the file
    pub fn local_name(&self) -> &str {
        match &self.name {
            Some(name) => name,
            None => last_path_segment(&self.path),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.name.as_deref() == Some(BLANK_IMPORT)
    }

    pub fn is_dot(&self) -> bool {
        self.name.as_deref() == Some(DOT_IMPORT)
    }
}

impl fmt::Display for Import {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} {:?}", name, self.path),
            None => write!(f, "{:?}", self.path),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeParam {
    pub name: String,
    pub constraint: String,
}

/// Type parameter list of a generic interface
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeParams(pub Vec<TypeParam>);

impl TypeParams {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TypeParam> {
        self.0.iter()
    }

    /// Instantiation form, `[T, U]`; empty when not generic
    pub fn names(&self) -> String {
        if self.0.is_empty() {
            return String::new();
        }
        let names: Vec<&str> = self.0.iter().map(|p| p.name.as_str()).collect();
        format!("[{}]", names.join(", "))
    }
}

/// Declaration form, `[T any, U fmt.Stringer]`; empty when not generic
impl fmt::Display for TypeParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return Ok(());
        }
        let params: Vec<String> = self
            .0
            .iter()
            .map(|p| format!("{} {}", p.name, p.constraint))
            .collect();
        write!(f, "[{}]", params.join(", "))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    /// Empty when the parameter is unnamed
    #[serde(default)]
    pub name: String,
    /// Rendered type; `[]T` for a variadic parameter
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub variadic: bool,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            variadic: false,
        }
    }

    pub fn is_context(&self) -> bool {
        self.ty == CONTEXT_TYPE
    }

    /// The type as written in a parameter list: `...T` when variadic
    pub fn declared_type(&self) -> String {
        if self.variadic {
            if let Some(elem) = self.ty.strip_prefix("[]") {
                return format!("...{}", elem);
            }
        }
        self.ty.clone()
    }
}

/// Ordered parameter list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(pub Vec<Param>);

impl Params {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Param> {
        self.0.iter()
    }

    /// Name used by generated code for the parameter at `index`: the
    /// declared name, or `param{index+1}` when unnamed or blank
    pub fn arg_name(&self, index: usize) -> String {
        match self.0.get(index) {
            Some(param) if !param.name.is_empty() && param.name != BLANK_IMPORT => {
                param.name.clone()
            }
            _ => format!("param{}", index + 1),
        }
    }

    /// Parameter list with every parameter named: `param1 string, strs ...int`
    pub fn named_string(&self) -> String {
        self.0
            .iter()
            .enumerate()
            .map(|(i, param)| format!("{} {}", self.arg_name(i), param.declared_type()))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Forwarding argument list: `param1, strs...`
    pub fn args_string(&self) -> String {
        self.0
            .iter()
            .enumerate()
            .map(|(i, param)| {
                if param.variadic {
                    format!("{}...", self.arg_name(i))
                } else {
                    self.arg_name(i)
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Parameter types only, as in a function type: `(string, ...int)`
    pub fn types_string(&self) -> String {
        let types: Vec<String> = self.0.iter().map(Param::declared_type).collect();
        format!("({})", types.join(", "))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodResult {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

impl MethodResult {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

/// Ordered result list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Results(pub Vec<MethodResult>);

impl Results {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MethodResult> {
        self.0.iter()
    }
}

/// Result clause as written after a parameter list: nothing, `T`, or
/// `(a T, U)`
impl fmt::Display for Results {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [] => Ok(()),
            [single] if single.name.is_empty() => write!(f, "{}", single.ty),
            results => {
                let items: Vec<String> = results
                    .iter()
                    .map(|r| {
                        if r.name.is_empty() {
                            r.ty.clone()
                        } else {
                            format!("{} {}", r.name, r.ty)
                        }
                    })
                    .collect();
                write!(f, "({})", items.join(", "))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    pub params: Params,
    pub results: Results,
    /// Structural string of the interface that declares the method
    pub origin: String,
    pub position: Position,
}

impl Method {
    /// Structural equality: same name and same rendered signature. Parameter
    /// names, origin and position do not matter.
    pub fn same_signature(&self, other: &Method) -> bool {
        self.name == other.name
            && self.params.len() == other.params.len()
            && self.results.len() == other.results.len()
            && self
                .params
                .iter()
                .zip(other.params.iter())
                .all(|(a, b)| a.ty == b.ty && a.variadic == b.variadic)
            && self
                .results
                .iter()
                .zip(other.results.iter())
                .all(|(a, b)| a.ty == b.ty)
    }

    /// Whether any parameter carries the context type
    pub fn takes_context(&self) -> bool {
        self.params.iter().any(Param::is_context)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interface {
    pub name: String,
    #[serde(default)]
    pub type_params: TypeParams,
    pub methods: Vec<Method>,
}

/// One generated output unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    pub package: String,
    pub imports: Vec<Import>,
    pub interfaces: Vec<Interface>,
}
