//! Rendering types back to source text
//!
//! The output follows the host language's canonical type-string form
//! (`func(x int, ys ...string) (int, error)`, `map[string]*pkg.T`, ...).
//! Cross-package names are printed through a [`Qualifier`], which decides the
//! package prefix and may record which packages were referenced.

use crate::types::{ChanDir, PackageRef, TypeGraph, TypeId, TypeKind, TypeParamSpec, Var};

/// Decides how a reference into another package is prefixed.
///
/// Returning an empty string prints the bare name.
pub trait Qualifier {
    fn qualify(&mut self, package: &PackageRef) -> String;
}

/// Prefixes every name with its full package path. This is the structural
/// identity form used for deduplication.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathQualifier;

impl Qualifier for PathQualifier {
    fn qualify(&mut self, package: &PackageRef) -> String {
        package.path.clone()
    }
}

/// Render `ty` using `qualifier` for package prefixes.
pub fn type_string(graph: &TypeGraph, ty: TypeId, qualifier: &mut dyn Qualifier) -> String {
    let mut writer = TypeWriter::new(graph, qualifier);
    writer.ty(ty);
    writer.buf
}

/// Render a method signature without the leading `func`, as it appears in an
/// interface body: `(x int) error`.
pub fn signature_string(graph: &TypeGraph, sig: TypeId, qualifier: &mut dyn Qualifier) -> String {
    let mut writer = TypeWriter::new(graph, qualifier);
    writer.signature(sig);
    writer.buf
}

/// Render `ty` with full package paths.
pub fn structural_string(graph: &TypeGraph, ty: TypeId) -> String {
    type_string(graph, ty, &mut PathQualifier)
}

struct TypeWriter<'a> {
    graph: &'a TypeGraph,
    qualifier: &'a mut dyn Qualifier,
    buf: String,
    // Non-named types currently being written; only a malformed graph
    // can revisit one
    active: Vec<TypeId>,
}

impl<'a> TypeWriter<'a> {
    fn new(graph: &'a TypeGraph, qualifier: &'a mut dyn Qualifier) -> Self {
        Self {
            graph,
            qualifier,
            buf: String::new(),
            active: Vec::new(),
        }
    }

    fn ty(&mut self, id: TypeId) {
        let Some(kind) = self.graph.get(id) else {
            self.buf.push_str("invalid type");
            return;
        };
        if self.active.contains(&id) {
            self.buf.push_str("<cycle>");
            return;
        }
        self.active.push(id);

        match kind {
            TypeKind::Basic { basic } => self.buf.push_str(basic.name()),
            TypeKind::Array { len, elem } => {
                self.buf.push_str(&format!("[{}]", len));
                self.ty(*elem);
            }
            TypeKind::Slice { elem } => {
                self.buf.push_str("[]");
                self.ty(*elem);
            }
            TypeKind::Struct { fields } => {
                self.buf.push_str("struct{");
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        self.buf.push_str("; ");
                    }
                    if !field.embedded {
                        self.buf.push_str(&field.name);
                        self.buf.push(' ');
                    }
                    self.ty(field.ty);
                    if let Some(tag) = &field.tag {
                        self.buf.push_str(&format!(" {:?}", tag));
                    }
                }
                self.buf.push('}');
            }
            TypeKind::Pointer { elem } => {
                self.buf.push('*');
                self.ty(*elem);
            }
            TypeKind::Tuple { vars } => self.tuple(vars, false),
            TypeKind::Signature { .. } => {
                self.buf.push_str("func");
                self.signature(id);
            }
            TypeKind::Interface {
                methods,
                embeddeds,
                implicit,
            } => {
                if *implicit && methods.is_empty() && embeddeds.len() == 1 {
                    self.ty(embeddeds[0]);
                } else {
                    self.buf.push_str("interface{");
                    let mut first = true;
                    for method in methods {
                        if !first {
                            self.buf.push_str("; ");
                        }
                        first = false;
                        self.buf.push_str(&method.name);
                        self.signature(method.signature);
                    }
                    for embedded in embeddeds {
                        if !first {
                            self.buf.push_str("; ");
                        }
                        first = false;
                        self.ty(*embedded);
                    }
                    self.buf.push('}');
                }
            }
            TypeKind::Union { terms } => {
                for (i, term) in terms.iter().enumerate() {
                    if i > 0 {
                        self.buf.push_str(" | ");
                    }
                    if term.tilde {
                        self.buf.push('~');
                    }
                    self.ty(term.ty);
                }
            }
            TypeKind::Map { key, elem } => {
                self.buf.push_str("map[");
                self.ty(*key);
                self.buf.push(']');
                self.ty(*elem);
            }
            TypeKind::Chan { dir, elem } => {
                let parens = match dir {
                    ChanDir::Both => {
                        self.buf.push_str("chan ");
                        // chan (<-chan T) needs the parentheses
                        matches!(
                            self.graph.get(*elem),
                            Some(TypeKind::Chan {
                                dir: ChanDir::Recv,
                                ..
                            })
                        )
                    }
                    ChanDir::Send => {
                        self.buf.push_str("chan<- ");
                        false
                    }
                    ChanDir::Recv => {
                        self.buf.push_str("<-chan ");
                        false
                    }
                };
                if parens {
                    self.buf.push('(');
                }
                self.ty(*elem);
                if parens {
                    self.buf.push(')');
                }
            }
            TypeKind::Named {
                name,
                package,
                type_params,
                type_args,
                ..
            } => {
                // Named types print by name, so they never recurse into
                // their underlying type and cannot loop
                self.active.pop();
                self.type_name(package.as_ref(), name);
                if !type_args.is_empty() {
                    self.type_list(type_args);
                } else if !type_params.is_empty() {
                    self.type_param_list(type_params);
                }
                return;
            }
            TypeKind::TypeParam { name, .. } => self.buf.push_str(name),
            TypeKind::Alias { name, package, .. } => {
                self.active.pop();
                self.type_name(package.as_ref(), name);
                return;
            }
            TypeKind::Unknown => self.buf.push_str("<unknown type>"),
        }

        self.active.pop();
    }

    fn type_name(&mut self, package: Option<&PackageRef>, name: &str) {
        if let Some(package) = package {
            let prefix = self.qualifier.qualify(package);
            if !prefix.is_empty() {
                self.buf.push_str(&prefix);
                self.buf.push('.');
            }
        }
        self.buf.push_str(name);
    }

    fn type_list(&mut self, list: &[TypeId]) {
        self.buf.push('[');
        for (i, ty) in list.iter().enumerate() {
            if i > 0 {
                self.buf.push_str(", ");
            }
            self.ty(*ty);
        }
        self.buf.push(']');
    }

    /// `[K comparable, V any]`; consecutive parameters sharing a constraint
    /// are grouped: `[K, V any]`.
    fn type_param_list(&mut self, params: &[TypeParamSpec]) {
        self.buf.push('[');
        let mut prev: Option<TypeId> = None;
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                if let Some(prev) = prev.filter(|prev| *prev != param.constraint) {
                    self.buf.push(' ');
                    self.ty(prev);
                }
                self.buf.push_str(", ");
            }
            prev = Some(param.constraint);
            self.buf.push_str(&param.name);
        }
        if let Some(prev) = prev {
            self.buf.push(' ');
            self.ty(prev);
        }
        self.buf.push(']');
    }

    fn tuple(&mut self, vars: &[Var], variadic: bool) {
        self.buf.push('(');
        for (i, var) in vars.iter().enumerate() {
            if i > 0 {
                self.buf.push_str(", ");
            }
            if !var.name.is_empty() {
                self.buf.push_str(&var.name);
                self.buf.push(' ');
            }
            let mut ty = var.ty;
            if variadic && i == vars.len() - 1 {
                if let Some(TypeKind::Slice { elem }) = self.graph.get(ty) {
                    self.buf.push_str("...");
                    ty = *elem;
                }
            }
            self.ty(ty);
        }
        self.buf.push(')');
    }

    fn signature(&mut self, sig: TypeId) {
        let Some(TypeKind::Signature {
            params,
            results,
            variadic,
        }) = self.graph.get(sig)
        else {
            self.buf.push_str("(<not a signature>)");
            return;
        };

        self.tuple(params, *variadic);
        match results.as_slice() {
            [] => {}
            [single] if single.name.is_empty() => {
                self.buf.push(' ');
                self.ty(single.ty);
            }
            _ => {
                self.buf.push(' ');
                self.tuple(results, false);
            }
        }
    }
}
