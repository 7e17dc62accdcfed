//! Hand-assembling loader output for tests

use std::path::PathBuf;

use ifacemock_core::ir::Import;
use ifacemock_core::source::{
    Decl, Diagnostic, FileId, Object, ObjectId, ObjectKind, Position, SourceFile, TypeSpec,
};
use ifacemock_core::types::{
    BasicKind, Field, MethodSpec, PackageRef, Term, TypeParamSpec, Var,
};
use ifacemock_core::{Package, TypeId, TypeKind};

/// Incrementally builds a [`Package`] and its type graph
pub struct PackageBuilder {
    pkg: Package,
    file_base: u32,
}

impl PackageBuilder {
    pub fn new(path: &str, name: &str) -> Self {
        Self {
            pkg: Package {
                name: name.to_string(),
                path: path.to_string(),
                ..Package::default()
            },
            file_base: 0,
        }
    }

    /// Offset for file ids, so several packages can share one file set
    pub fn file_base(mut self, base: u32) -> Self {
        self.file_base = base;
        self
    }

    pub fn package_ref(&self) -> PackageRef {
        self.pkg.package_ref()
    }

    // ---- files and declarations -------------------------------------------

    pub fn file(&mut self, path: &str) -> FileId {
        let id = FileId(self.file_base + self.pkg.files.len() as u32);
        self.pkg.files.push(SourceFile {
            id,
            path: PathBuf::from(path),
            imports: Vec::new(),
            decls: Vec::new(),
        });
        id
    }

    pub fn import(&mut self, file: FileId, import: Import) -> &mut Self {
        self.source_file(file).imports.push(import);
        self
    }

    /// Declare a package-level object and a type declaration carrying `doc`
    pub fn declare(
        &mut self,
        file: FileId,
        name: &str,
        kind: ObjectKind,
        ty: TypeId,
        doc: &[&str],
        line: u32,
    ) -> ObjectId {
        let id = self.object(name, kind, ty, Position { file, line, column: 6 });
        self.source_file(file).decls.push(Decl {
            doc: doc.iter().map(|line| line.to_string()).collect(),
            specs: vec![TypeSpec {
                name: name.to_string(),
                object: Some(id),
            }],
        });
        id
    }

    /// Declare a named type `name` with the given underlying type
    pub fn declare_type(
        &mut self,
        file: FileId,
        name: &str,
        underlying: TypeId,
        doc: &[&str],
        line: u32,
    ) -> (ObjectId, TypeId) {
        let pkg = self.package_ref();
        let ty = self.named(Some(pkg), name, underlying);
        let obj = self.declare(file, name, ObjectKind::TypeName, ty, doc, line);
        (obj, ty)
    }

    /// Fill a reserved id with a named type of this package and declare it.
    /// Used for interfaces whose methods refer back to the interface itself.
    pub fn declare_reserved(
        &mut self,
        file: FileId,
        reserved: TypeId,
        name: &str,
        underlying: TypeId,
        doc: &[&str],
        line: u32,
    ) -> ObjectId {
        let pkg = self.package_ref();
        self.fill(
            reserved,
            TypeKind::Named {
                name: name.to_string(),
                package: Some(pkg),
                type_params: vec![],
                type_args: vec![],
                underlying,
            },
        );
        self.declare(file, name, ObjectKind::TypeName, reserved, doc, line)
    }

    /// Register an object in scope without a declaration
    pub fn object(&mut self, name: &str, kind: ObjectKind, ty: TypeId, position: Position) -> ObjectId {
        let id = ObjectId(self.pkg.objects.len() as u32);
        self.pkg.objects.push(Object {
            name: name.to_string(),
            kind,
            ty,
            position,
        });
        self.pkg.scope.insert(name.to_string(), id);
        id
    }

    pub fn raw_decl(&mut self, file: FileId, decl: Decl) -> &mut Self {
        self.source_file(file).decls.push(decl);
        self
    }

    pub fn diagnostic(&mut self, location: &str, message: &str) -> &mut Self {
        self.pkg.diagnostics.push(Diagnostic {
            location: Some(location.to_string()),
            message: message.to_string(),
        });
        self
    }

    fn source_file(&mut self, file: FileId) -> &mut SourceFile {
        self.pkg
            .files
            .iter_mut()
            .find(|f| f.id == file)
            .expect("file was not created by this builder")
    }

    // ---- types -------------------------------------------------------------

    pub fn add(&mut self, kind: TypeKind) -> TypeId {
        self.pkg.types.add(kind)
    }

    /// Placeholder to be filled with [`PackageBuilder::fill`], for cycles
    pub fn reserve(&mut self) -> TypeId {
        self.add(TypeKind::Unknown)
    }

    pub fn fill(&mut self, id: TypeId, kind: TypeKind) {
        self.pkg.types.replace(id, kind);
    }

    pub fn basic(&mut self, basic: BasicKind) -> TypeId {
        self.add(TypeKind::Basic { basic })
    }

    pub fn invalid(&mut self) -> TypeId {
        self.basic(BasicKind::Invalid)
    }

    pub fn slice(&mut self, elem: TypeId) -> TypeId {
        self.add(TypeKind::Slice { elem })
    }

    pub fn pointer(&mut self, elem: TypeId) -> TypeId {
        self.add(TypeKind::Pointer { elem })
    }

    pub fn map(&mut self, key: TypeId, elem: TypeId) -> TypeId {
        self.add(TypeKind::Map { key, elem })
    }

    pub fn empty_struct(&mut self) -> TypeId {
        self.add(TypeKind::Struct { fields: vec![] })
    }

    pub fn struct_of(&mut self, fields: Vec<(&str, TypeId)>) -> TypeId {
        let fields = fields
            .into_iter()
            .map(|(name, ty)| Field {
                name: name.to_string(),
                ty,
                embedded: false,
                tag: None,
            })
            .collect();
        self.add(TypeKind::Struct { fields })
    }

    pub fn union(&mut self, terms: Vec<TypeId>) -> TypeId {
        let terms = terms
            .into_iter()
            .map(|ty| Term { tilde: false, ty })
            .collect();
        self.add(TypeKind::Union { terms })
    }

    pub fn named(&mut self, package: Option<PackageRef>, name: &str, underlying: TypeId) -> TypeId {
        self.add(TypeKind::Named {
            name: name.to_string(),
            package,
            type_params: vec![],
            type_args: vec![],
            underlying,
        })
    }

    /// A named type declared in another package
    pub fn foreign(&mut self, path: &str, name: &str, underlying: TypeId) -> TypeId {
        let pkg_name = path.rsplit('/').next().unwrap_or(path).to_string();
        self.named(Some(PackageRef::new(path, pkg_name)), name, underlying)
    }

    pub fn type_param(&mut self, name: &str, constraint: TypeId) -> TypeId {
        self.add(TypeKind::TypeParam {
            name: name.to_string(),
            constraint,
        })
    }

    /// The predeclared `error` interface
    pub fn error(&mut self) -> TypeId {
        let string = self.basic(BasicKind::String);
        let sig = self.signature(vec![], vec![Var::unnamed(string)], false);
        let iface = self.add(TypeKind::Interface {
            methods: vec![MethodSpec {
                name: "Error".to_string(),
                signature: sig,
                position: Position::default(),
            }],
            embeddeds: vec![],
            implicit: false,
        });
        self.named(None, "error", iface)
    }

    /// The predeclared `any` alias
    pub fn any(&mut self) -> TypeId {
        let empty = self.interface(vec![], vec![]);
        self.add(TypeKind::Alias {
            name: "any".to_string(),
            package: None,
            target: empty,
        })
    }

    pub fn signature(&mut self, params: Vec<Var>, results: Vec<Var>, variadic: bool) -> TypeId {
        self.add(TypeKind::Signature {
            params,
            results,
            variadic,
        })
    }

    pub fn interface(&mut self, methods: Vec<MethodSpec>, embeddeds: Vec<TypeId>) -> TypeId {
        self.add(TypeKind::Interface {
            methods,
            embeddeds,
            implicit: false,
        })
    }

    pub fn method(&mut self, file: FileId, line: u32, name: &str, signature: TypeId) -> MethodSpec {
        MethodSpec {
            name: name.to_string(),
            signature,
            position: Position {
                file,
                line,
                column: 2,
            },
        }
    }

    /// Turn a previously built named type into a generic one
    pub fn set_type_params(&mut self, named: TypeId, params: Vec<(&str, TypeId)>) {
        if let Some(TypeKind::Named {
            name,
            package,
            type_args,
            underlying,
            ..
        }) = self.pkg.types.get(named).cloned()
        {
            let type_params = params
                .into_iter()
                .map(|(name, constraint)| TypeParamSpec {
                    name: name.to_string(),
                    constraint,
                })
                .collect();
            self.fill(
                named,
                TypeKind::Named {
                    name,
                    package,
                    type_params,
                    type_args,
                    underlying,
                },
            );
        }
    }

    pub fn build(self) -> Package {
        self.pkg
    }
}
