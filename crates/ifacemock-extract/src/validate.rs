//! Reachability check for unresolved types

use std::collections::HashSet;

use ifacemock_core::types::BasicKind;
use ifacemock_core::{TypeGraph, TypeId, TypeKind};

/// True when no type reachable from `ty` is the checker's invalid
/// placeholder.
///
/// Recursive graphs terminate: every id is expanded at most once. Kinds this
/// crate does not model are accepted.
pub fn validate(graph: &TypeGraph, ty: TypeId) -> bool {
    let mut visited = HashSet::new();
    let mut work = vec![ty];

    while let Some(id) = work.pop() {
        if !visited.insert(id) {
            continue;
        }
        let Some(kind) = graph.get(id) else {
            return false;
        };
        match kind {
            TypeKind::Basic { basic } => {
                if *basic == BasicKind::Invalid {
                    return false;
                }
            }
            TypeKind::Array { elem, .. }
            | TypeKind::Slice { elem }
            | TypeKind::Pointer { elem }
            | TypeKind::Chan { elem, .. } => work.push(*elem),
            TypeKind::Struct { fields } => work.extend(fields.iter().map(|f| f.ty)),
            TypeKind::Tuple { vars } => work.extend(vars.iter().map(|v| v.ty)),
            TypeKind::Signature {
                params, results, ..
            } => work.extend(params.iter().chain(results).map(|v| v.ty)),
            TypeKind::Interface {
                methods, embeddeds, ..
            } => {
                work.extend(embeddeds.iter().copied());
                work.extend(methods.iter().map(|m| m.signature));
            }
            TypeKind::Union { terms } => work.extend(terms.iter().map(|t| t.ty)),
            TypeKind::Map { key, elem } => work.extend([*key, *elem]),
            TypeKind::Named {
                type_params,
                type_args,
                underlying,
                ..
            } => {
                work.extend(type_params.iter().map(|p| p.constraint));
                work.extend(type_args.iter().copied());
                work.push(*underlying);
            }
            TypeKind::TypeParam { constraint, .. } => work.push(*constraint),
            TypeKind::Alias { target, .. } => work.push(*target),
            TypeKind::Unknown => {}
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use ifacemock_core::types::{ChanDir, Var};
    use ifacemock_test_fixtures::{scenarios, PackageBuilder};

    #[test]
    fn test_composites_of_valid_types_are_valid() {
        let mut b = PackageBuilder::new("example.com/p", "p");
        let int = b.basic(BasicKind::Int);
        let string = b.basic(BasicKind::String);
        let map = b.map(string, int);
        let chan = b.add(TypeKind::Chan {
            dir: ChanDir::Recv,
            elem: map,
        });
        let arr = b.add(TypeKind::Array { len: 4, elem: chan });
        let strct = b.struct_of(vec![("a", arr), ("b", string)]);
        let ptr = b.pointer(strct);
        let sig = b.signature(vec![Var::new("x", ptr)], vec![Var::unnamed(int)], false);
        let pkg = b.build();

        assert!(validate(&pkg.types, sig));
    }

    #[test]
    fn test_invalid_is_found_at_any_depth() {
        let mut b = PackageBuilder::new("example.com/p", "p");
        let invalid = b.invalid();
        let slice = b.slice(invalid);
        let map_key = b.basic(BasicKind::String);
        let map = b.map(map_key, slice);
        let union = b.union(vec![map]);
        let constraint = b.interface(vec![], vec![union]);
        let pkg = b.build();

        assert!(!validate(&pkg.types, invalid));
        assert!(!validate(&pkg.types, map));
        assert!(!validate(&pkg.types, constraint));
        assert!(validate(&pkg.types, map_key));
    }

    #[test]
    fn test_self_referential_interface_terminates() {
        let pkg = scenarios::my_interface_package();
        let ty = pkg.object(pkg.lookup("MyInterface").unwrap()).unwrap().ty;
        assert!(validate(&pkg.types, ty));
    }

    #[test]
    fn test_invalid_method_parameter_is_reported() {
        let pkg = scenarios::broken_package();
        let bad = pkg.object(pkg.lookup("Bad").unwrap()).unwrap().ty;
        let good = pkg.object(pkg.lookup("Good").unwrap()).unwrap().ty;
        assert!(!validate(&pkg.types, bad));
        assert!(validate(&pkg.types, good));
    }

    #[test]
    fn test_generic_constraints_and_arguments_are_checked() {
        let mut b = PackageBuilder::new("example.com/p", "p");
        let invalid = b.invalid();
        let constraint = b.interface(vec![], vec![invalid]);
        let body = b.interface(vec![], vec![]);
        let generic = b.foreign("example.com/q", "Box", body);
        b.set_type_params(generic, vec![("T", constraint)]);
        let body2 = b.interface(vec![], vec![]);
        let instantiated = b.add(TypeKind::Named {
            name: "List".to_string(),
            package: None,
            type_params: vec![],
            type_args: vec![invalid],
            underlying: body2,
        });
        let pkg = b.build();

        assert!(!validate(&pkg.types, generic));
        assert!(!validate(&pkg.types, instantiated));
    }

    #[test]
    fn test_unknown_kinds_are_permitted_and_dangling_ids_are_not() {
        let mut b = PackageBuilder::new("example.com/p", "p");
        let unknown = b.add(TypeKind::Unknown);
        let ptr = b.pointer(unknown);
        let dangling = b.pointer(TypeId(999));
        let pkg = b.build();

        assert!(validate(&pkg.types, ptr));
        assert!(!validate(&pkg.types, dangling));
    }
}
