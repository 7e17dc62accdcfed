//! Flattening interface embedding

use std::collections::{HashSet, VecDeque};

use ifacemock_core::typestring::structural_string;
use ifacemock_core::{TypeGraph, TypeId, TypeKind};
use tracing::trace;

/// The interface `iface` followed by every interface it embeds, transitively,
/// in breadth-first order.
///
/// Interfaces are deduplicated by their structural string, so two embeds
/// spelling the same method set are visited once. Embedded named types are
/// resolved to their underlying interface; type-set terms are skipped.
pub fn explode(graph: &TypeGraph, iface: TypeId) -> Vec<TypeId> {
    let mut result = Vec::new();
    let mut queue = VecDeque::from([iface]);
    let mut visited = HashSet::new();

    while let Some(current) = queue.pop_front() {
        let key = structural_string(graph, current);
        if !visited.insert(key) {
            continue;
        }
        result.push(current);

        let Some(TypeKind::Interface { embeddeds, .. }) = graph.get(current) else {
            continue;
        };
        for &embedded in embeddeds {
            let Some(resolved) = graph.underlying(embedded) else {
                continue;
            };
            if graph.get(resolved).is_some_and(TypeKind::is_interface) {
                queue.push_back(resolved);
            }
        }
    }

    trace!(count = result.len(), "exploded interface");
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use ifacemock_core::types::{BasicKind, Var};
    use ifacemock_test_fixtures::{scenarios, PackageBuilder};

    fn method_names(graph: &TypeGraph, ifaces: &[TypeId]) -> Vec<String> {
        ifaces
            .iter()
            .flat_map(|id| match graph.get(*id) {
                Some(TypeKind::Interface { methods, .. }) => {
                    methods.iter().map(|m| m.name.clone()).collect()
                }
                _ => Vec::new(),
            })
            .collect()
    }

    fn diamond() -> (ifacemock_core::Package, TypeId) {
        let pkg = scenarios::diamond_package();
        let named = pkg.object(pkg.lookup("Diamond").unwrap()).unwrap().ty;
        let iface = pkg.types.underlying(named).unwrap();
        (pkg, iface)
    }

    #[test]
    fn test_diamond_visits_base_once() {
        let (pkg, iface) = diamond();
        let exploded = explode(&pkg.types, iface);

        assert_eq!(exploded.len(), 4);
        assert_eq!(exploded[0], iface);
        assert_eq!(
            method_names(&pkg.types, &exploded),
            vec!["Flush", "Read", "Write", "Close"]
        );
    }

    #[test]
    fn test_explode_is_idempotent() {
        let (pkg, iface) = diamond();
        let first = explode(&pkg.types, iface);
        let again = explode(&pkg.types, first[0]);
        assert_eq!(first, again);
    }

    #[test]
    fn test_structurally_equal_embeds_collapse() {
        let mut b = PackageBuilder::new("example.com/p", "p");
        let file = b.file("p/p.go");
        let string = b.basic(BasicKind::String);
        let sig_a = b.signature(vec![], vec![Var::unnamed(string)], false);
        let sig_b = b.signature(vec![], vec![Var::unnamed(string)], false);
        let m_a = b.method(file, 3, "String", sig_a);
        let m_b = b.method(file, 7, "String", sig_b);
        let a = b.interface(vec![m_a], vec![]);
        let b_iface = b.interface(vec![m_b], vec![]);
        let outer = b.interface(vec![], vec![a, b_iface]);
        let pkg = b.build();

        let exploded = explode(&pkg.types, outer);
        assert_eq!(exploded, vec![outer, a]);
    }

    #[test]
    fn test_non_interface_embeds_are_skipped() {
        let mut b = PackageBuilder::new("example.com/p", "p");
        let int = b.basic(BasicKind::Int);
        let byte = b.basic(BasicKind::Byte);
        let union = b.union(vec![int, byte]);
        let constraint = b.interface(vec![], vec![union, int]);
        let pkg = b.build();

        assert_eq!(explode(&pkg.types, constraint), vec![constraint]);
    }
}
