//! Building [`Interface`] IR from a declared interface type

use ifacemock_core::ir::{
    Interface, Method, MethodResult, Param, Params, Results, TypeParam, TypeParams,
};
use ifacemock_core::source::{Object, ObjectKind};
use ifacemock_core::typestring::{structural_string, type_string};
use ifacemock_core::types::MethodSpec;
use ifacemock_core::{Package, Qualifier, TypeGraph, TypeKind};
use tracing::debug;

use crate::error::ExtractError;
use crate::explode::explode;
use crate::validate::validate;

/// Extract the interface declared by `object`, rendering every type through
/// `qualifier`.
///
/// Methods of embedded interfaces are included once each and the result is
/// ordered by declaration position.
pub fn extract_interface(
    package: &Package,
    object: &Object,
    qualifier: &mut dyn Qualifier,
) -> Result<Interface, ExtractError> {
    let graph = &package.types;
    let name = object.name.clone();

    if object.kind != ObjectKind::TypeName {
        return Err(ExtractError::NotAType { name });
    }
    let Some(iface) = graph
        .underlying(object.ty)
        .filter(|id| graph.get(*id).is_some_and(TypeKind::is_interface))
    else {
        return Err(ExtractError::NotAnInterface { name });
    };

    if !validate(graph, object.ty) {
        return Err(ExtractError::InvalidType {
            name,
            diagnostics: package.diagnostics.clone(),
        });
    }

    let mut type_params = Vec::new();
    if let Some(TypeKind::Named {
        type_params: specs, ..
    }) = graph.get(object.ty)
    {
        for spec in specs {
            type_params.push(TypeParam {
                name: spec.name.clone(),
                constraint: type_string(graph, spec.constraint, qualifier),
            });
        }
    }

    let mut methods: Vec<Method> = Vec::new();
    for member in explode(graph, iface) {
        let Some(TypeKind::Interface {
            methods: explicit, ..
        }) = graph.get(member)
        else {
            continue;
        };
        let origin = structural_string(graph, member);
        for spec in explicit {
            let method = render_method(graph, spec, &origin, qualifier)?;
            if !methods.iter().any(|m| m.same_signature(&method)) {
                methods.push(method);
            }
        }
    }
    methods.sort_by_key(|m| m.position);

    debug!(interface = %name, methods = methods.len(), "extracted interface");
    Ok(Interface {
        name,
        type_params: TypeParams(type_params),
        methods,
    })
}

fn render_method(
    graph: &TypeGraph,
    spec: &MethodSpec,
    origin: &str,
    qualifier: &mut dyn Qualifier,
) -> Result<Method, ExtractError> {
    let Some(TypeKind::Signature {
        params,
        results,
        variadic,
    }) = graph.get(spec.signature)
    else {
        return Err(ExtractError::NotASignature {
            method: spec.name.clone(),
        });
    };

    let mut rendered: Vec<Param> = params
        .iter()
        .map(|var| Param::new(var.name.clone(), type_string(graph, var.ty, qualifier)))
        .collect();
    if *variadic {
        if let Some(last) = rendered.last_mut() {
            last.variadic = true;
        }
    }

    let results = results
        .iter()
        .map(|var| MethodResult::new(var.name.clone(), type_string(graph, var.ty, qualifier)))
        .collect();

    Ok(Method {
        name: spec.name.clone(),
        params: Params(rendered),
        results: Results(results),
        origin: origin.to_string(),
        position: spec.position,
    })
}
