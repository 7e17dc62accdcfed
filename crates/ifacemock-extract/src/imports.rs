//! Merging the imports of every source file feeding one output file
//!
//! The merged list must give each package a distinct local name. Renames are
//! chosen deterministically so regenerating from unchanged sources yields the
//! same aliases.

use std::collections::HashSet;

use ifacemock_core::ir::Import;
use ifacemock_core::naming::increment_name;
use ifacemock_core::CoreError;
use tracing::debug;

use crate::options::Options;

/// Merge `imports` with the configured support imports into one sorted,
/// conflict-free list.
///
/// Support imports sort first so they keep their default names; the rest
/// sort by path, then alias. Exact duplicates collapse. Each later entry
/// whose local name is taken is given an alias from [`increment_name`].
/// Blank and dot imports introduce no name and are left untouched.
pub fn aggregate(
    imports: impl IntoIterator<Item = Import>,
    options: &Options,
) -> Result<Vec<Import>, CoreError> {
    let mut merged: Vec<Import> = imports
        .into_iter()
        .chain(options.support_imports.iter().map(Import::new))
        .collect();

    merged.sort_by(|a, b| {
        let a_support = options.is_support_import(&a.path);
        let b_support = options.is_support_import(&b.path);
        b_support
            .cmp(&a_support)
            .then_with(|| a.path.cmp(&b.path))
            .then_with(|| a.name.cmp(&b.name))
    });
    merged.dedup();

    let mut taken = HashSet::new();
    for import in &mut merged {
        if import.is_blank() || import.is_dot() {
            continue;
        }
        let mut local = import.local_name().to_string();
        while taken.contains(&local) {
            local = increment_name(&local)?;
        }
        if local != import.local_name() {
            debug!(path = %import.path, alias = %local, "renamed conflicting import");
            import.name = Some(local.clone());
        }
        taken.insert(local);
    }

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ONE: &str = "github.com/acme/x/internal/one";

    #[test]
    fn test_colliding_names_are_renamed_in_sorted_order() {
        let imports = vec![
            Import::new("sort"),
            Import::new(format!("{}/sort", ONE)),
            Import::new(format!("{}/testing", ONE)),
            Import::new("testing"),
        ];
        let merged = aggregate(imports, &Options::default()).unwrap();

        assert_eq!(
            merged,
            vec![
                Import::new("sync/atomic"),
                Import::new("testing"),
                Import::new(format!("{}/sort", ONE)),
                Import::named(format!("{}/testing", ONE), "testing2"),
                Import::named("sort", "sort2"),
            ]
        );
    }

    #[test]
    fn test_support_imports_are_never_renamed() {
        let imports = vec![
            Import::new("a/testing"),
            Import::new("b/atomic"),
            Import::named("c/helpers", "testing"),
        ];
        let merged = aggregate(imports, &Options::default()).unwrap();

        assert_eq!(merged[0], Import::new("sync/atomic"));
        assert_eq!(merged[1], Import::new("testing"));
        assert_eq!(merged[2], Import::named("a/testing", "testing2"));
        assert_eq!(merged[3], Import::named("b/atomic", "atomic2"));
        assert_eq!(merged[4], Import::named("c/helpers", "testing3"));
    }

    #[test]
    fn test_exact_duplicates_collapse_but_aliases_do_not() {
        let imports = vec![
            Import::new("fmt"),
            Import::new("fmt"),
            Import::named("fmt", "f"),
        ];
        let merged = aggregate(imports, &Options::default()).unwrap();

        assert_eq!(
            &merged[2..],
            &[Import::new("fmt"), Import::named("fmt", "f")]
        );
    }

    #[test]
    fn test_blank_and_dot_imports_claim_no_name() {
        let imports = vec![
            Import::named("embed", "_"),
            Import::named("net/http/pprof", "_"),
            Import::named("os", "."),
            Import::named("strings", "."),
        ];
        let merged = aggregate(imports, &Options::default()).unwrap();

        assert!(merged[2..].iter().all(|i| i.is_blank() || i.is_dot()));
        assert_eq!(merged.len(), 6);
    }

    #[test]
    fn test_renames_skip_names_already_taken() {
        let imports = vec![
            Import::new("a/sort"),
            Import::new("b/sort"),
            Import::named("c/other", "sort2"),
        ];
        let merged = aggregate(imports, &Options::default()).unwrap();

        assert_eq!(merged[2], Import::new("a/sort"));
        assert_eq!(merged[3], Import::named("b/sort", "sort2"));
        assert_eq!(merged[4], Import::named("c/other", "sort3"));
    }

    #[test]
    fn test_aggregation_is_deterministic() {
        let forward = vec![
            Import::new("x/sort"),
            Import::new("y/sort"),
            Import::new("sort"),
        ];
        let mut backward = forward.clone();
        backward.reverse();

        let options = Options::default();
        assert_eq!(
            aggregate(forward, &options).unwrap(),
            aggregate(backward, &options).unwrap()
        );
    }

    #[test]
    fn test_overflowing_rename_fails() {
        let numeral = "9".repeat(30);
        let imports = vec![
            Import::new(format!("a/pkg{}", numeral)),
            Import::new(format!("b/pkg{}", numeral)),
        ];
        let err = aggregate(imports, &Options::default()).unwrap_err();
        assert_eq!(err, CoreError::OutOfRange { numeral });
    }

    #[test]
    fn test_custom_support_imports() {
        let options = Options {
            support_imports: vec!["github.com/acme/mockkit".to_string()],
            ..Options::default()
        };
        let merged = aggregate(vec![Import::new("a/mockkit")], &options).unwrap();

        assert_eq!(
            merged,
            vec![
                Import::new("github.com/acme/mockkit"),
                Import::named("a/mockkit", "mockkit2"),
            ]
        );
    }
}
