//! Import-aware qualification of cross-package type names
//!
//! Every cross-package name printed while rendering a signature goes through
//! [`ImportQualifier`], which both picks the prefix and records the import in
//! [`UsedImports`]. After extraction the accumulator holds exactly the
//! imports the rendered text depends on.

use ifacemock_core::ir::Import;
use ifacemock_core::types::PackageRef;
use ifacemock_core::Qualifier;
use tracing::trace;

/// Imports referenced by rendered type strings, deduplicated by path, in
/// first-use order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsedImports(Vec<Import>);

impl UsedImports {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `import` unless an import with the same path already is
    pub fn record(&mut self, import: &Import) {
        if !self.contains_path(&import.path) {
            self.0.push(import.clone());
        }
    }

    pub fn contains_path(&self, path: &str) -> bool {
        self.0.iter().any(|used| used.path == path)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<Import> {
        self.0
    }
}

/// [`Qualifier`] resolving package prefixes against one import list
pub struct ImportQualifier<'a> {
    own_package: &'a str,
    imports: &'a [Import],
    used: &'a mut UsedImports,
}

impl<'a> ImportQualifier<'a> {
    /// `own_package` is the path of the package declaring the interfaces;
    /// its names are never prefixed.
    pub fn new(own_package: &'a str, imports: &'a [Import], used: &'a mut UsedImports) -> Self {
        Self {
            own_package,
            imports,
            used,
        }
    }
}

impl Qualifier for ImportQualifier<'_> {
    fn qualify(&mut self, package: &PackageRef) -> String {
        if package.path == self.own_package {
            return String::new();
        }

        let found = self
            .imports
            .iter()
            .find(|import| import.path == package.path && !import.is_blank());

        let prefix = match found {
            Some(import) => {
                self.used.record(import);
                if import.is_dot() {
                    String::new()
                } else {
                    import
                        .name
                        .clone()
                        .unwrap_or_else(|| package.name.clone())
                }
            }
            None => {
                // Reached without a direct import, e.g. through an interface
                // embedded from another file. The alias is not checked against
                // names already claimed by the aggregated list.
                trace!(path = %package.path, "synthesizing import");
                self.used.record(&Import::new(package.path.clone()));
                package.name.clone()
            }
        };

        trace!(path = %package.path, prefix = %prefix, "qualified");
        prefix
    }
}
