//! Library interface for the ifacemock CLI

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use ifacemock_core::ir::File;
use ifacemock_core::Package;
use ifacemock_extract::{generate_all, generate_interface, Options};
use serde::Serialize;
use tracing::{debug, info};

/// Extension appended to an output path when the IR is written to disk
pub const IR_EXTENSION: &str = "json";

/// Load type-checked packages dumped by the loader. YAML is chosen by file
/// extension, anything else is read as JSON.
pub fn load_packages(path: &Path) -> Result<Vec<Package>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Error loading package information from {}", path.display()))?;

    let packages: Vec<Package> = match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {} as YAML", path.display()))?,
        _ => serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {} as JSON", path.display()))?,
    };

    if packages.is_empty() {
        bail!("No packages found in {}", path.display());
    }
    debug!("Loaded {} package(s) from {:?}", packages.len(), path);
    Ok(packages)
}

/// Options from `config` when given, with an explicit default output file
/// taking precedence
pub fn load_options(config: Option<&Path>, default_output_file: Option<&str>) -> Result<Options> {
    let mut options = match config {
        Some(path) => Options::from_file(path)
            .with_context(|| format!("Failed to load options from {}", path.display()))?,
        None => Options::default(),
    };
    if let Some(file) = default_output_file {
        options.default_output_file = Some(file.to_string());
    }
    Ok(options)
}

/// What to generate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Every declaration annotated with a directive
    Annotated,
    /// One named interface, keyed by the given output path
    Interface { name: String, output: PathBuf },
}

pub fn generate(
    packages: &[Package],
    options: &Options,
    target: &Target,
) -> Result<BTreeMap<PathBuf, File>> {
    match target {
        Target::Annotated => {
            generate_all(packages, options).context("Error getting interface information")
        }
        Target::Interface { name, output } => {
            let [package] = packages else {
                bail!("Found more than one package; an interface argument needs exactly one");
            };
            let file = generate_interface(package, name, options)
                .context("Error getting interface information")?;
            Ok(BTreeMap::from([(output.clone(), file)]))
        }
    }
}

pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize IR")
}

/// Write each file's IR next to its output path as `<path>.json`, returning
/// the written paths
pub fn write_files(files: &BTreeMap<PathBuf, File>) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(files.len());
    for (path, file) in files {
        let mut target = path.clone().into_os_string();
        target.push(".");
        target.push(IR_EXTENSION);
        let target = PathBuf::from(target);

        if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Error creating directory {}", parent.display()))?;
        }
        fs::write(&target, to_json(file)?)
            .with_context(|| format!("Error creating output file {}", target.display()))?;
        info!("Wrote {:?}", target);
        written.push(target);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ifacemock_test_fixtures::{FixtureType, TestFixtures};

    #[test]
    fn test_load_packages_by_extension() {
        let mut fixtures = TestFixtures::new();
        let json = fixtures.setup(FixtureType::Generic);
        let yaml = fixtures.setup_yaml(FixtureType::Generic);

        assert_eq!(load_packages(&json).unwrap(), load_packages(&yaml).unwrap());
    }

    #[test]
    fn test_load_packages_errors() {
        let mut fixtures = TestFixtures::new();
        let empty = fixtures.write("empty.json", "[]");
        let garbage = fixtures.write("garbage.json", "{not json");

        let err = load_packages(&empty).unwrap_err();
        assert!(err.to_string().starts_with("No packages found"));
        assert!(load_packages(&garbage).is_err());
        assert!(load_packages(Path::new("/nonexistent/packages.json")).is_err());
    }

    #[test]
    fn test_flag_overrides_configured_default_output() {
        let mut fixtures = TestFixtures::new();
        let config = fixtures.write("ifacemock.toml", "default_output_file = \"from_config.go\"\n");

        let options = load_options(Some(&config), None).unwrap();
        assert_eq!(options.default_output_file.as_deref(), Some("from_config.go"));

        let options = load_options(Some(&config), Some("from_flag.go")).unwrap();
        assert_eq!(options.default_output_file.as_deref(), Some("from_flag.go"));
    }

    #[test]
    fn test_interface_target_needs_one_package() {
        let packages = vec![
            ifacemock_test_fixtures::scenarios::diamond_package(),
            ifacemock_test_fixtures::scenarios::generic_package(),
        ];
        let target = Target::Interface {
            name: "Diamond".to_string(),
            output: PathBuf::new(),
        };
        assert!(generate(&packages, &Options::default(), &target).is_err());
        assert_eq!(
            generate(&packages[..1], &Options::default(), &target)
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn test_write_files_appends_extension() {
        let dir = tempfile::tempdir().unwrap();
        let packages = vec![ifacemock_test_fixtures::scenarios::diamond_package()];
        let files = generate(&packages, &Options::default(), &Target::Annotated).unwrap();
        let files: BTreeMap<PathBuf, File> = files
            .into_iter()
            .map(|(path, file)| (dir.path().join(path), file))
            .collect();

        let written = write_files(&files).unwrap();
        assert_eq!(written, vec![dir.path().join("shapes/shapes_mock.go.json")]);
        let back: File = serde_json::from_str(&fs::read_to_string(&written[0]).unwrap()).unwrap();
        assert_eq!(back.interfaces[0].name, "Diamond");
    }
}
