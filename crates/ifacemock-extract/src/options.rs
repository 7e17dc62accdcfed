//! Generation options, loadable from `ifacemock.toml`

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::OptionsError;

/// Knobs shared by the scanner and the import aggregator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    /// Comment prefix that opts a declaration into generation
    #[serde(default = "default_marker")]
    pub marker: String,
    /// Output file name for directives without an argument, relative to the
    /// declaring file's directory
    #[serde(default)]
    pub default_output_file: Option<String>,
    /// Appended to the source file stem when neither of the above applies
    #[serde(default = "default_mock_suffix")]
    pub mock_suffix: String,
    /// Imports every generated file needs; never renamed during conflict
    /// resolution
    #[serde(default = "default_support_imports")]
    pub support_imports: Vec<String>,
}

fn default_marker() -> String {
    "//go:mock".to_string()
}

fn default_mock_suffix() -> String {
    "_mock".to_string()
}

// Kept in sync with the packages the mock template references
fn default_support_imports() -> Vec<String> {
    vec!["sync/atomic".to_string(), "testing".to_string()]
}

impl Default for Options {
    fn default() -> Self {
        Self {
            marker: default_marker(),
            default_output_file: None,
            mock_suffix: default_mock_suffix(),
            support_imports: default_support_imports(),
        }
    }
}

impl Options {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, OptionsError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, OptionsError> {
        Ok(toml::from_str(content)?)
    }

    pub fn with_default_output_file(mut self, file: impl Into<String>) -> Self {
        self.default_output_file = Some(file.into());
        self
    }

    pub fn is_support_import(&self, path: &str) -> bool {
        self.support_imports.iter().any(|p| p == path)
    }
}

impl FromStr for Options {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_document_gives_defaults() {
        let options = Options::parse("").unwrap();
        assert_eq!(options, Options::default());
        assert_eq!(options.marker, "//go:mock");
        assert!(options.is_support_import("testing"));
        assert!(!options.is_support_import("sort"));
    }

    #[test]
    fn test_options_parsing() {
        let options: Options = r#"
marker = "//mockgen:generate"
default_output_file = "mocks.go"
support_imports = ["sync/atomic", "testing", "github.com/acme/mockkit"]
        "#
        .parse()
        .unwrap();

        assert_eq!(options.marker, "//mockgen:generate");
        assert_eq!(options.default_output_file.as_deref(), Some("mocks.go"));
        assert_eq!(options.mock_suffix, "_mock");
        assert_eq!(options.support_imports.len(), 3);
    }

    #[test]
    fn test_options_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "mock_suffix = \"_fake\"").unwrap();

        let options = Options::from_file(file.path()).unwrap();
        assert_eq!(options.mock_suffix, "_fake");
    }

    #[test]
    fn test_options_errors() {
        assert!(matches!(
            Options::parse("marker = 3"),
            Err(OptionsError::Toml(_))
        ));
        assert!(matches!(
            Options::from_file("/nonexistent/ifacemock.toml"),
            Err(OptionsError::Io(_))
        ));
    }
}
