//! Error types for extraction and file assembly

use std::fmt;
use std::path::PathBuf;

use ifacemock_core::source::Diagnostic;
use ifacemock_core::CoreError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("{name} is not a named/defined type")]
    NotAType { name: String },

    #[error("{name} is not an interface type")]
    NotAnInterface { name: String },

    #[error("{name} refers to invalid types:\n{}", DiagnosticList(.diagnostics))]
    InvalidType {
        name: String,
        diagnostics: Vec<Diagnostic>,
    },

    #[error("{method} is not a method signature")]
    NotASignature { method: String },

    #[error("resolving import conflict: {0}")]
    NameResolution(#[from] CoreError),

    #[error("{0}")]
    LookupFailure(String),

    #[error("declarations from more than one package are directed to {}", .path.display())]
    MixedPackages { path: PathBuf },
}

/// Errors loading [`crate::Options`]
#[derive(Error, Debug)]
pub enum OptionsError {
    #[error("Failed to read options: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse options: {0}")]
    Toml(#[from] toml::de::Error),
}

/// One diagnostic per line, as the type checker reported them
struct DiagnosticList<'a>(&'a [Diagnostic]);

impl fmt::Display for DiagnosticList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "  (no diagnostics reported)");
        }
        for (i, diagnostic) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {}", diagnostic)?;
        }
        Ok(())
    }
}
