//! Turning annotated interface declarations into mock IR
//!
//! The pipeline runs one way:
//!
//! 1. [`directive::scan`] groups annotated declarations by output path
//! 2. [`imports::aggregate`] merges each group's imports without name clashes
//! 3. [`interface::extract_interface`] renders every interface through an
//!    [`qualifier::ImportQualifier`] over the merged imports
//! 4. [`file::assemble_group`] collects the result into one [`File`]
//!
//! [`generate_all`] runs all of it for a set of loaded packages.
//!
//! [`File`]: ifacemock_core::ir::File

pub mod directive;
pub mod error;
pub mod explode;
pub mod file;
pub mod imports;
pub mod interface;
pub mod options;
pub mod qualifier;
pub mod validate;

pub use directive::{scan, Group};
pub use error::{ExtractError, OptionsError};
pub use file::{assemble_group, generate_all, generate_each, generate_interface};
pub use options::Options;
