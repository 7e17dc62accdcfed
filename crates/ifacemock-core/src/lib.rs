//! Core type graph, source model and IR for ifacemock

pub mod error;
pub mod ir;
pub mod naming;
pub mod source;
pub mod types;
pub mod typestring;

pub use error::CoreError;
pub use ir::{File, Import, Interface, Method};
pub use source::{ObjectId, Package};
pub use types::{TypeGraph, TypeId, TypeKind};
pub use typestring::Qualifier;
