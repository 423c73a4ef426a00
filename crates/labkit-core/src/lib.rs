//! labkit-core: shared types for the Neo4j course tooling.
//!
//! Lab numbering, course days, lab renumbering maps, layered configuration
//! and the course directory conventions used by every labkit binary.

pub mod config;
pub mod error;
pub mod layout;
pub mod types;

pub use error::LabkitError;
pub use types::{Day, LabMapping, LabNumber};
