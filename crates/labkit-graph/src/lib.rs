//! labkit-graph: Neo4j client for verifying the course dataset.
//!
//! Every check against the database goes through this crate: counting,
//! existence lookups, schema listings, and classifying errors that labs are
//! expected to hit.

pub mod benign;
pub mod client;
pub mod param;
pub mod record;
pub mod validator;

pub use benign::{classify, Benign, Plugin};
pub use client::{GraphClient, GraphConfig, GraphError};
pub use param::Param;
pub use record::Record;
pub use validator::{quote_identifier, NodeRecord};
