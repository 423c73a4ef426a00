//! labkit-docs: course maintenance for the Neo4j lab material.
//!
//! Each rewrite is a pure function over file content plus a driver that
//! writes files back only when they changed.

pub mod config;
pub mod error;
pub mod files;
pub mod prune;
pub mod references;
pub mod renumber;
pub mod slides;
pub mod titles;
