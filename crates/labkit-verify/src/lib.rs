//! labkit-verify: lab verification for the Neo4j insurance course.
//!
//! Asserts the database state students should reach after each of the 17
//! labs, and replays every Cypher block of the lab markdown as a sweep.

pub mod catalog;
pub mod check;
pub mod config;
pub mod error;
pub mod markdown;
pub mod report;
pub mod runner;
pub mod sweep;
