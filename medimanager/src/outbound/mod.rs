//! Outbound adapters implementing domain ports.
//!
//! - **http**: reqwest adapters for the clinic REST API
//! - **memory**: in-process adapters for tests and the offline store
//! - **json_file**: the `--offline` directory kept in a local JSON file
//!
//! Adapters translate between domain types and transport representations.
//! They contain no business logic.

pub mod http;
pub mod json_file;
pub mod memory;
