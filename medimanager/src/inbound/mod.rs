//! Inbound adapters that translate operator input into domain service calls
//! while keeping terminal details at the edge.
//!
//! The command line lives under [`cli`].

pub mod cli;
