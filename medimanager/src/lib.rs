//! MediManager doctor directory client.
//!
//! The crate follows a hexagonal layout: [`domain`] holds validation, form
//! state and the record store proxy; [`outbound`] implements the domain
//! ports over REST, in memory or in a local JSON file; [`inbound`] exposes the command line;
//! [`config`] loads client settings.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
