//! dbmslink Core - Core abstractions shared by the dbmslink crates
//!
//! This crate provides the fundamental types that the other dbmslink
//! crates depend on:
//!
//! - `DbmsType` - Supported backends and their URL construction rules
//! - `DbmsLinkError` - Error type shared across the workspace

mod dbms;
mod error;

pub use dbms::*;
pub use error::*;
