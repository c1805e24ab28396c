//! Shared types for mountguard.
//!
//! Holds the error type and the well-known names (authority methods,
//! attachment service types, built-in ignore prefixes) used by both the
//! validation library and the CLI.

pub mod constants;
pub mod errors;

pub use errors::{MountError, MountResult};
