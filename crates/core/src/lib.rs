//! Core domain types, errors, and constants for the `vaultic` workspace.
//!
//! This crate establishes the foundational error handling and shared
//! constants used throughout the codebase.
//!
//! ## Key Components
//!
//! - **`errors`**: Defines the primary `Error` enum and `Result` type alias,
//!   centralizing all possible failure modes for predictable error handling.
//! - **`constants`**: Shared static constants such as environment variable
//!   names, the default Vault endpoint, and the secret reference syntax.

pub mod constants;
pub mod errors;

pub use self::{
    constants::*,
    errors::{Error, Result},
};
