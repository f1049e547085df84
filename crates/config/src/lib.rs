//! Layered configuration loading for vaultic
//!
//! This crate provides a builder-style [`Loader`] that merges configuration
//! for a user-defined structure from defaults, a JSON file, environment
//! variables, and registered secret annotations, in that precedence order.
//! The merged result is a [`ConfigTree`] that exposes an ordered field
//! traversal with per-field handles before being deserialized into the
//! caller's typed structure.
//!
//! Secret annotations are ordinary loader input: registering one places a
//! `vault://` reference string at the annotated field's path, so a later
//! override pass can rewrite the field through the public traversal contract
//! without any privileged access to the tree.

mod loader;
mod tree;


pub use loader::Loader;
pub use tree::{ConfigTree, Field, FieldMut};
