//! High-level operations.
//!
//! This module contains the implementation of gojava commands.

pub mod bind_to_jar;

pub use bind_to_jar::{bind_to_jar, bind_to_jar_with, BindOptions, BindResult};
