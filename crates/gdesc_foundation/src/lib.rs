//! Core error and source-location types for gdesc.
//!
//! This crate provides:
//! - [`Error`] - Rich error types with context
//! - [`SourceLocation`] - Where a declaration or AST node came from

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod location;

pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use location::SourceLocation;
