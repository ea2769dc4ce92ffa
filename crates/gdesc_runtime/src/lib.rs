//! Terminal console, world loading, and CLI for gdesc.
//!
//! This crate provides:
//! - [`RustylineConsole`] - A [`Console`](gdesc_engine::Console) on the terminal
//! - [`serialize`] - World models to and from `MessagePack`
//! - [`init_tracing`] - Log output for the binary

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod editor;
pub mod logging;
pub mod serialize;

pub use editor::RustylineConsole;
pub use logging::init_tracing;
pub use serialize::{from_bytes, load_from_file, save_to_file, to_bytes};
