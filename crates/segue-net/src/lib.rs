#![forbid(unsafe_code)]

//! Resource loaders for the segue HLS walker.
//!
//! The walk engine never performs I/O itself; it is handed a [`Loader`] that
//! resolves a URL to a byte payload plus mime type. This crate provides the
//! trait and the two stock implementations:
//!
//! - [`HttpLoader`]: reqwest-backed, with timeout and retry knobs
//!   ([`NetOptions`]).
//! - [`FileLoader`]: `file:` URLs read via `tokio::fs`, mime type guessed
//!   from the extension.

pub mod error;
pub mod file;
pub mod http;
pub mod loader;
pub mod types;

pub use error::{NetError, NetResult};
pub use file::{mime_type_for_path, FileLoader};
pub use http::HttpLoader;
pub use loader::Loader;
pub use types::{LoadOptions, Loaded, NetOptions, RetryPolicy};
