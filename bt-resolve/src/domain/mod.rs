//! Domain model for bt-resolve
//!
//! Core types and errors shared by the parser and the resolver backends.

pub mod errors;
pub mod types;

pub use types::{Address, AddressList};

pub use errors::ResolveError;
