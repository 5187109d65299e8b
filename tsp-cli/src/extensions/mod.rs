//! Contains command line interface extensions.

pub mod import;
pub mod solve;
