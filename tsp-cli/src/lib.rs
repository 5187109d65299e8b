//! A TSP command line library public API.
//!
//! Contains extensions used by command line interface: solver configuration from file, problem
//! import and result serialization.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
#[macro_use]
pub(crate) mod helpers;

pub mod extensions;
