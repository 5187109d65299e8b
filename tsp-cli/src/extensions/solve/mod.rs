//! Contains solve command helpers.

pub mod config;
pub mod formats;
