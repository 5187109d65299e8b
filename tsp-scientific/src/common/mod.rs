//! Contains common text reading and writing functionality.

mod text_reader;
pub use self::text_reader::*;
