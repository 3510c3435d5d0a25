//! Binary `.dat` format support
//!
//! This module covers the wire format end to end:
//! - [`read_header`]: cheap 24-byte metadata parse
//! - [`decode`]: full parse into a [`LinearSystem`](crate::storage::LinearSystem)
//! - [`write_uncompressed`] / [`write_compressed`]: fixture writer

mod decode;
mod encode;
mod header;

pub use decode::{decode, DecodeError};
pub use encode::{write_compressed, write_uncompressed};
pub use header::{read_header, FileHeader, FormatVersion, HEADER_LEN, MAGIC_ID};
