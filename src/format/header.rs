//! File header parsing
//!
//! The 24-byte prefix identifies the format and carries the system shape.
//! Reading it alone is enough to decide on a storage strategy before
//! committing to a full decode.

use super::decode::{ByteReader, DecodeError};
use serde::Serialize;
use std::io::Read;

/// Magic identifier opening every valid file.
pub const MAGIC_ID: u32 = 0x0C0A_8708;

/// Size in bytes of the fixed header.
pub const HEADER_LEN: usize = 24;

/// Coefficient block layout version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FormatVersion {
    /// 0x102: full n×n matrix, row-major
    Uncompressed,
    /// 0x202: one band window per row
    Compressed,
}

impl FormatVersion {
    pub(crate) fn from_wire(raw: u32) -> Option<Self> {
        match raw {
            0x102 => Some(FormatVersion::Uncompressed),
            0x202 => Some(FormatVersion::Compressed),
            _ => None,
        }
    }

    /// On-disk encoding of this version.
    pub fn wire(self) -> u32 {
        match self {
            FormatVersion::Uncompressed => 0x102,
            FormatVersion::Compressed => 0x202,
        }
    }
}

/// Parsed file header.
#[derive(Debug, Clone, Serialize)]
pub struct FileHeader {
    /// Magic identifier, always [`MAGIC_ID`] once parsed
    pub file_id: u32,
    /// Coefficient block layout
    pub version: FormatVersion,
    /// Reserved field, carried but unused
    pub reserved: u32,
    /// System dimension n
    pub n: usize,
    /// Lower bandwidth p
    pub lower: usize,
    /// Upper bandwidth q
    pub upper: usize,
}

impl FileHeader {
    /// Total band width p + q + 1.
    ///
    /// `bandwidth() <= n` is expected for compressed files but deliberately
    /// not enforced; oversized bands decode with their overhang clipped.
    pub fn bandwidth(&self) -> usize {
        self.lower + self.upper + 1
    }

    /// Bytes occupied by the coefficient block that follows the header.
    pub fn coefficient_len(&self) -> usize {
        match self.version {
            FormatVersion::Uncompressed => self.n * self.n * 4,
            FormatVersion::Compressed => self.n * self.bandwidth() * 4,
        }
    }
}

/// Parse the 24-byte header without touching the coefficient or rhs blocks.
pub fn read_header<R: Read>(reader: R) -> Result<FileHeader, DecodeError> {
    let mut reader = ByteReader::new(reader);
    read_header_from(&mut reader)
}

pub(crate) fn read_header_from<R: Read>(
    reader: &mut ByteReader<R>,
) -> Result<FileHeader, DecodeError> {
    let file_id = reader.read_u32()?;
    if file_id != MAGIC_ID {
        return Err(DecodeError::BadMagic { found: file_id });
    }
    let raw_version = reader.read_u32()?;
    let version = FormatVersion::from_wire(raw_version)
        .ok_or(DecodeError::UnsupportedVersion { found: raw_version })?;
    let reserved = reader.read_u32()?;
    let n = reader.read_i32()?;
    let q = reader.read_i32()?;
    let p = reader.read_i32()?;
    // the wire fields are signed; reject shapes no valid writer produces
    if n <= 0 || q < 0 || p < 0 {
        return Err(DecodeError::InvalidDimensions { n, q, p });
    }
    Ok(FileHeader {
        file_id,
        version,
        reserved,
        n: n as usize,
        lower: p as usize,
        upper: q as usize,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_bytes(version: u32, n: i32, q: i32, p: i32) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(HEADER_LEN);
        bytes.extend_from_slice(&MAGIC_ID.to_le_bytes());
        bytes.extend_from_slice(&version.to_le_bytes());
        bytes.extend_from_slice(&0xfeedu32.to_le_bytes());
        bytes.extend_from_slice(&n.to_le_bytes());
        bytes.extend_from_slice(&q.to_le_bytes());
        bytes.extend_from_slice(&p.to_le_bytes());
        bytes
    }

    #[test]
    fn test_header_fields_and_bandwidth() {
        let bytes = header_bytes(0x202, 40_000, 2, 3);
        let header = read_header(&bytes[..]).unwrap();
        assert_eq!(header.file_id, MAGIC_ID);
        assert_eq!(header.version, FormatVersion::Compressed);
        assert_eq!(header.reserved, 0xfeed);
        assert_eq!(header.n, 40_000);
        assert_eq!(header.upper, 2);
        assert_eq!(header.lower, 3);
        assert_eq!(header.bandwidth(), 6);
    }

    #[test]
    fn test_header_reads_only_the_prefix() {
        // exactly 24 bytes, no coefficient or rhs block
        let bytes = header_bytes(0x102, 7, 0, 0);
        assert_eq!(bytes.len(), HEADER_LEN);
        let header = read_header(&bytes[..]).unwrap();
        assert_eq!(header.n, 7);
        assert_eq!(header.bandwidth(), 1);
    }

    #[test]
    fn test_coefficient_len() {
        let uncompressed = read_header(&header_bytes(0x102, 20, 1, 1)[..]).unwrap();
        assert_eq!(uncompressed.coefficient_len(), 20 * 20 * 4);
        let compressed = read_header(&header_bytes(0x202, 20, 1, 1)[..]).unwrap();
        assert_eq!(compressed.coefficient_len(), 20 * 3 * 4);
    }
}
