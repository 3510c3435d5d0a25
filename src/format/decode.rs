//! Binary stream decoding
//!
//! Reconstructs the coefficient matrix and right-hand side from the `.dat`
//! wire layout. All integers and floats on the wire are little-endian
//! 32-bit; float values are widened to f64 on the way in.

use super::header::{read_header_from, FileHeader, FormatVersion};
use crate::storage::{BandedMatrix, Coefficients, DenseMatrix, LinearSystem};
use ndarray::Array1;
use std::io::{self, Read};
use thiserror::Error;

/// Errors produced while decoding a file.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("invalid file id {found:#010x}, expected 0x0c0a8708")]
    BadMagic { found: u32 },
    #[error("unsupported format version {found:#x}")]
    UnsupportedVersion { found: u32 },
    #[error("invalid dimensions in header: n={n}, q={q}, p={p}")]
    InvalidDimensions { n: i32, q: i32, p: i32 },
    #[error("stream truncated at byte offset {offset}")]
    Truncated { offset: u64 },
    #[error("read failed at byte offset {offset}")]
    Io {
        offset: u64,
        #[source]
        source: io::Error,
    },
}

/// Reader that tracks the stream position, so a short read can report the
/// byte offset at which it started.
pub(crate) struct ByteReader<R> {
    inner: R,
    offset: u64,
    scratch: Vec<u8>,
}

impl<R: Read> ByteReader<R> {
    pub(crate) fn new(inner: R) -> Self {
        Self {
            inner,
            offset: 0,
            scratch: Vec::new(),
        }
    }

    fn read_exact_at(
        inner: &mut R,
        offset: &mut u64,
        buf: &mut [u8],
    ) -> Result<(), DecodeError> {
        let start = *offset;
        match inner.read_exact(buf) {
            Ok(()) => {
                *offset += buf.len() as u64;
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                Err(DecodeError::Truncated { offset: start })
            }
            Err(e) => Err(DecodeError::Io {
                offset: start,
                source: e,
            }),
        }
    }

    pub(crate) fn read_u32(&mut self) -> Result<u32, DecodeError> {
        let mut buf = [0u8; 4];
        Self::read_exact_at(&mut self.inner, &mut self.offset, &mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    pub(crate) fn read_i32(&mut self) -> Result<i32, DecodeError> {
        let mut buf = [0u8; 4];
        Self::read_exact_at(&mut self.inner, &mut self.offset, &mut buf)?;
        Ok(i32::from_le_bytes(buf))
    }

    /// Read `out.len()` f32 values, widened to f64.
    fn read_f32_row(&mut self, out: &mut [f64]) -> Result<(), DecodeError> {
        let len = out.len() * 4;
        if self.scratch.len() < len {
            self.scratch.resize(len, 0);
        }
        let Self {
            inner,
            offset,
            scratch,
        } = self;
        Self::read_exact_at(inner, offset, &mut scratch[..len])?;
        for (value, bytes) in out.iter_mut().zip(scratch.chunks_exact(4)) {
            *value = f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as f64;
        }
        Ok(())
    }
}

/// Fully decode a stream into a linear system.
///
/// `prefer_compact` selects [`BandedMatrix`] storage for compressed input;
/// uncompressed input always decodes dense, since the full-matrix layout
/// carries no meaningful band structure. Returns the parsed header along
/// with the system so the caller can pick a solver variant.
///
/// Compressed entries whose implied column `i - p + k` falls outside
/// `[0, n)` are dropped silently, mirroring the tolerant clipping of the
/// storage layer.
pub fn decode<R: Read>(
    reader: R,
    prefer_compact: bool,
) -> Result<(FileHeader, LinearSystem), DecodeError> {
    let mut reader = ByteReader::new(reader);
    let header = read_header_from(&mut reader)?;
    let n = header.n;

    let matrix = match header.version {
        FormatVersion::Uncompressed => {
            let mut grid = DenseMatrix::zeros(n);
            let mut row = vec![0.0f64; n];
            for i in 0..n {
                reader.read_f32_row(&mut row)?;
                for (j, &value) in row.iter().enumerate() {
                    grid.data[[i, j]] = value;
                }
            }
            Coefficients::Dense(grid)
        }
        FormatVersion::Compressed if prefer_compact => {
            let mut grid = BandedMatrix::zeros(n, header.lower, header.upper);
            let mut row = vec![0.0f64; header.bandwidth()];
            for i in 0..n {
                reader.read_f32_row(&mut row)?;
                // physical layout matches the wire layout, store verbatim
                for (k, &value) in row.iter().enumerate() {
                    grid.data[[i, k]] = value;
                }
            }
            Coefficients::Banded(grid)
        }
        FormatVersion::Compressed => {
            let mut grid = DenseMatrix::zeros(n);
            let mut row = vec![0.0f64; header.bandwidth()];
            for i in 0..n {
                reader.read_f32_row(&mut row)?;
                for (k, &value) in row.iter().enumerate() {
                    if let Some(j) = (i + k).checked_sub(header.lower) {
                        if j < n {
                            grid.data[[i, j]] = value;
                        }
                    }
                }
            }
            Coefficients::Dense(grid)
        }
    };

    let mut rhs = vec![0.0f64; n];
    reader.read_f32_row(&mut rhs)?;

    log::debug!(
        "decoded {:?} system: n={}, storage={}",
        header.version,
        n,
        matrix.kind()
    );

    Ok((
        header,
        LinearSystem {
            matrix,
            rhs: Array1::from(rhs),
        },
    ))
}
