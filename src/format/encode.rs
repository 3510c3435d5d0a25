//! Fixture writer for the binary format
//!
//! Emits byte streams the decoder accepts. The original tool shipped with
//! pre-generated `.dat` assets; writing them on the fly keeps the QA suite,
//! benches, and tests self-contained. Values are truncated from f64 to the
//! wire's f32.

use super::header::{FormatVersion, MAGIC_ID};
use crate::storage::{BandedMatrix, DenseMatrix};
use ndarray::Array1;
use std::io::{self, Write};

fn write_u32<W: Write>(writer: &mut W, value: u32) -> io::Result<()> {
    writer.write_all(&value.to_le_bytes())
}

fn write_f32<W: Write>(writer: &mut W, value: f64) -> io::Result<()> {
    writer.write_all(&(value as f32).to_le_bytes())
}

fn write_header<W: Write>(
    writer: &mut W,
    version: FormatVersion,
    n: usize,
    q: usize,
    p: usize,
) -> io::Result<()> {
    write_u32(writer, MAGIC_ID)?;
    write_u32(writer, version.wire())?;
    write_u32(writer, 0)?; // reserved
    write_u32(writer, n as u32)?;
    write_u32(writer, q as u32)?;
    write_u32(writer, p as u32)
}

/// Write a dense system in the uncompressed (0x102) layout.
pub fn write_uncompressed<W: Write>(
    writer: &mut W,
    matrix: &DenseMatrix,
    rhs: &Array1<f64>,
) -> io::Result<()> {
    write_header(writer, FormatVersion::Uncompressed, matrix.n, 0, 0)?;
    for i in 0..matrix.n {
        for j in 0..matrix.n {
            write_f32(writer, matrix.data[[i, j]])?;
        }
    }
    for &value in rhs {
        write_f32(writer, value)?;
    }
    Ok(())
}

/// Write a banded system in the compressed (0x202) layout.
///
/// The band storage is already laid out exactly like the wire's coefficient
/// block, so rows go out verbatim.
pub fn write_compressed<W: Write>(
    writer: &mut W,
    matrix: &BandedMatrix,
    rhs: &Array1<f64>,
) -> io::Result<()> {
    write_header(
        writer,
        FormatVersion::Compressed,
        matrix.n,
        matrix.upper,
        matrix.lower,
    )?;
    for i in 0..matrix.n {
        for k in 0..matrix.bandwidth() {
            write_f32(writer, matrix.data[[i, k]])?;
        }
    }
    for &value in rhs {
        write_f32(writer, value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::header::HEADER_LEN;
    use super::*;
    use ndarray::array;

    #[test]
    fn test_uncompressed_block_sizes() {
        let dense = DenseMatrix::zeros(5);
        let rhs = Array1::zeros(5);
        let mut bytes = Vec::new();
        write_uncompressed(&mut bytes, &dense, &rhs).unwrap();
        assert_eq!(bytes.len(), HEADER_LEN + 5 * 5 * 4 + 5 * 4);
    }

    #[test]
    fn test_compressed_block_sizes() {
        let banded = BandedMatrix::zeros(6, 2, 1);
        let rhs = Array1::zeros(6);
        let mut bytes = Vec::new();
        write_compressed(&mut bytes, &banded, &rhs).unwrap();
        assert_eq!(bytes.len(), HEADER_LEN + 6 * 4 * 4 + 6 * 4);
    }

    #[test]
    fn test_values_are_truncated_to_f32() {
        let mut dense = DenseMatrix::zeros(1);
        dense.data[[0, 0]] = std::f64::consts::PI;
        let rhs = array![1.0];
        let mut bytes = Vec::new();
        write_uncompressed(&mut bytes, &dense, &rhs).unwrap();
        let stored = f32::from_le_bytes([
            bytes[HEADER_LEN],
            bytes[HEADER_LEN + 1],
            bytes[HEADER_LEN + 2],
            bytes[HEADER_LEN + 3],
        ]);
        assert_eq!(stored, std::f64::consts::PI as f32);
    }
}
