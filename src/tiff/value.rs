//! Decoded IFD tag values
//!
//! A tag's payload is decoded eagerly when it fits in the entry's value
//! slot, and for the two tags the pipeline always needs in full
//! (BitsPerSample and ImageDescription). Everything else that lives out of
//! line is kept as the raw slot integer and marked `TooLong`.

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Cursor;

use crate::tiff::constants::field_types;
use crate::tiff::errors::{TiffError, TiffResult};

/// Byte width of a single value of the given field type
///
/// Returns None for type codes the TIFF specification does not define.
pub fn type_size(field_type: u16) -> Option<u64> {
    match field_type {
        field_types::BYTE | field_types::ASCII | field_types::SBYTE | field_types::UNDEFINED => {
            Some(1)
        }
        field_types::SHORT | field_types::SSHORT => Some(2),
        field_types::LONG | field_types::SLONG | field_types::FLOAT => Some(4),
        field_types::RATIONAL | field_types::SRATIONAL | field_types::DOUBLE => Some(8),
        field_types::LONG8 | field_types::SLONG8 | field_types::IFD8 => Some(8),
        _ => None,
    }
}

/// A decoded tag value
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    /// BYTE/SHORT/LONG/LONG8 and friends, widened to u64
    Unsigned(Vec<u64>),
    /// SBYTE/SSHORT/SLONG/SLONG8, widened to i64
    Signed(Vec<i64>),
    /// RATIONAL/SRATIONAL numerator/denominator pairs
    Rationals(Vec<(u32, u32)>),
    /// FLOAT/DOUBLE, widened to f64
    Floats(Vec<f64>),
    /// ASCII or UNDEFINED payload concatenated into one byte string
    Ascii(Vec<u8>),
    /// Out-of-line data the parser does not follow
    TooLong,
}

impl TagValue {
    /// Decodes `count` values of `field_type` from little-endian bytes
    ///
    /// `bytes` must hold at least `count * type_size(field_type)` bytes.
    pub fn decode(field_type: u16, count: u64, bytes: &[u8]) -> TiffResult<TagValue> {
        let width = type_size(field_type).ok_or(TiffError::InvalidType(field_type))?;
        let needed = (count * width) as usize;
        if bytes.len() < needed {
            return Err(TiffError::Truncated);
        }

        let mut cursor = Cursor::new(&bytes[..needed]);
        let n = count as usize;

        let value = match field_type {
            field_types::ASCII | field_types::UNDEFINED => {
                TagValue::Ascii(bytes[..needed].to_vec())
            }
            field_types::BYTE => {
                let mut values = Vec::with_capacity(n);
                for _ in 0..n {
                    values.push(cursor.read_u8()? as u64);
                }
                TagValue::Unsigned(values)
            }
            field_types::SHORT => {
                let mut values = Vec::with_capacity(n);
                for _ in 0..n {
                    values.push(cursor.read_u16::<LittleEndian>()? as u64);
                }
                TagValue::Unsigned(values)
            }
            field_types::LONG => {
                let mut values = Vec::with_capacity(n);
                for _ in 0..n {
                    values.push(cursor.read_u32::<LittleEndian>()? as u64);
                }
                TagValue::Unsigned(values)
            }
            field_types::LONG8 | field_types::IFD8 => {
                let mut values = Vec::with_capacity(n);
                for _ in 0..n {
                    values.push(cursor.read_u64::<LittleEndian>()?);
                }
                TagValue::Unsigned(values)
            }
            field_types::SBYTE => {
                let mut values = Vec::with_capacity(n);
                for _ in 0..n {
                    values.push(cursor.read_i8()? as i64);
                }
                TagValue::Signed(values)
            }
            field_types::SSHORT => {
                let mut values = Vec::with_capacity(n);
                for _ in 0..n {
                    values.push(cursor.read_i16::<LittleEndian>()? as i64);
                }
                TagValue::Signed(values)
            }
            field_types::SLONG => {
                let mut values = Vec::with_capacity(n);
                for _ in 0..n {
                    values.push(cursor.read_i32::<LittleEndian>()? as i64);
                }
                TagValue::Signed(values)
            }
            field_types::SLONG8 => {
                let mut values = Vec::with_capacity(n);
                for _ in 0..n {
                    values.push(cursor.read_i64::<LittleEndian>()?);
                }
                TagValue::Signed(values)
            }
            field_types::RATIONAL | field_types::SRATIONAL => {
                let mut values = Vec::with_capacity(n);
                for _ in 0..n {
                    let num = cursor.read_u32::<LittleEndian>()?;
                    let den = cursor.read_u32::<LittleEndian>()?;
                    values.push((num, den));
                }
                TagValue::Rationals(values)
            }
            field_types::FLOAT => {
                let mut values = Vec::with_capacity(n);
                for _ in 0..n {
                    values.push(cursor.read_f32::<LittleEndian>()? as f64);
                }
                TagValue::Floats(values)
            }
            field_types::DOUBLE => {
                let mut values = Vec::with_capacity(n);
                for _ in 0..n {
                    values.push(cursor.read_f64::<LittleEndian>()?);
                }
                TagValue::Floats(values)
            }
            _ => return Err(TiffError::InvalidType(field_type)),
        };

        Ok(value)
    }

    /// First value widened to u64, if this is an unsigned value
    pub fn first_unsigned(&self) -> Option<u64> {
        match self {
            TagValue::Unsigned(values) => values.first().copied(),
            _ => None,
        }
    }

    /// All values widened to u64, if this is an unsigned value
    pub fn as_unsigned(&self) -> Option<&[u64]> {
        match self {
            TagValue::Unsigned(values) => Some(values),
            _ => None,
        }
    }

    /// Raw byte string, if this is an ASCII value
    pub fn as_ascii(&self) -> Option<&[u8]> {
        match self {
            TagValue::Ascii(bytes) => Some(bytes),
            _ => None,
        }
    }
}
