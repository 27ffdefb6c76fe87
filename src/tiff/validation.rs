//! TIFF validation utilities
//!
//! Validation functions used while walking potentially malformed files.

use std::io::SeekFrom;

use log::{debug, error};

use crate::io::byte_order::ByteOrderHandler;
use crate::io::seekable::SeekableReader;
use crate::tiff::constants::header;
use crate::tiff::errors::{TiffError, TiffResult};

/// Validates an IFD offset to ensure it's within the file
pub fn validate_ifd_offset(offset: u64, file_size: u64) -> TiffResult<()> {
    if offset >= file_size || offset < header::TIFF_HEADER_LEN {
        return Err(TiffError::UnsupportedFormat(format!(
            "invalid IFD offset: {} (file size: {})",
            offset, file_size
        )));
    }

    Ok(())
}

/// Gets the size of the underlying stream, restoring the current position
pub fn get_file_size(reader: &mut dyn SeekableReader) -> TiffResult<u64> {
    let current_position = reader.seek(SeekFrom::Current(0))?;
    let file_size = reader.seek(SeekFrom::End(0))?;
    reader.seek(SeekFrom::Start(current_position))?;
    Ok(file_size)
}

/// Validates the BigTIFF header fields that follow the version number
///
/// The 16-bit offset size must be 8 and the reserved field must be 0.
pub fn validate_bigtiff_header(
    reader: &mut dyn SeekableReader,
    byte_order_handler: &dyn ByteOrderHandler,
) -> TiffResult<()> {
    let offset_size = byte_order_handler.read_u16(reader)?;
    let reserved = byte_order_handler.read_u16(reader)?;

    debug!("BigTIFF offset size: {}, reserved: {}", offset_size, reserved);

    if offset_size != header::BIGTIFF_OFFSET_SIZE || reserved != 0 {
        error!(
            "Invalid BigTIFF header: offset_size={}, reserved={}",
            offset_size, reserved
        );
        return Err(TiffError::UnsupportedFormat(format!(
            "invalid BigTIFF header (offset size {}, reserved {})",
            offset_size, reserved
        )));
    }

    Ok(())
}
