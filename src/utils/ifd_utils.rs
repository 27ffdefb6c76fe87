//! IFD utilities
//!
//! Utilities for working with Image File Directories (IFDs) in TIFF files.

use log::debug;

use crate::io::byte_order::ByteOrderHandler;
use crate::io::seekable::SeekableReader;
use crate::tiff::errors::TiffResult;

/// Reads the first IFD offset from a TIFF file header
///
/// 8 bytes for BigTIFF, 4 bytes for classic TIFF.
pub fn read_first_ifd_offset(
    reader: &mut dyn SeekableReader,
    is_big_tiff: bool,
    byte_order_handler: &dyn ByteOrderHandler,
) -> TiffResult<u64> {
    if is_big_tiff {
        debug!("Reading BigTIFF first IFD offset");
        Ok(byte_order_handler.read_u64(reader)?)
    } else {
        debug!("Reading standard TIFF first IFD offset");
        Ok(byte_order_handler.read_u32(reader)? as u64)
    }
}

/// Reads a next-IFD offset (0 terminates the chain)
pub fn read_next_ifd_offset(
    reader: &mut dyn SeekableReader,
    is_big_tiff: bool,
    byte_order_handler: &dyn ByteOrderHandler,
) -> TiffResult<u64> {
    if is_big_tiff {
        Ok(byte_order_handler.read_u64(reader)?)
    } else {
        Ok(byte_order_handler.read_u32(reader)? as u64)
    }
}
