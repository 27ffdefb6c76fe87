//! TIFF file reader implementation
//!
//! This module implements the TIFF/BigTIFF directory reader. It walks the
//! linked list of IFDs, recording where every entry and next-IFD pointer
//! sits so later stages can rewrite them in place. Values that fit in the
//! entry slot are decoded immediately; BitsPerSample and ImageDescription
//! are followed out of line because the replacement pipeline always needs
//! them; everything else out of line is left as a raw offset.

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use log::{debug, info};

use crate::io::byte_order::ByteOrderHandler;
use crate::io::seekable::SeekableReader;
use crate::tiff::constants::tags;
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::ifd::{IFD, IFDEntry};
use crate::tiff::types::TIFF;
use crate::tiff::validation;
use crate::tiff::value::TagValue;
use crate::utils::format_utils;
use crate::utils::ifd_utils;
use crate::utils::logger::Logger;

// Guard against cyclic IFD chains; real slides carry at most a dozen or so.
const MAX_IFDS: usize = 100;

/// Reader for little-endian TIFF and BigTIFF files
pub struct TiffReader<'a> {
    /// Current byte order handler
    byte_order_handler: Option<Box<dyn ByteOrderHandler>>,
    /// Logger instance
    logger: &'a Logger,
    /// Current file path
    current_file: Option<String>,
    /// Whether currently reading BigTIFF format
    is_big_tiff: bool,
}

impl<'a> TiffReader<'a> {
    /// Creates a new TIFF reader
    pub fn new(logger: &'a Logger) -> Self {
        TiffReader {
            byte_order_handler: None,
            logger,
            current_file: None,
            is_big_tiff: false,
        }
    }

    fn handler(&self) -> TiffResult<&dyn ByteOrderHandler> {
        self.byte_order_handler
            .as_deref()
            .ok_or_else(|| TiffError::UnsupportedFormat("byte order not yet determined".to_string()))
    }

    /// Loads a TIFF file from the given path
    ///
    /// Opens the file read-only and delegates to `read()`.
    pub fn load(&mut self, filepath: &str) -> TiffResult<TIFF> {
        info!("Loading TIFF file: {}", filepath);
        self.logger.log(&format!("Loading TIFF file: {}", filepath))?;
        self.current_file = Some(filepath.to_string());

        let file = File::open(Path::new(filepath))?;
        let mut reader = BufReader::with_capacity(1024 * 1024, file);

        self.read(&mut reader)
    }

    /// Reads a TIFF structure from the given reader
    ///
    /// Detects byte order and format, then walks every IFD in the chain.
    pub fn read(&mut self, reader: &mut dyn SeekableReader) -> TiffResult<TIFF> {
        debug!("TiffReader::read starting");

        self.byte_order_handler = Some(format_utils::detect_byte_order(reader)?);

        let (is_big_tiff, _) = format_utils::detect_tiff_format(reader, self.handler()?)?;
        self.is_big_tiff = is_big_tiff;

        let first_ifd_offset = ifd_utils::read_first_ifd_offset(reader, is_big_tiff, self.handler()?)?;
        debug!("First IFD offset: {}", first_ifd_offset);

        let file_size = validation::get_file_size(reader)?;
        validation::validate_ifd_offset(first_ifd_offset, file_size)?;

        let mut tiff = TIFF::new(is_big_tiff);
        tiff.ifds = self.read_ifd_chain(reader, first_ifd_offset, file_size)?;

        info!("Read {} IFDs from TIFF file", tiff.ifds.len());
        Ok(tiff)
    }

    /// Reads the chain of IFDs starting from the given offset
    ///
    /// Terminates when a directory stores 0 as its next-IFD offset.
    fn read_ifd_chain(
        &self,
        reader: &mut dyn SeekableReader,
        first_ifd_offset: u64,
        file_size: u64,
    ) -> TiffResult<Vec<IFD>> {
        let mut ifds = Vec::new();
        let mut ifd_offset = first_ifd_offset;

        while ifd_offset != 0 {
            if ifds.len() >= MAX_IFDS {
                return Err(TiffError::UnsupportedFormat(format!(
                    "IFD chain exceeds {} directories",
                    MAX_IFDS
                )));
            }
            if ifd_offset >= file_size {
                debug!("IFD offset {} exceeds file size {}", ifd_offset, file_size);
                return Err(TiffError::Truncated);
            }

            let ifd = self.read_ifd(reader, ifd_offset, ifds.len())?;
            debug!(
                "Read IFD #{} with {} entries, next offset {}",
                ifd.number,
                ifd.entries.len(),
                ifd.next_ifd_offset
            );

            ifd_offset = ifd.next_ifd_offset;
            ifds.push(ifd);
        }

        Ok(ifds)
    }

    /// Reads a single IFD at the given offset
    ///
    /// Besides the entries themselves, this records the position of the
    /// directory's next-IFD pointer so it can later be rewritten.
    pub fn read_ifd(
        &self,
        reader: &mut dyn SeekableReader,
        offset: u64,
        number: usize,
    ) -> TiffResult<IFD> {
        reader.seek(SeekFrom::Start(offset))?;

        let entry_count = self.read_ifd_entry_count(reader)?;
        debug!("IFD entry count: {}", entry_count);

        let mut ifd = IFD::new(number, offset);

        for _ in 0..entry_count {
            let entry = self.read_ifd_entry(reader)?;
            ifd.add_entry(entry);
        }

        ifd.next_ifd_slot_offset = reader.seek(SeekFrom::Current(0))?;
        ifd.next_ifd_offset =
            ifd_utils::read_next_ifd_offset(reader, self.is_big_tiff, self.handler()?)?;

        Ok(ifd)
    }

    /// Reads the entry count of an IFD
    fn read_ifd_entry_count(&self, reader: &mut dyn SeekableReader) -> TiffResult<u64> {
        let handler = self.handler()?;
        if self.is_big_tiff {
            Ok(handler.read_u64(reader)?)
        } else {
            Ok(handler.read_u16(reader)? as u64)
        }
    }

    /// Reads a single IFD entry and decodes its value where possible
    fn read_ifd_entry(&self, reader: &mut dyn SeekableReader) -> TiffResult<IFDEntry> {
        let handler = self.handler()?;

        let entry_offset = reader.seek(SeekFrom::Current(0))?;
        let tag = handler.read_u16(reader)?;
        let field_type = handler.read_u16(reader)?;
        let count = if self.is_big_tiff {
            handler.read_u64(reader)?
        } else {
            handler.read_u32(reader)? as u64
        };

        let slot_offset = reader.seek(SeekFrom::Current(0))?;
        let mut slot = [0u8; 8];
        if self.is_big_tiff {
            reader.read_exact(&mut slot)?;
        } else {
            reader.read_exact(&mut slot[..4])?;
        }
        let value_offset = u64::from_le_bytes(slot);

        let mut entry = IFDEntry::new(tag, field_type, count, value_offset);
        entry.entry_offset = entry_offset;
        entry.slot_offset = slot_offset;
        entry.value = self.decode_entry_value(reader, &entry, &slot)?;

        Ok(entry)
    }

    /// Decodes an entry's value
    ///
    /// Inline values decode from the slot bytes. BitsPerSample (258) and
    /// ImageDescription (270) are followed to their out-of-line position;
    /// any other out-of-line value is recorded as `TooLong`.
    fn decode_entry_value(
        &self,
        reader: &mut dyn SeekableReader,
        entry: &IFDEntry,
        slot: &[u8; 8],
    ) -> TiffResult<TagValue> {
        let slot_size: u64 = if self.is_big_tiff { 8 } else { 4 };
        let packed = entry.packed_size()?;

        if packed <= slot_size {
            return TagValue::decode(entry.field_type, entry.count, slot);
        }

        if entry.tag == tags::BITS_PER_SAMPLE || entry.tag == tags::IMAGE_DESCRIPTION {
            let return_position = reader.seek(SeekFrom::Current(0))?;
            reader.seek(SeekFrom::Start(entry.value_offset))?;
            let mut buffer = vec![0u8; packed as usize];
            reader.read_exact(&mut buffer)?;
            reader.seek(SeekFrom::Start(return_position))?;
            return TagValue::decode(entry.field_type, entry.count, &buffer);
        }

        Ok(TagValue::TooLong)
    }

    /// Gets the file path if available
    pub fn get_file_path(&self) -> Option<&str> {
        self.current_file.as_deref()
    }

    /// Returns whether the current file is a BigTIFF
    pub fn is_big_tiff(&self) -> bool {
        self.is_big_tiff
    }
}
