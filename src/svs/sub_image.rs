//! Replacement sub-image construction
//!
//! Builds a one-directory little-endian BigTIFF holding a single
//! uncompressed RGB strip, entirely in memory. The buffer is written as a
//! standalone file (header included) with buffer-absolute offsets; the
//! relocator later rebases those offsets to the sub-image's final position
//! inside the slide, and the splicer copies everything past the 16-byte
//! header into place.

use std::io::{Cursor, Seek, SeekFrom, Write};

use log::debug;

use crate::svs::pixels::ReplacementPixels;
use crate::tiff::constants::{
    compression, field_types, header, photometric, planar_config, resolution_unit, subfile, tags,
};
use crate::tiff::errors::{TiffError, TiffResult};
use crate::utils::write_utils;

/// Which of the two replaceable sub-images is being built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubImageKind {
    Label,
    Macro,
}

impl SubImageKind {
    /// NewSubfileType value for this kind
    pub fn subfile_type(&self) -> u64 {
        match self {
            SubImageKind::Label => subfile::REDUCED_RESOLUTION,
            SubImageKind::Macro => subfile::MACRO,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SubImageKind::Label => "label",
            SubImageKind::Macro => "macro",
        }
    }
}

/// How an entry's value slot is filled
enum SlotData {
    /// Packed payload of at most 8 bytes, inlined in the slot
    Inline(Vec<u8>),
    /// Payload stored past the directory; the slot holds its offset
    OutOfLine(Vec<u8>),
    /// Tag 273: the slot holds the strip position, assigned during the write
    StripOffset,
}

struct DirEntry {
    tag: u16,
    field_type: u16,
    count: u64,
    data: SlotData,
}

impl DirEntry {
    fn long(tag: u16, value: u32) -> Self {
        DirEntry {
            tag,
            field_type: field_types::LONG,
            count: 1,
            data: SlotData::Inline((value).to_le_bytes().to_vec()),
        }
    }

    fn short(tag: u16, value: u16) -> Self {
        DirEntry {
            tag,
            field_type: field_types::SHORT,
            count: 1,
            data: SlotData::Inline(value.to_le_bytes().to_vec()),
        }
    }

    fn long8(tag: u16, value: u64) -> Self {
        DirEntry {
            tag,
            field_type: field_types::LONG8,
            count: 1,
            data: SlotData::Inline(value.to_le_bytes().to_vec()),
        }
    }

    fn shorts(tag: u16, values: &[u16]) -> Self {
        let mut payload = Vec::with_capacity(values.len() * 2);
        for value in values {
            payload.extend_from_slice(&value.to_le_bytes());
        }
        let data = if payload.len() <= 8 {
            SlotData::Inline(payload)
        } else {
            SlotData::OutOfLine(payload)
        };
        DirEntry {
            tag,
            field_type: field_types::SHORT,
            count: values.len() as u64,
            data,
        }
    }

    fn rational(tag: u16, numerator: u32, denominator: u32) -> Self {
        let mut payload = Vec::with_capacity(8);
        payload.extend_from_slice(&numerator.to_le_bytes());
        payload.extend_from_slice(&denominator.to_le_bytes());
        DirEntry {
            tag,
            field_type: field_types::RATIONAL,
            count: 1,
            data: SlotData::Inline(payload),
        }
    }

    fn ascii(tag: u16, text: &str) -> Self {
        let payload = text.as_bytes().to_vec();
        let count = payload.len() as u64;
        let data = if payload.len() <= 8 {
            SlotData::Inline(payload)
        } else {
            SlotData::OutOfLine(payload)
        };
        DirEntry {
            tag,
            field_type: field_types::ASCII,
            count,
            data,
        }
    }
}

/// Builds replacement label and macro sub-images
pub struct SubImageBuilder {
    kind: SubImageKind,
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    description: Option<String>,
}

impl SubImageBuilder {
    /// Creates a builder for the given kind from an RGB pixel buffer
    ///
    /// The buffer must hold exactly `width * height * 3` bytes.
    pub fn new(
        kind: SubImageKind,
        pixels: ReplacementPixels,
        description: Option<String>,
    ) -> TiffResult<Self> {
        let expected = pixels.width as usize * pixels.height as usize * 3;
        if pixels.data.len() != expected {
            return Err(TiffError::InvalidParameter(format!(
                "{} pixel buffer holds {} bytes, expected {} for {}x{} RGB",
                kind.name(),
                pixels.data.len(),
                expected,
                pixels.width,
                pixels.height
            )));
        }

        Ok(SubImageBuilder {
            kind,
            width: pixels.width,
            height: pixels.height,
            pixels: pixels.data,
            description,
        })
    }

    /// Builds the one-directory BigTIFF buffer
    ///
    /// The directory starts at offset 16, entries are emitted in ascending
    /// tag order, out-of-line payloads land past the next-IFD slot on even
    /// boundaries, and the pixel strip comes last. The next-IFD slot is
    /// written as 0; for the label it is a placeholder the relocator
    /// rewrites to the macro's final position.
    pub fn build(&self) -> TiffResult<Vec<u8>> {
        let entries = self.directory_entries();
        let entry_count = entries.len() as u64;

        let mut cursor = Cursor::new(Vec::new());
        self.write_header(&mut cursor)?;

        cursor.write_all(&entry_count.to_le_bytes())?;

        // First free byte past the entry table and the next-IFD slot
        let mut next_free = header::BIGTIFF_HEADER_LEN + 8 + 20 * entry_count + 8;
        let mut out_of_line: Vec<(u64, &[u8])> = Vec::new();
        let mut strip_offset = 0u64;

        for entry in &entries {
            cursor.write_all(&entry.tag.to_le_bytes())?;
            cursor.write_all(&entry.field_type.to_le_bytes())?;
            cursor.write_all(&entry.count.to_le_bytes())?;

            match &entry.data {
                SlotData::Inline(payload) => {
                    cursor.write_all(&write_utils::pad_slot(payload, 8))?;
                }
                SlotData::OutOfLine(payload) => {
                    cursor.write_all(&next_free.to_le_bytes())?;
                    out_of_line.push((next_free, payload.as_slice()));
                    next_free = write_utils::align_to_even(next_free + payload.len() as u64);
                }
                SlotData::StripOffset => {
                    strip_offset = next_free;
                    cursor.write_all(&strip_offset.to_le_bytes())?;
                }
            }
        }

        // Next-IFD slot: terminator for the macro, placeholder for the label
        cursor.write_all(&0u64.to_le_bytes())?;

        for (offset, payload) in out_of_line {
            cursor.seek(SeekFrom::Start(offset))?;
            cursor.write_all(payload)?;
        }

        cursor.seek(SeekFrom::Start(strip_offset))?;
        cursor.write_all(&self.pixels)?;

        let buffer = cursor.into_inner();
        debug!(
            "Built {} sub-image: {}x{}, {} entries, strip at {}, {} bytes total",
            self.kind.name(),
            self.width,
            self.height,
            entry_count,
            strip_offset,
            buffer.len()
        );

        Ok(buffer)
    }

    fn write_header(&self, cursor: &mut Cursor<Vec<u8>>) -> TiffResult<()> {
        cursor.write_all(&header::LITTLE_ENDIAN_MARKER)?;
        cursor.write_all(&header::BIG_TIFF_VERSION.to_le_bytes())?;
        cursor.write_all(&header::BIGTIFF_OFFSET_SIZE.to_le_bytes())?;
        cursor.write_all(&0u16.to_le_bytes())?;
        cursor.write_all(&header::BIGTIFF_HEADER_LEN.to_le_bytes())?;
        Ok(())
    }

    /// Assembles the directory table, fresh per invocation
    fn directory_entries(&self) -> Vec<DirEntry> {
        let mut entries = vec![
            DirEntry::long(tags::NEW_SUBFILE_TYPE, self.kind.subfile_type() as u32),
            DirEntry::long(tags::IMAGE_WIDTH, self.width),
            DirEntry::long(tags::IMAGE_LENGTH, self.height),
            DirEntry::shorts(tags::BITS_PER_SAMPLE, &[8, 8, 8]),
            DirEntry::short(tags::COMPRESSION, compression::NONE),
            DirEntry::short(tags::PHOTOMETRIC_INTERPRETATION, photometric::RGB),
            DirEntry {
                tag: tags::STRIP_OFFSETS,
                field_type: field_types::LONG8,
                count: 1,
                data: SlotData::StripOffset,
            },
            DirEntry::short(tags::SAMPLES_PER_PIXEL, 3),
            DirEntry::long(tags::ROWS_PER_STRIP, self.height),
            DirEntry::long8(tags::STRIP_BYTE_COUNTS, self.pixels.len() as u64),
            DirEntry::rational(tags::X_RESOLUTION, 1, 1),
            DirEntry::rational(tags::Y_RESOLUTION, 1, 1),
            DirEntry::short(tags::PLANAR_CONFIGURATION, planar_config::CHUNKY),
            DirEntry::short(tags::RESOLUTION_UNIT, resolution_unit::NONE),
        ];

        if let Some(description) = &self.description {
            entries.push(DirEntry::ascii(tags::IMAGE_DESCRIPTION, description));
        }

        entries.sort_by_key(|entry| entry.tag);
        entries
    }
}
