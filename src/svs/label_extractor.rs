//! Standalone label export
//!
//! Synthesizes a minimal classic little-endian TIFF around the label's raw
//! strip bytes so the label can be previewed or archived before redaction.
//! Some GT450 software revisions omit the ImageDescription tag that viewers
//! key off, which leaves standard slide readers unable to find the label;
//! wrapping the strip in a plain single-directory TIFF sidesteps that. The
//! macro needs no counterpart because its strip is already a JPEG stream.

use std::io::{Cursor, Seek, SeekFrom, Write};

use log::debug;

use crate::svs::inspector::SlideLayout;
use crate::tiff::constants::{field_types, header, photometric, planar_config, predictor, tags};
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::ifd::IFD;
use crate::utils::write_utils;

/// Number of directory entries in the synthesized TIFF
const ENTRY_COUNT: u16 = 12;

/// Builds standalone classic TIFFs from label strips
pub struct LabelExtractor;

impl LabelExtractor {
    /// Reads the label strip from the slide and wraps it as a classic TIFF
    ///
    /// Must run before the slide is redacted.
    pub fn extract(layout: &SlideLayout) -> TiffResult<Vec<u8>> {
        let strip = layout.read_label_strip()?;
        Self::build(&strip, &layout.label_ifd)
    }

    /// Wraps raw label strip bytes in a classic TIFF using the metadata of
    /// the label's original directory
    pub fn build(strip: &[u8], label_ifd: &IFD) -> TiffResult<Vec<u8>> {
        let width = required_value(label_ifd, tags::IMAGE_WIDTH)?;
        let height = required_value(label_ifd, tags::IMAGE_LENGTH)?;
        let rows_per_strip = required_value(label_ifd, tags::ROWS_PER_STRIP)?;
        let compression = required_value(label_ifd, tags::COMPRESSION)?;
        let bits_entry = label_ifd.require_entry(tags::BITS_PER_SAMPLE)?;
        let bits: Vec<u16> = bits_entry
            .value
            .as_unsigned()
            .ok_or_else(|| {
                TiffError::LabelMacroNotFound(
                    "label BitsPerSample value was not decoded".to_string(),
                )
            })?
            .iter()
            .map(|&bit| bit as u16)
            .collect();

        let mut cursor = Cursor::new(Vec::new());

        // Classic header: "II", version 42, first IFD at byte 8
        cursor.write_all(&header::LITTLE_ENDIAN_MARKER)?;
        cursor.write_all(&header::TIFF_VERSION.to_le_bytes())?;
        cursor.write_all(&(header::TIFF_HEADER_LEN as u32).to_le_bytes())?;

        cursor.write_all(&ENTRY_COUNT.to_le_bytes())?;

        // First free byte past the entry table and the next-IFD slot
        let directory_end = header::TIFF_HEADER_LEN + 2 + 12 * ENTRY_COUNT as u64 + 4;
        let mut next_free = write_utils::align_to_even(directory_end);

        let mut bits_payload = Vec::with_capacity(bits.len() * 2);
        for bit in &bits {
            bits_payload.extend_from_slice(&bit.to_le_bytes());
        }
        let bits_offset = next_free;
        next_free = write_utils::align_to_even(bits_offset + bits_payload.len() as u64);
        let strip_offset = next_free;

        write_entry(&mut cursor, tags::NEW_SUBFILE_TYPE, field_types::LONG, 1, 1)?;
        write_entry(&mut cursor, tags::IMAGE_WIDTH, field_types::SHORT, 1, width)?;
        write_entry(&mut cursor, tags::IMAGE_LENGTH, field_types::SHORT, 1, height)?;
        write_entry(
            &mut cursor,
            tags::BITS_PER_SAMPLE,
            field_types::SHORT,
            bits.len() as u32,
            bits_offset as u32,
        )?;
        write_entry(&mut cursor, tags::COMPRESSION, field_types::SHORT, 1, compression)?;
        write_entry(
            &mut cursor,
            tags::PHOTOMETRIC_INTERPRETATION,
            field_types::SHORT,
            1,
            photometric::RGB as u32,
        )?;
        write_entry(
            &mut cursor,
            tags::STRIP_OFFSETS,
            field_types::LONG,
            1,
            strip_offset as u32,
        )?;
        write_entry(&mut cursor, tags::SAMPLES_PER_PIXEL, field_types::SHORT, 1, 3)?;
        write_entry(&mut cursor, tags::ROWS_PER_STRIP, field_types::SHORT, 1, rows_per_strip)?;
        write_entry(
            &mut cursor,
            tags::STRIP_BYTE_COUNTS,
            field_types::LONG,
            1,
            strip.len() as u32,
        )?;
        write_entry(
            &mut cursor,
            tags::PLANAR_CONFIGURATION,
            field_types::SHORT,
            1,
            planar_config::CHUNKY as u32,
        )?;
        write_entry(
            &mut cursor,
            tags::PREDICTOR,
            field_types::SHORT,
            1,
            predictor::HORIZONTAL_DIFFERENCING as u32,
        )?;

        // Next-IFD terminator
        cursor.write_all(&0u32.to_le_bytes())?;

        cursor.seek(SeekFrom::Start(bits_offset))?;
        cursor.write_all(&bits_payload)?;
        cursor.seek(SeekFrom::Start(strip_offset))?;
        cursor.write_all(strip)?;

        let buffer = cursor.into_inner();
        debug!(
            "Extracted label TIFF: {}x{}, strip {} bytes at {}, {} bytes total",
            width,
            height,
            strip.len(),
            strip_offset,
            buffer.len()
        );

        Ok(buffer)
    }
}

/// First value of a tag the extractor cannot proceed without, as u32
fn required_value(ifd: &IFD, tag: u16) -> TiffResult<u32> {
    let entry = ifd.require_entry(tag)?;
    let value = entry.value.first_unsigned().ok_or_else(|| {
        TiffError::LabelMacroNotFound(format!("label tag {} has no usable value", tag))
    })?;
    Ok(value as u32)
}

/// Writes one 12-byte classic IFD entry
///
/// The 4-byte slot takes either the inline value or an offset; a single
/// inline SHORT written as little-endian u32 lands in the slot's low two
/// bytes with the rest zero, exactly as the format requires.
fn write_entry(
    cursor: &mut Cursor<Vec<u8>>,
    tag: u16,
    field_type: u16,
    count: u32,
    value: u32,
) -> TiffResult<()> {
    cursor.write_all(&tag.to_le_bytes())?;
    cursor.write_all(&field_type.to_le_bytes())?;
    cursor.write_all(&count.to_le_bytes())?;
    cursor.write_all(&value.to_le_bytes())?;
    Ok(())
}
