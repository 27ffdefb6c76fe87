//! Offset relocation for built sub-images
//!
//! A freshly built sub-image buffer carries buffer-absolute offsets, with
//! its directory at offset 16. Once the splice position inside the slide is
//! known, every out-of-line offset (and, for the label, the next-IFD
//! pointer) must be rebased so that buffer offset 16 maps to the target
//! offset. The single adjustment used throughout is `target - 16`.

use std::io::Cursor;

use log::debug;

use crate::svs::sub_image::SubImageKind;
use crate::tiff::constants::{header, tags};
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::reader::TiffReader;
use crate::utils::logger::Logger;

/// A sub-image buffer rebased to its final position inside the slide
pub struct RelocatedSubImage {
    /// Buffer with all embedded offsets rewritten to slide-absolute values
    pub buffer: Vec<u8>,
    /// For a label: the slide-absolute offset written into its next-IFD
    /// slot, which is where the macro directory must be spliced
    pub next_ifd_offset: Option<u64>,
}

/// Rewrites a built sub-image's offsets for a given splice position
pub struct OffsetRelocator<'a> {
    logger: &'a Logger,
}

impl<'a> OffsetRelocator<'a> {
    pub fn new(logger: &'a Logger) -> Self {
        OffsetRelocator { logger }
    }

    /// Rebases `buffer` so its directory lands at `target_offset`
    ///
    /// Every entry whose packed value exceeds the 8-byte slot, plus the
    /// strip offset (tag 273) regardless of size, gets `target_offset - 16`
    /// added to its stored value. For a label, the next-IFD slot receives
    /// `buffer_len + target_offset - 16` (the position right after the
    /// spliced label, where the macro goes). Any rewritten range that would
    /// end past `slide_end` fails with `RelocationOutOfRange`.
    pub fn relocate(
        &self,
        mut buffer: Vec<u8>,
        target_offset: u64,
        kind: SubImageKind,
        slide_end: u64,
    ) -> TiffResult<RelocatedSubImage> {
        if target_offset < header::BIGTIFF_HEADER_LEN {
            return Err(TiffError::RelocationOutOfRange(target_offset));
        }
        let adjustment = target_offset - header::BIGTIFF_HEADER_LEN;
        let buffer_len = buffer.len() as u64;

        let mut reader = TiffReader::new(self.logger);
        let parsed = reader.read(&mut Cursor::new(&buffer))?;
        let ifd = parsed.ifds.first().ok_or_else(|| {
            TiffError::InvalidParameter("sub-image buffer holds no directory".to_string())
        })?;

        let strip_bytes = ifd
            .require_entry(tags::STRIP_BYTE_COUNTS)?
            .value
            .first_unsigned()
            .unwrap_or(0);

        for entry in &ifd.entries {
            let out_of_line = !entry.is_value_inline(true)?;
            if !out_of_line && entry.tag != tags::STRIP_OFFSETS {
                continue;
            }

            let payload_len = if entry.tag == tags::STRIP_OFFSETS {
                strip_bytes
            } else {
                entry.packed_size()?
            };

            let rebased = entry.value_offset + adjustment;
            if rebased + payload_len > slide_end {
                return Err(TiffError::RelocationOutOfRange(rebased));
            }

            debug!(
                "Relocating tag {}: {} -> {}",
                entry.tag, entry.value_offset, rebased
            );
            write_u64_at(&mut buffer, entry.slot_offset, rebased)?;
        }

        let next_ifd_offset = match kind {
            SubImageKind::Label => {
                let next = buffer_len + adjustment;
                if next > slide_end {
                    return Err(TiffError::RelocationOutOfRange(next));
                }
                write_u64_at(&mut buffer, ifd.next_ifd_slot_offset, next)?;
                Some(next)
            }
            SubImageKind::Macro => None,
        };

        Ok(RelocatedSubImage {
            buffer,
            next_ifd_offset,
        })
    }
}

fn write_u64_at(buffer: &mut [u8], offset: u64, value: u64) -> TiffResult<()> {
    let start = offset as usize;
    let end = start + 8;
    if end > buffer.len() {
        return Err(TiffError::Truncated);
    }
    buffer[start..end].copy_from_slice(&value.to_le_bytes());
    Ok(())
}
