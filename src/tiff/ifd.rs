//! Image File Directory (IFD) structures and methods
//!
//! This module implements the core TIFF IFD (Image File Directory)
//! structures. Besides the usual tag/type/count/value quadruple, every
//! entry remembers where it and its value slot sit in the file, and each
//! directory remembers where its next-IFD pointer lives. Those positions
//! are what lets the relocator rewrite a freshly built sub-image in place.

use std::collections::HashMap;
use std::fmt;

use log::{debug, trace};

use crate::tiff::constants::tags;
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::value::{type_size, TagValue};
use crate::utils::tag_utils;

/// Represents an entry in an Image File Directory (IFD)
///
/// Each entry describes one aspect of the image (dimensions, color space,
/// compression, etc.) using a tag-value pair. The field_type determines
/// how to interpret the value or offset.
#[derive(Debug, Clone)]
pub struct IFDEntry {
    /// TIFF tag identifier
    pub tag: u16,
    /// Field type
    pub field_type: u16,
    /// Number of values
    pub count: u64,
    /// Raw slot integer: the value itself, or the offset to it
    pub value_offset: u64,
    /// File position of this entry
    pub entry_offset: u64,
    /// File position of the value/offset slot, for in-place rewrites
    pub slot_offset: u64,
    /// Decoded value, when the parser followed it
    pub value: TagValue,
}

impl IFDEntry {
    /// Creates a new IFD entry
    ///
    /// Layout positions default to zero and the value to `TooLong`; the
    /// reader fills both in while walking a file.
    pub fn new(tag: u16, field_type: u16, count: u64, value_offset: u64) -> Self {
        trace!(
            "Creating IFD entry: tag={} ({}), type={} ({}), count={}, offset/value={}",
            tag,
            tag_utils::get_tag_name(tag),
            field_type,
            tag_utils::get_field_type_name(field_type),
            count,
            value_offset
        );

        Self {
            tag,
            field_type,
            count,
            value_offset,
            entry_offset: 0,
            slot_offset: 0,
            value: TagValue::TooLong,
        }
    }

    /// Total packed size of this entry's values in bytes
    pub fn packed_size(&self) -> TiffResult<u64> {
        let width = type_size(self.field_type).ok_or(TiffError::InvalidType(self.field_type))?;
        Ok(width * self.count)
    }

    /// Determines if the value is stored inline in the value slot
    /// rather than at the offset location
    pub fn is_value_inline(&self, is_big_tiff: bool) -> TiffResult<bool> {
        let slot_size = if is_big_tiff { 8 } else { 4 };
        Ok(self.packed_size()? <= slot_size)
    }

    /// Returns a human-readable description of this entry
    pub fn description(&self) -> String {
        let value_display = match self.tag {
            tags::COMPRESSION => format!(
                "{} ({})",
                self.value_offset,
                tag_utils::get_compression_name(self.value_offset)
            ),
            tags::PHOTOMETRIC_INTERPRETATION => format!(
                "{} ({})",
                self.value_offset,
                tag_utils::get_photometric_name(self.value_offset)
            ),
            _ => self.value_offset.to_string(),
        };

        format!(
            "Tag: {} ({}), Type: {} ({}), Count: {}, Value/Offset: {}",
            self.tag,
            tag_utils::get_tag_name(self.tag),
            self.field_type,
            tag_utils::get_field_type_name(self.field_type),
            self.count,
            value_display
        )
    }
}

/// Represents an Image File Directory (IFD) in a TIFF file
///
/// An IFD contains metadata about an image, stored as a series of tag
/// entries. SVS files carry one IFD per pyramid level plus the label and
/// macro directories at the end of the chain.
#[derive(Debug, Clone)]
pub struct IFD {
    /// Entries in this IFD, in file order
    pub entries: Vec<IFDEntry>,
    /// IFD number (0-based)
    pub number: usize,
    /// Offset to this IFD in the file
    pub offset: u64,
    /// Offset stored in this IFD's next-IFD pointer (0 terminates the chain)
    pub next_ifd_offset: u64,
    /// File position of the next-IFD pointer itself, for in-place rewrites
    pub next_ifd_slot_offset: u64,
    /// Tag number to entry index, for quick lookup
    tag_map: HashMap<u16, usize>,
}

impl IFD {
    /// Creates a new IFD
    pub fn new(number: usize, offset: u64) -> Self {
        debug!("Creating new IFD #{} at offset {}", number, offset);

        Self {
            entries: Vec::new(),
            number,
            offset,
            next_ifd_offset: 0,
            next_ifd_slot_offset: 0,
            tag_map: HashMap::new(),
        }
    }

    /// Adds an entry to this IFD and updates the lookup cache
    pub fn add_entry(&mut self, entry: IFDEntry) {
        trace!("Adding entry to IFD #{}: {}", self.number, entry.description());

        self.tag_map.insert(entry.tag, self.entries.len());
        self.entries.push(entry);
    }

    /// Gets a tag's raw slot integer directly
    pub fn get_tag_value(&self, tag: u16) -> Option<u64> {
        self.get_entry(tag).map(|entry| entry.value_offset)
    }

    /// Checks if this IFD has a specific tag
    pub fn has_tag(&self, tag: u16) -> bool {
        self.tag_map.contains_key(&tag)
    }

    /// Gets an IFD entry by tag
    pub fn get_entry(&self, tag: u16) -> Option<&IFDEntry> {
        self.tag_map.get(&tag).map(|&index| &self.entries[index])
    }

    /// Gets an entry by tag, failing with `LabelMacroNotFound` when absent
    ///
    /// The inspector and extractor use this for the tags the pipeline
    /// cannot proceed without.
    pub fn require_entry(&self, tag: u16) -> TiffResult<&IFDEntry> {
        self.get_entry(tag).ok_or_else(|| {
            TiffError::LabelMacroNotFound(format!(
                "directory #{} has no tag {} ({})",
                self.number,
                tag,
                tag_utils::get_tag_name(tag)
            ))
        })
    }

    /// Gets the dimensions of the image described by this IFD
    pub fn get_dimensions(&self) -> Option<(u64, u64)> {
        let width = self.get_tag_value(tags::IMAGE_WIDTH)?;
        let height = self.get_tag_value(tags::IMAGE_LENGTH)?;
        Some((width, height))
    }

    /// Gets the number of entries in this IFD
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

impl fmt::Display for IFD {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "IFD #{} (offset: {})", self.number, self.offset)?;
        writeln!(f, "  Number of entries: {}", self.entries.len())?;

        if let Some((width, height)) = self.get_dimensions() {
            writeln!(f, "  Dimensions: {}x{}", width, height)?;
        }

        writeln!(f, "  Tags:")?;
        for entry in &self.entries {
            writeln!(f, "    {}", entry.description())?;
        }
        writeln!(f, "  Next IFD offset: {}", self.next_ifd_offset)?;

        Ok(())
    }
}
