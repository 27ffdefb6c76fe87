//! SVS slide inspection
//!
//! Locates the label and macro directories of an SVS slide and exposes the
//! byte ranges the redaction and splice phases operate on. Selection is
//! positional: the label is the second-to-last directory in the chain and
//! the macro is the last. Compression codes (LZW for the label, JPEG for
//! the macro) are checked only as an advisory signal, since Leica software
//! revisions differ in which tags they emit.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};

use log::{info, warn};

use crate::tiff::constants::{compression, tags};
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::ifd::IFD;
use crate::tiff::reader::TiffReader;
use crate::utils::logger::Logger;
use crate::utils::tag_utils;

/// Byte layout of a slide's label and macro sub-images
#[derive(Debug)]
pub struct SlideLayout {
    /// Path of the inspected slide
    pub path: String,
    /// Number of directories in the chain
    pub directory_count: usize,
    /// Absolute offset of the label directory (the splice position)
    pub label_dir_offset: u64,
    /// Absolute offset of the label's pixel strip
    pub label_strip_offset: u64,
    /// Length of the label's pixel strip
    pub label_strip_bytes: u64,
    /// Absolute offset of the macro's pixel strip
    pub macro_strip_offset: u64,
    /// Length of the macro's pixel strip
    pub macro_strip_bytes: u64,
    /// The macro directory's next-IFD pointer; must be 0 for an in-place
    /// splice to be safe
    pub macro_next_ifd_offset: u64,
    /// Parsed label directory, kept for the label extractor
    pub label_ifd: IFD,
}

impl SlideLayout {
    /// Reads the label's raw strip bytes
    ///
    /// Must be called before the strips are redacted.
    pub fn read_label_strip(&self) -> TiffResult<Vec<u8>> {
        let mut file = File::open(&self.path)?;
        file.seek(SeekFrom::Start(self.label_strip_offset))?;
        let mut strip = vec![0u8; self.label_strip_bytes as usize];
        file.read_exact(&mut strip)?;
        Ok(strip)
    }
}

/// Identifies the label and macro directories of an SVS slide
pub struct SlideInspector<'a> {
    logger: &'a Logger,
}

impl<'a> SlideInspector<'a> {
    pub fn new(logger: &'a Logger) -> Self {
        SlideInspector { logger }
    }

    /// Inspects a slide and returns its label/macro layout
    ///
    /// The file must be a little-endian BigTIFF with at least two
    /// directories; a missing strip tag on either of the final two
    /// directories fails with `LabelMacroNotFound`.
    pub fn inspect(&self, slide_path: &str) -> TiffResult<SlideLayout> {
        let mut reader = TiffReader::new(self.logger);
        let tiff = reader.load(slide_path)?;

        if !tiff.is_big_tiff {
            return Err(TiffError::UnsupportedFormat(
                "SVS slides are BigTIFF; classic TIFF input is not spliceable".to_string(),
            ));
        }
        if tiff.ifd_count() < 2 {
            return Err(TiffError::LabelMacroNotFound(format!(
                "slide has only {} directories",
                tiff.ifd_count()
            )));
        }

        let label_ifd = tiff.label_ifd().ok_or_else(|| {
            TiffError::LabelMacroNotFound("no label directory".to_string())
        })?;
        let macro_ifd = tiff.macro_ifd().ok_or_else(|| {
            TiffError::LabelMacroNotFound("no macro directory".to_string())
        })?;

        self.check_compression(label_ifd, "label", &[compression::LZW]);
        self.check_compression(
            macro_ifd,
            "macro",
            &[compression::JPEG_OLD, compression::JPEG],
        );

        let (label_strip_offset, label_strip_bytes) = strip_location(label_ifd)?;
        let (macro_strip_offset, macro_strip_bytes) = strip_location(macro_ifd)?;

        info!(
            "Slide layout: {} directories, label dir at {}, label strip {}+{}, macro strip {}+{}",
            tiff.ifd_count(),
            label_ifd.offset,
            label_strip_offset,
            label_strip_bytes,
            macro_strip_offset,
            macro_strip_bytes
        );

        Ok(SlideLayout {
            path: slide_path.to_string(),
            directory_count: tiff.ifd_count(),
            label_dir_offset: label_ifd.offset,
            label_strip_offset,
            label_strip_bytes,
            macro_strip_offset,
            macro_strip_bytes,
            macro_next_ifd_offset: macro_ifd.next_ifd_offset,
            label_ifd: label_ifd.clone(),
        })
    }

    /// Warns when a directory's compression differs from what Aperio
    /// scanners normally emit; never rejects the slide over it
    fn check_compression(&self, ifd: &IFD, role: &str, expected: &[u16]) {
        match ifd.get_tag_value(tags::COMPRESSION) {
            Some(code) if expected.contains(&(code as u16)) => {}
            Some(code) => warn!(
                "{} directory #{} has compression {} ({}); proceeding on position alone",
                role,
                ifd.number,
                code,
                tag_utils::get_compression_name(code)
            ),
            None => warn!(
                "{} directory #{} has no compression tag; proceeding on position alone",
                role, ifd.number
            ),
        }
    }
}

/// Reads a directory's single-strip location from tags 273 and 279
fn strip_location(ifd: &IFD) -> TiffResult<(u64, u64)> {
    let offset = ifd.require_entry(tags::STRIP_OFFSETS)?.value_offset;
    let bytes = ifd.require_entry(tags::STRIP_BYTE_COUNTS)?.value_offset;
    Ok((offset, bytes))
}
