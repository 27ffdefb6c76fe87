//! Strip redaction
//!
//! Zero-fills the label and macro pixel strips in place. This runs before
//! the splice, which replaces the directories but not the original strips,
//! so the patient-identifying pixels must be destroyed here.

use std::fs::OpenOptions;
use std::io::{Seek, SeekFrom, Write};

use log::info;

use crate::svs::inspector::SlideLayout;
use crate::tiff::errors::TiffResult;

/// Zero-fills the original label and macro strips
pub struct Redactor;

impl Redactor {
    /// Overwrites both strips with zero bytes
    pub fn zero_fill(layout: &SlideLayout) -> TiffResult<()> {
        info!(
            "Redacting original strips: label {}+{}, macro {}+{}",
            layout.label_strip_offset,
            layout.label_strip_bytes,
            layout.macro_strip_offset,
            layout.macro_strip_bytes
        );

        let mut slide = OpenOptions::new().read(true).write(true).open(&layout.path)?;

        slide.seek(SeekFrom::Start(layout.label_strip_offset))?;
        slide.write_all(&vec![0u8; layout.label_strip_bytes as usize])?;

        slide.seek(SeekFrom::Start(layout.macro_strip_offset))?;
        slide.write_all(&vec![0u8; layout.macro_strip_bytes as usize])?;

        Ok(())
    }
}
