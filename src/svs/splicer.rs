//! Label/macro replacement orchestration
//!
//! Ties the pipeline together: inspect the slide, optionally redact the
//! original strips, build replacement sub-images, rebase their offsets to
//! the splice positions, and write them into the slide in place.
//!
//! The splice is not transactional. Once the redactor has run, killing the
//! process mid-write leaves the label and macro directories unrecoverable;
//! the tissue pyramid ahead of them is never touched either way.

use std::fs::OpenOptions;
use std::io::{Seek, SeekFrom, Write};

use log::{info, warn};

use crate::svs::inspector::{SlideInspector, SlideLayout};
use crate::svs::pixels::{self, LabelParams};
use crate::svs::redactor::Redactor;
use crate::svs::relocator::OffsetRelocator;
use crate::svs::sub_image::{SubImageBuilder, SubImageKind};
use crate::tiff::constants::header;
use crate::tiff::errors::{TiffError, TiffResult};
use crate::utils::logger::Logger;

/// Replaces a slide's label and macro sub-images in place
pub struct Splicer<'a> {
    logger: &'a Logger,
}

impl<'a> Splicer<'a> {
    pub fn new(logger: &'a Logger) -> Self {
        Splicer { logger }
    }

    /// Performs the full replacement on `slide_path`
    ///
    /// With `redact_originals` set, the original strips are zero-filled
    /// before the splice so no identifying pixels survive elsewhere in the
    /// file. The slide may grow past its original end when the replacement
    /// payloads are larger than the space the originals occupied.
    pub fn replace(
        &self,
        slide_path: &str,
        params: &LabelParams,
        redact_originals: bool,
    ) -> TiffResult<()> {
        let layout = SlideInspector::new(self.logger).inspect(slide_path)?;

        // An in-place splice writes past the label directory's original
        // extent, which is only safe when nothing follows the macro.
        if layout.macro_next_ifd_offset != 0 {
            return Err(TiffError::UnsupportedFormat(format!(
                "macro directory is not terminal (next IFD at {})",
                layout.macro_next_ifd_offset
            )));
        }

        if redact_originals {
            Redactor::zero_fill(&layout)?;
        } else {
            warn!("Original label and macro strips are left in place");
        }

        let label_buffer = self.build_label(params)?;
        let macro_buffer = self.build_macro()?;

        let label_target = layout.label_dir_offset;
        let spliced_len = (label_buffer.len() + macro_buffer.len()) as u64
            - 2 * header::BIGTIFF_HEADER_LEN;
        let file_len = std::fs::metadata(slide_path)?.len();
        let slide_end = file_len.max(label_target + spliced_len);

        let relocator = OffsetRelocator::new(self.logger);
        let label = relocator.relocate(
            label_buffer,
            label_target,
            SubImageKind::Label,
            slide_end,
        )?;
        let macro_target = label.next_ifd_offset.ok_or_else(|| {
            TiffError::InvalidParameter("label relocation produced no next-IFD offset".to_string())
        })?;
        let macro_ = relocator.relocate(
            macro_buffer,
            macro_target,
            SubImageKind::Macro,
            slide_end,
        )?;

        self.write_sub_images(slide_path, label_target, &label.buffer, macro_target, &macro_.buffer)?;

        info!(
            "Replaced label at {} and macro at {} in {}",
            label_target, macro_target, slide_path
        );
        Ok(())
    }

    /// Inspects without modifying; exposed for the preview/export path
    pub fn inspect(&self, slide_path: &str) -> TiffResult<SlideLayout> {
        SlideInspector::new(self.logger).inspect(slide_path)
    }

    fn build_label(&self, params: &LabelParams) -> TiffResult<Vec<u8>> {
        let pixels = pixels::label_pixels(params);
        let description = format!(
            "Aperio Leica Biosystems - label {}x{}",
            pixels.width, pixels.height
        );
        SubImageBuilder::new(SubImageKind::Label, pixels, Some(description))?.build()
    }

    fn build_macro(&self) -> TiffResult<Vec<u8>> {
        let pixels = pixels::macro_pixels();
        let description = format!(
            "Aperio Leica Biosystems - macro {}x{}",
            pixels.width, pixels.height
        );
        SubImageBuilder::new(SubImageKind::Macro, pixels, Some(description))?.build()
    }

    /// Writes both relocated buffers into the slide, skipping their
    /// 16-byte BigTIFF headers (the slide already has one)
    ///
    /// With the `target - 16` rebasing convention the two writes are
    /// contiguous: the macro directory begins exactly where the spliced
    /// label payload ends.
    fn write_sub_images(
        &self,
        slide_path: &str,
        label_target: u64,
        label_buffer: &[u8],
        macro_target: u64,
        macro_buffer: &[u8],
    ) -> TiffResult<()> {
        let header_len = header::BIGTIFF_HEADER_LEN as usize;
        let mut slide = OpenOptions::new().read(true).write(true).open(slide_path)?;

        slide.seek(SeekFrom::Start(label_target))?;
        slide.write_all(&label_buffer[header_len..])?;

        slide.seek(SeekFrom::Start(macro_target))?;
        slide.write_all(&macro_buffer[header_len..])?;

        slide.flush()?;
        Ok(())
    }
}
