//! Library facade
//!
//! Programmatic entry point for embedding the de-identification pipeline,
//! e.g. from a GUI that previews the label before committing a replace.

use std::fs;

use crate::svs::inspector::SlideInspector;
use crate::svs::label_extractor::LabelExtractor;
use crate::svs::pixels::LabelParams;
use crate::svs::redactor::Redactor;
use crate::svs::splicer::Splicer;
use crate::tiff::errors::TiffResult;
use crate::tiff::TiffReader;
use crate::utils::logger::Logger;

/// Main interface to the SlideKit library
pub struct SlideKit {
    logger: Logger,
}

impl SlideKit {
    /// Create a new SlideKit instance
    ///
    /// # Arguments
    /// * `log_file` - Optional path to log file, defaults to "slidekit.log"
    pub fn new(log_file: Option<&str>) -> TiffResult<Self> {
        let log_path = log_file.unwrap_or("slidekit.log");
        let logger = Logger::new(log_path)?;
        Ok(SlideKit { logger })
    }

    /// Analyze a slide and return a summary of its directory structure
    pub fn analyze(&self, slide_path: &str) -> TiffResult<String> {
        let mut reader = TiffReader::new(&self.logger);
        let tiff = reader.load(slide_path)?;
        Ok(format!("{}", tiff))
    }

    /// Export the slide's label as a standalone classic TIFF file
    ///
    /// Must be called before `redact` or `replace`.
    pub fn save_label(&self, slide_path: &str, output_path: &str) -> TiffResult<()> {
        let layout = SlideInspector::new(&self.logger).inspect(slide_path)?;
        let tiff = LabelExtractor::extract(&layout)?;
        fs::write(output_path, tiff)?;
        Ok(())
    }

    /// Export the slide's label as an in-memory classic TIFF buffer
    pub fn label_tiff(&self, slide_path: &str) -> TiffResult<Vec<u8>> {
        let layout = SlideInspector::new(&self.logger).inspect(slide_path)?;
        LabelExtractor::extract(&layout)
    }

    /// Zero-fill the slide's label and macro strips without replacing them
    pub fn redact(&self, slide_path: &str) -> TiffResult<()> {
        let layout = SlideInspector::new(&self.logger).inspect(slide_path)?;
        Redactor::zero_fill(&layout)
    }

    /// Replace the slide's label and macro in place
    pub fn replace(
        &self,
        slide_path: &str,
        params: &LabelParams,
        redact_originals: bool,
    ) -> TiffResult<()> {
        Splicer::new(&self.logger).replace(slide_path, params, redact_originals)
    }
}
