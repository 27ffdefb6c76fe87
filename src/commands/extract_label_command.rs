//! Label export command
//!
//! Saves a slide's label as a standalone classic TIFF. This has to happen
//! before `single`/`multiple` run against the slide, since those zero-fill
//! the original strip by default.

use std::fs;

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::svs::inspector::SlideInspector;
use crate::svs::label_extractor::LabelExtractor;
use crate::tiff::errors::{TiffError, TiffResult};
use crate::utils::logger::Logger;

/// Command for exporting a slide's label image
pub struct ExtractLabelCommand<'a> {
    /// Path to the slide to read
    slide_path: String,
    /// Path of the TIFF file to write
    output_path: String,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> ExtractLabelCommand<'a> {
    /// Create a new label export command from CLI arguments
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> TiffResult<Self> {
        let slide_path = args
            .get_one::<String>("slide")
            .ok_or_else(|| TiffError::InvalidParameter("missing slide path".to_string()))?
            .clone();
        let output_path = args
            .get_one::<String>("output")
            .ok_or_else(|| TiffError::InvalidParameter("missing output path".to_string()))?
            .clone();

        Ok(ExtractLabelCommand {
            slide_path,
            output_path,
            logger,
        })
    }
}

impl<'a> Command for ExtractLabelCommand<'a> {
    fn execute(&self) -> TiffResult<()> {
        info!("Extracting label from {} to {}", self.slide_path, self.output_path);

        let layout = SlideInspector::new(self.logger).inspect(&self.slide_path)?;
        let tiff = LabelExtractor::extract(&layout)?;
        fs::write(&self.output_path, &tiff)?;

        info!("Wrote {} bytes to {}", tiff.len(), self.output_path);
        self.logger
            .log(&format!("Extracted label to {}", self.output_path))?;
        Ok(())
    }
}
