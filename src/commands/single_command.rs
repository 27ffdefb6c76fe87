//! Single-slide replacement command
//!
//! Replaces the label and macro on one slide. The operation is in place:
//! the slide file is modified directly and the original sub-images are
//! zero-filled unless the caller asks to keep them.

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::svs::pixels::LabelParams;
use crate::svs::splicer::Splicer;
use crate::tiff::errors::{TiffError, TiffResult};
use crate::utils::logger::Logger;

/// Command for replacing the label/macro on a single slide
pub struct SingleCommand<'a> {
    /// Path to the slide to modify
    slide_path: String,
    /// Label contents for the replacement
    params: LabelParams,
    /// Whether to zero-fill the original strips first
    redact_originals: bool,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> SingleCommand<'a> {
    /// Create a new single-slide command from CLI arguments
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> TiffResult<Self> {
        let slide_path = args
            .get_one::<String>("slide")
            .ok_or_else(|| TiffError::InvalidParameter("missing slide path".to_string()))?
            .clone();

        let line = |name: &str| args.get_one::<String>(name).cloned();
        let params = LabelParams::new(
            line("qr"),
            [line("line1"), line("line2"), line("line3"), line("line4")],
        );

        Ok(SingleCommand {
            slide_path,
            params,
            redact_originals: !args.get_flag("keep-originals"),
            logger,
        })
    }
}

impl<'a> Command for SingleCommand<'a> {
    fn execute(&self) -> TiffResult<()> {
        info!("Replacing label and macro on {}", self.slide_path);

        Splicer::new(self.logger).replace(&self.slide_path, &self.params, self.redact_originals)?;

        self.logger
            .log(&format!("Replaced label and macro on {}", self.slide_path))?;
        Ok(())
    }
}
