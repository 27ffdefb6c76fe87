//! Batch replacement command
//!
//! Drives the splicer over every slide named in a CSV sheet. Rows are
//! processed in order and the first failing slide aborts the run, since a
//! half-replaced batch is easier to resume than one with silent holes.

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::svs::splicer::Splicer;
use crate::tiff::errors::{TiffError, TiffResult};
use crate::utils::logger::Logger;
use crate::utils::progress::ProgressTracker;
use crate::utils::sheet_utils;

/// Default sheet column holding slide names or paths
const DEFAULT_HEADER: &str = "File Location";

/// Command for replacing labels/macros across a sheet of slides
pub struct BatchCommand<'a> {
    /// Path to the CSV sheet
    sheet_path: String,
    /// Directory the sheet's slide names resolve against, if any
    slide_dir: Option<String>,
    /// Sheet column holding the slide names
    header: String,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> BatchCommand<'a> {
    /// Create a new batch command from CLI arguments
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> TiffResult<Self> {
        let sheet_path = args
            .get_one::<String>("sheet")
            .ok_or_else(|| TiffError::InvalidParameter("missing sheet path".to_string()))?
            .clone();

        Ok(BatchCommand {
            sheet_path,
            slide_dir: args.get_one::<String>("slide-dir").cloned(),
            header: args
                .get_one::<String>("header")
                .cloned()
                .unwrap_or_else(|| DEFAULT_HEADER.to_string()),
            logger,
        })
    }
}

impl<'a> Command for BatchCommand<'a> {
    fn execute(&self) -> TiffResult<()> {
        info!("Batch replacing from sheet {}", self.sheet_path);

        let rows = sheet_utils::read_sheet(
            &self.sheet_path,
            &self.header,
            self.slide_dir.as_deref(),
        )?;
        info!("Sheet lists {} slides", rows.len());

        let progress = ProgressTracker::new(rows.len() as u64, "Replacing labels");
        let splicer = Splicer::new(self.logger);

        for row in &rows {
            let slide_path = row.slide_path.to_string_lossy();
            progress.set_message(&slide_path);

            splicer.replace(&slide_path, &row.params, true)?;
            self.logger.log(&format!("Replaced label and macro on {}", slide_path))?;

            progress.increment(1);
        }

        progress.finish();
        Ok(())
    }
}
