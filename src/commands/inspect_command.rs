//! Slide structure inspection command
//!
//! Prints the directory chain of a slide: every tag with its decoded value
//! where available, each directory's offset, and the next-IFD pointers.
//! Useful for confirming which directories the replacement pipeline will
//! treat as label and macro before running a destructive operation.

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::tiff::constants::tags;
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::ifd::IFD;
use crate::tiff::value::TagValue;
use crate::tiff::TiffReader;
use crate::utils::logger::Logger;
use crate::utils::string_utils;
use crate::utils::tag_utils;

/// Command for printing slide directory structure
pub struct InspectCommand<'a> {
    /// Path to the input slide
    input_file: String,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> InspectCommand<'a> {
    /// Create a new inspect command from CLI arguments
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> TiffResult<Self> {
        let input_file = args
            .get_one::<String>("slide")
            .ok_or_else(|| TiffError::InvalidParameter("missing slide path".to_string()))?
            .clone();

        Ok(InspectCommand { input_file, logger })
    }

    fn display_ifd(&self, ifd: &IFD, total: usize) {
        let role = if total < 2 {
            ""
        } else if ifd.number + 2 == total {
            " [label]"
        } else if ifd.number + 1 == total {
            " [macro]"
        } else {
            ""
        };
        info!("\nDirectory #{}{} (offset: {})", ifd.number, role, ifd.offset);

        if let Some((width, height)) = ifd.get_dimensions() {
            info!("  Dimensions: {}x{}", width, height);
        }
        if let Some(code) = ifd.get_tag_value(tags::COMPRESSION) {
            info!("  Compression: {} ({})", code, tag_utils::get_compression_name(code));
        }

        for entry in &ifd.entries {
            info!("    {}", entry.description());
            match &entry.value {
                TagValue::Ascii(bytes) => {
                    info!("      Value: \"{}\"", string_utils::display_ascii(bytes))
                }
                TagValue::Unsigned(values) if values.len() > 1 => {
                    info!("      Value: {:?}", values)
                }
                TagValue::TooLong => info!("      Value: too long to display"),
                _ => {}
            }
        }

        info!("  Next directory offset: {}", ifd.next_ifd_offset);
    }
}

impl<'a> Command for InspectCommand<'a> {
    fn execute(&self) -> TiffResult<()> {
        info!("Inspecting slide: {}", self.input_file);

        let mut reader = TiffReader::new(self.logger);
        let tiff = reader.load(&self.input_file)?;

        info!("Format: {}", if tiff.is_big_tiff { "BigTIFF" } else { "TIFF" });
        info!("Number of directories: {}", tiff.ifd_count());

        let total = tiff.ifd_count();
        for ifd in &tiff.ifds {
            self.display_ifd(ifd, total);
        }

        self.logger.log("Inspection completed successfully")?;
        Ok(())
    }
}
