//! CLI command implementations
//!
//! This module contains implementations of various commands
//! supported by the CLI application using the Command pattern.

pub mod command_traits;
pub mod inspect_command;
pub mod single_command;
pub mod batch_command;
pub mod extract_label_command;

pub use command_traits::{Command, CommandFactory};
pub use inspect_command::InspectCommand;
pub use single_command::SingleCommand;
pub use batch_command::BatchCommand;
pub use extract_label_command::ExtractLabelCommand;

use clap::ArgMatches;

use crate::tiff::errors::{TiffError, TiffResult};
use crate::utils::logger::Logger;

/// Factory for creating command instances based on CLI arguments
///
/// This factory examines the parsed subcommand and creates
/// the appropriate command instance for execution.
pub struct SlideKitCommandFactory;

impl SlideKitCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        SlideKitCommandFactory
    }
}

impl Default for SlideKitCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CommandFactory<'a> for SlideKitCommandFactory {
    fn create_command(
        &self,
        args: &ArgMatches,
        logger: &'a Logger,
    ) -> TiffResult<Box<dyn Command + 'a>> {
        match args.subcommand() {
            Some(("single", sub_args)) => Ok(Box::new(SingleCommand::new(sub_args, logger)?)),
            Some(("multiple", sub_args)) => Ok(Box::new(BatchCommand::new(sub_args, logger)?)),
            Some(("inspect", sub_args)) => Ok(Box::new(InspectCommand::new(sub_args, logger)?)),
            Some(("extract-label", sub_args)) => {
                Ok(Box::new(ExtractLabelCommand::new(sub_args, logger)?))
            }
            _ => Err(TiffError::InvalidParameter(
                "no subcommand given; see --help".to_string(),
            )),
        }
    }
}
