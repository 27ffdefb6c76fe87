use clap::{Arg, ArgAction, Command as ClapCommand};
use log::error;
use std::process;

// Import from your library
use slidekit::commands::{CommandFactory, SlideKitCommandFactory};
use slidekit::utils::logger::Logger;

fn main() {
    let matches = ClapCommand::new("SlideKit")
        .version("0.1")
        .about("Replace the label and macro images in Aperio SVS slides")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            ClapCommand::new("single")
                .about("Replace the label and macro on a single slide")
                .arg(
                    Arg::new("slide")
                        .help("Path to the SVS slide (modified in place)")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("qr")
                        .long("qr")
                        .help("QR code text for the replacement label")
                        .value_name("TEXT"),
                )
                .arg(
                    Arg::new("line1")
                        .long("line1")
                        .help("Line 1 text on the replacement label")
                        .value_name("TEXT"),
                )
                .arg(
                    Arg::new("line2")
                        .long("line2")
                        .help("Line 2 text on the replacement label")
                        .value_name("TEXT"),
                )
                .arg(
                    Arg::new("line3")
                        .long("line3")
                        .help("Line 3 text on the replacement label")
                        .value_name("TEXT"),
                )
                .arg(
                    Arg::new("line4")
                        .long("line4")
                        .help("Line 4 text on the replacement label")
                        .value_name("TEXT"),
                )
                .arg(
                    Arg::new("keep-originals")
                        .long("keep-originals")
                        .help("Skip zero-filling the original label and macro strips")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            ClapCommand::new("multiple")
                .about("Replace labels and macros on every slide listed in a CSV sheet")
                .arg(
                    Arg::new("sheet")
                        .help("Path to the CSV sheet")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("slide-dir")
                        .long("slide-dir")
                        .help("Directory to resolve the sheet's slide names against")
                        .value_name("DIR"),
                )
                .arg(
                    Arg::new("header")
                        .long("header")
                        .help("Sheet column holding the slide names or paths")
                        .value_name("NAME")
                        .default_value("File Location"),
                ),
        )
        .subcommand(
            ClapCommand::new("inspect")
                .about("Print the directory structure of a slide")
                .arg(
                    Arg::new("slide")
                        .help("Path to the SVS slide")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            ClapCommand::new("extract-label")
                .about("Save the slide's label as a standalone TIFF (run before replacing)")
                .arg(
                    Arg::new("slide")
                        .help("Path to the SVS slide")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help("Output TIFF file")
                        .value_name("FILE")
                        .required(true),
                ),
        )
        .get_matches();

    let logger = match Logger::new("slidekit.log") {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Error initializing logger: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = Logger::init_global_logger("slidekit-global.log") {
        eprintln!("Error setting up global logger: {}", e);
        process::exit(1);
    }

    let factory = SlideKitCommandFactory::new();

    match factory.create_command(&matches, &logger) {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}
