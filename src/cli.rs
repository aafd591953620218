//! Command-line interface implementation for mold.
//! Provides argument parsing and subcommand definitions using clap.

use crate::constants::TEMPLATES_DIR;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments structure for mold.
#[derive(Parser, Debug)]
#[command(author, version, about = "mold: project scaffolding from template directories", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// mold subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Applies a template directory to generate a project using a data file.
    ///
    /// Files ending in '.tmpl' are rendered by filling in placeholders from
    /// the data file and written without the suffix; all other files are
    /// copied as-is.
    Apply {
        /// Path to the template directory
        #[arg(value_name = "TEMPLATE")]
        template: PathBuf,

        /// Path to a JSON or YAML file with placeholder data (required)
        #[arg(short, long, value_name = "FILE")]
        data_file: Option<PathBuf>,

        /// Output directory for the new project
        #[arg(short, long, value_name = "OUTPUT_DIR", default_value = ".")]
        output: PathBuf,
    },

    /// Lists the placeholders a template tree requires, before any data is
    /// supplied
    Placeholders {
        /// Path to the template directory
        #[arg(value_name = "TEMPLATE")]
        template: PathBuf,
    },

    /// Lists all available template sets
    List {
        /// Directory holding template sets
        #[arg(long, value_name = "DIR", default_value = TEMPLATES_DIR)]
        dir: PathBuf,
    },

    /// Initializes a directory to store templates
    Init {
        /// Directory to create
        #[arg(long, value_name = "DIR", default_value = TEMPLATES_DIR)]
        dir: PathBuf,
    },
}

/// Parses command line arguments and returns the Args structure.
pub fn get_args() -> Args {
    Args::parse()
}
