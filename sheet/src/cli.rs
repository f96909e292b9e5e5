use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use sheet::Format;
use worksheet_core::Design;

#[derive(Parser)]
#[command(name = "sheet")]
#[command(author, version, about = "Render the days-of-the-week worksheets to SVG, PNG or PDF")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase output verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the designs and their page counts
    List,

    /// Print page content and pad rectangles as JSON
    Content {
        /// pawprint, panda or fox
        design: Design,

        /// Only this page (1-based)
        #[arg(long)]
        page: Option<u32>,
    },

    /// Render one design to a file
    Render {
        design: Design,

        /// Only this page (1-based); all pages otherwise
        #[arg(long)]
        page: Option<u32>,

        /// Output file; its extension picks the format unless --format is set
        #[arg(short, long)]
        output: PathBuf,

        #[arg(long, value_enum)]
        format: Option<Format>,

        /// Recorded pad ink (JSON) to lay over the drawing pads
        #[arg(long)]
        ink: Option<PathBuf>,

        /// Raster resolution, overrides the config
        #[arg(long)]
        px_per_mm: Option<f64>,
    },

    /// Render every design into a directory
    Export {
        #[arg(short, long, default_value = "export")]
        out_dir: PathBuf,

        #[arg(long, value_enum)]
        format: Option<Format>,

        #[arg(long)]
        px_per_mm: Option<f64>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the config file location
    Path,
    /// Print the effective configuration as TOML
    Show,
}
