use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "hb-docgen",
    version,
    about = "Turns HyperBEAM analysis markdown into JSON data for the documentation site",
    after_help = "Settings are read from docgen.toml in the project root. Results are printed \
                  to stdout as JSON; logs go to stderr (RUST_LOG is honoured)."
)]
pub struct Cli {
    /// Project root that relative paths and docgen.toml resolve against
    #[arg(long, global = true, default_value = ".")]
    pub root: String,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Parse device analyses into per-device, aggregate and category JSON.
    ///
    /// Recurses through the source directory, keeping files that end with the
    /// configured suffix and skipping names containing the exclusion substring.
    /// Files whose title cannot be resolved are skipped with a warning.
    Devices {
        /// Analysis source directory (default: [source] dir from docgen.toml)
        #[arg(short, long)]
        source: Option<String>,
        /// Output directory (default: [output] dir from docgen.toml)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Parse the function reference into per-subsystem and per-module JSON
    Functions {
        /// Function reference file (default: [reference] file from docgen.toml)
        #[arg(short, long)]
        input: Option<String>,
        /// Output directory (function data goes to <output>/functions)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Run both the device and function reference pipelines
    Build {
        /// Output directory
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Parse a single analysis file and print the resulting document
    Inspect {
        /// Markdown file to parse
        path: String,
    },

    /// Parse a function reference file and print its modules
    InspectReference {
        /// Function reference file
        path: String,
        /// Only print this module
        #[arg(short, long)]
        module: Option<String>,
    },
}
