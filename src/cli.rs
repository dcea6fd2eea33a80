//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Docspace reference-resolution inspector
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Enable verbose diagnostics
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file path (default: docspace.toml)
    #[arg(short = 'C', long, default_value = "docspace.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Resolve an entry-point reference to its canonical URL
    #[command(visible_alias = "r")]
    Resolve {
        /// Reference as typed at the tool boundary
        reference: String,
    },

    /// Resolve a reference found inside a document
    #[command(visible_alias = "h")]
    Href {
        /// The in-document reference text (href/import)
        reference: String,

        /// Entry-point reference of the containing document
        #[arg(short, long)]
        base: String,
    },

    /// Compute the link text from one document to another
    Relative {
        /// Entry-point reference of the linking document
        from: String,
        /// Entry-point reference of the target document
        to: String,
    },
}
