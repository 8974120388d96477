//! CLI definitions for AutoFrame.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// AutoFrame CLI.
#[derive(Parser)]
#[command(name = "autoframe")]
#[command(about = "Resize banner frames through a layout-prediction service")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Export every top-level node of a document as JSON
    Export {
        /// Document JSON file
        #[arg(short, long)]
        document: PathBuf,

        /// Write the export here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the document back (with classified names) to this path
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Predict and apply a layout for the selected frames
    Resize {
        /// Document JSON file
        #[arg(short, long)]
        document: PathBuf,

        /// Desired frame width
        #[arg(long)]
        width: f64,

        /// Desired frame height
        #[arg(long)]
        height: f64,

        /// Frame ids to process instead of the document's selection
        #[arg(long = "frame")]
        frames: Vec<String>,

        /// Override the prediction endpoint
        #[arg(long, env = "AUTOFRAME_ENDPOINT")]
        endpoint: Option<String>,

        /// Write the resulting document to this path
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Speak the panel protocol: JSON lines on stdin, replies on stdout
    Panel {
        /// Document JSON file
        #[arg(short, long)]
        document: PathBuf,

        /// Override the prediction endpoint
        #[arg(long, env = "AUTOFRAME_ENDPOINT")]
        endpoint: Option<String>,

        /// Write the document to this path when input ends
        #[arg(long)]
        save: Option<PathBuf>,
    },
}
