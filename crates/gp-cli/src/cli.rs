use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "glampress")]
#[command(author, version, about = "Motif-based chat transcript compressor", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a TOML config file
    #[arg(long, global = true, env = "GLAMPRESS_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compress an exported chat transcript
    Encode {
        /// Transcript text file
        input: PathBuf,

        /// Directory for the artifact (default: next to the input)
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Use plain mode when distinct motifs exceed this fraction of messages
        #[arg(long)]
        threshold: Option<f64>,
    },

    /// Restore a transcript from an artifact
    Decode {
        /// Compressed artifact
        artifact: PathBuf,
    },

    /// Show how a transcript would be encoded, without writing anything
    Inspect {
        /// Transcript text file
        input: PathBuf,

        #[arg(long)]
        threshold: Option<f64>,
    },
}
