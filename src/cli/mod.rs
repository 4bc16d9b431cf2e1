//! CLI Module
//!
//! Command-line driver for scripted Lumnia console sessions.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::state::SEED_VOCAL_ID;

/// Lumnia Studio - AI mixing console simulator
#[derive(Parser, Debug)]
#[command(name = "lumnia")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JSON settings file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the seeded project as JSON
    #[command(name = "state")]
    State,

    /// List effect kinds with their defaults and parameter ranges
    #[command(name = "effects")]
    Effects,

    /// Upload a file name to a track and run the AI analysis
    #[command(name = "analyze")]
    Analyze {
        /// Track to analyze
        #[arg(short, long, default_value = SEED_VOCAL_ID)]
        track: String,

        /// File name to attach (content is never read)
        #[arg(short, long, default_value = "vocal_take.wav")]
        file: String,

        /// Pace the run with the wall clock
        #[arg(long)]
        realtime: bool,
    },

    /// Run a scripted session and print the resulting project
    #[command(name = "session")]
    Session {
        /// Number of vocal tracks to add
        #[arg(long, default_value_t = 0)]
        add_tracks: usize,

        /// Track to select at the end
        #[arg(long)]
        select: Option<String>,

        /// Enable the mastering flag
        #[arg(long)]
        mastering: bool,

        /// Analyze every vocal track after adding
        #[arg(long)]
        analyze_all: bool,
    },

    /// Run the export placeholder
    #[command(name = "export")]
    Export {
        /// Pace the run with the wall clock
        #[arg(long)]
        realtime: bool,
    },
}
