//! CLI Module
//!
//! Command-line interface for replaying editor actions against a story
//! document and inspecting its snap targets and settings.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Story Editor - animation order, page and snap guide tooling
#[derive(Parser, Debug)]
#[command(name = "story-cli")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a list of store actions against a document
    #[command(name = "replay")]
    Replay {
        /// Story document (JSON)
        #[arg(short, long)]
        document: PathBuf,

        /// Actions to dispatch (JSON array)
        #[arg(short, long)]
        actions: PathBuf,

        /// Write the updated document back to its file
        #[arg(long)]
        save: bool,
    },

    /// Print snap targets for a block
    #[command(name = "snaps")]
    Snaps {
        /// Story document (JSON)
        #[arg(short, long)]
        document: PathBuf,

        /// Block being dragged
        #[arg(short, long)]
        block: String,

        /// Current page (defaults to the block's page)
        #[arg(short, long)]
        page: Option<String>,
    },

    /// Show or update the story settings
    #[command(name = "settings")]
    Settings {
        /// Story document (JSON)
        #[arg(short, long)]
        document: PathBuf,

        /// New "advance to next page" option
        #[arg(long)]
        set_option: Option<String>,

        /// New auto-advance duration in seconds
        #[arg(long)]
        set_duration: Option<i64>,
    },
}
