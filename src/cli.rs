//! CLI interface for the talent matcher

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "talent-matcher")]
#[command(about = "Profile matching and skill gap analysis for candidates and positions")]
#[command(
    long_about = "Rank positions for a candidate (or candidates for a position) by profile similarity, analyze per-pair skill gaps, and run aggregate skill analytics over both record sets"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Candidate record set (overrides the configured path)
    #[arg(long, global = true)]
    pub candidates_file: Option<PathBuf>,

    /// Position record set (overrides the configured path)
    #[arg(long, global = true)]
    pub positions_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Recommend positions for a stored candidate
    Recommend {
        /// Candidate id
        #[arg(short, long)]
        candidate: u32,

        /// Number of matches to return
        #[arg(short = 'n', long)]
        top_n: Option<usize>,

        /// Keep only positions in this state
        #[arg(long)]
        state: Option<String>,

        /// Keep only positions in this city
        #[arg(long)]
        city: Option<String>,

        /// Output format: console, json
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Rank candidates for a stored position
    Candidates {
        /// Position id
        #[arg(short, long)]
        position: u32,

        /// Number of matches to return
        #[arg(short = 'n', long)]
        top_n: Option<usize>,

        /// Output format: console, json
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Skill gap between a candidate and a position
    Gap {
        /// Stored candidate id; omit to pass an ephemeral profile instead
        #[arg(short, long)]
        candidate: Option<u32>,

        /// Position id
        #[arg(short, long)]
        position: u32,

        /// Ephemeral profile: name
        #[arg(long)]
        name: Option<String>,

        /// Ephemeral profile: branch
        #[arg(long)]
        branch: Option<String>,

        /// Ephemeral profile: location preference
        #[arg(long)]
        location: Option<String>,

        /// Ephemeral profile: comma-separated skills
        #[arg(long)]
        skills: Option<String>,

        /// Output format: console, json
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Aggregate analytics over the whole corpus
    Analytics {
        #[command(subcommand)]
        action: AnalyticsAction,
    },

    /// Generate a demo candidate/position CSV pair
    DemoData {
        /// Number of candidates to generate
        #[arg(long, default_value_t = 101)]
        num_candidates: usize,

        /// Number of positions to generate
        #[arg(long, default_value_t = 41)]
        num_positions: usize,

        /// Directory to write the CSV files into
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        /// RNG seed
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum AnalyticsAction {
    /// Skill demand vs supply gap, ranked by shortfall
    DemandSupply {
        /// Number of entries to show
        #[arg(short = 'k', long)]
        top_k: Option<usize>,

        /// Output format: console, json
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Location-by-skill candidate counts
    Heatmap {
        /// Skill tokens to count (defaults to the configured list)
        #[arg(long)]
        skills: Vec<String>,

        /// Output format: console, json
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate an output format flag
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        other => Err(format!(
            "Unsupported output format '{}'. Supported formats: console, json",
            other
        )),
    }
}
