use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "scoredoc",
    version,
    about = "Deterministic clinical score calculation from structured findings"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Calculate scores and print a report
    Evaluate(EvaluateCommand),
    /// Rank the score systems that apply to the findings
    Recommend(RecommendCommand),
    /// Print the normalized findings as JSON
    Normalize(NormalizeCommand),
    /// Evaluate every *.json findings file under a directory
    Batch(BatchCommand),
    /// List the supported score systems
    Systems,
}

#[derive(Args)]
pub struct EvaluateCommand {
    /// Findings JSON file, or `-` for stdin
    pub input: PathBuf,
    /// Score to calculate (has-bled, wells-dvt, wells-pe, sofa, cha2ds2-vasc, curb-65, gcs, all)
    #[arg(long)]
    pub score: Option<String>,
    #[arg(long)]
    pub locale: Option<String>,
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,
}

#[derive(Args)]
pub struct RecommendCommand {
    pub input: PathBuf,
    #[arg(long)]
    pub locale: Option<String>,
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,
}

#[derive(Args)]
pub struct NormalizeCommand {
    pub input: PathBuf,
}

#[derive(Args)]
pub struct BatchCommand {
    pub dir: PathBuf,
    #[arg(long)]
    pub score: Option<String>,
    #[arg(long)]
    pub locale: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}
