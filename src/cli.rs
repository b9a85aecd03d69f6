use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "rubric",
    version,
    about = "Course rubric file writer and grade validator"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a new rubric for a project, optionally seeded with recorded grades
    Create(CreateCommand),
    /// Validate a rubric file, or every rubric file under a directory
    Check(CheckCommand),
    /// Print a summary of a rubric
    Show(ShowCommand),
    /// Rewrite a rubric in canonical form
    Format(FormatCommand),
    /// Inspect or edit a project definition
    #[command(subcommand)]
    Project(ProjectCommands),
}

#[derive(Subcommand)]
pub enum ProjectCommands {
    Show(ProjectShowCommand),
    AddComponent(AddComponentCommand),
}

#[derive(Args)]
pub struct CreateCommand {
    #[arg(long)]
    pub project: PathBuf,
    /// TOML file with previously recorded grades
    #[arg(long)]
    pub grades: Option<PathBuf>,
    /// Penalty as DESCRIPTION=POINTS, e.g. "Late submission=-5"
    #[arg(long = "penalty", value_name = "DESCRIPTION=POINTS")]
    pub penalties: Vec<String>,
    #[arg(long)]
    pub comment: Option<String>,
    #[arg(long)]
    pub blank_comments: bool,
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct CheckCommand {
    pub path: PathBuf,
    #[arg(long)]
    pub project: PathBuf,
}

#[derive(Args)]
pub struct ShowCommand {
    pub path: PathBuf,
    #[arg(long)]
    pub project: PathBuf,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct FormatCommand {
    pub path: PathBuf,
    #[arg(long)]
    pub project: PathBuf,
    #[arg(long)]
    pub blank_comments: bool,
}

#[derive(Args)]
pub struct ProjectShowCommand {
    pub project: PathBuf,
    /// Show the deadline in UTC as well as local time
    #[arg(long)]
    pub utc: bool,
}

#[derive(Args)]
pub struct AddComponentCommand {
    pub project: PathBuf,
    pub name: String,
    #[arg(allow_negative_numbers = true)]
    pub points: f64,
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}
