pub mod report;

use clap::{ArgGroup, Parser, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments for cobbmap
#[derive(Parser, Debug)]
#[command(name = "cobbmap")]
#[command(about = "Map a Cobb angle annotation event to a measurement and its report")]
#[command(version)]
#[command(group(ArgGroup::new("source").required(true).args(["catalog", "dicom_dir"])))]
pub struct Cli {
    /// Path to the annotation event (JSON)
    #[arg(value_name = "EVENT")]
    pub event: PathBuf,

    /// Image catalog as a JSON array of display sets
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Directory of DICOM files to build the image catalog from
    #[arg(long, value_name = "DIR")]
    pub dicom_dir: Option<PathBuf>,

    /// Mapping configuration (JSON)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Annotation UIDs to report as locked
    #[arg(long, value_name = "UID")]
    pub locked: Vec<String>,

    /// Annotation UIDs to report as hidden
    #[arg(long, value_name = "UID")]
    pub hidden: Vec<String>,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output format options
#[derive(Debug, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format
    Text,
    /// JSON format (measurement and report)
    Json,
    /// CSV report
    Csv,
}
