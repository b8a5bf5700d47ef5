//! CLI interface for the resume analyzer

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

pub const RESUME_EXTENSIONS: &[&str] = &["pdf", "txt", "md"];
pub const JOB_EXTENSIONS: &[&str] = &["txt", "md"];

#[derive(Parser)]
#[command(name = "resume-analyzer")]
#[command(about = "Resume skill and section coverage analyzer")]
#[command(long_about = "Scan resumes for catalog skills and standard sections, optionally compare them \
against a job description, and score the result")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a single resume
    Analyze {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        file: PathBuf,

        /// Path to job description file (TXT, MD)
        #[arg(short, long)]
        job: Option<PathBuf>,

        /// Skill catalog file, one term per line
        #[arg(short, long)]
        skills: Option<PathBuf>,

        /// Prefix for the saved JSON and CSV files
        #[arg(long)]
        out: Option<String>,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Show ratios and the per-section breakdown
        #[arg(short, long)]
        detailed: bool,

        /// Do not write result files
        #[arg(long)]
        no_save: bool,
    },

    /// Analyze several resumes and compare them
    Batch {
        /// Resume files (PDF, TXT, MD)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Path to job description file (TXT, MD)
        #[arg(short, long)]
        job: Option<PathBuf>,

        /// Skill catalog file, one term per line
        #[arg(short, long)]
        skills: Option<PathBuf>,

        /// Prefix for the saved comparison CSV
        #[arg(long)]
        out: Option<String>,

        /// Do not write result files
        #[arg(long)]
        no_save: bool,
    },

    /// List the active skill catalog
    Skills {
        /// Skill catalog file, one term per line
        #[arg(short, long)]
        skills: Option<PathBuf>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown", format)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_analyze_command() {
        let cli = Cli::parse_from([
            "resume-analyzer",
            "analyze",
            "--file",
            "cv.pdf",
            "--job",
            "jd.txt",
            "--out",
            "run1",
            "--no-save",
        ]);

        match cli.command {
            Commands::Analyze {
                file,
                job,
                out,
                no_save,
                ..
            } => {
                assert_eq!(file, PathBuf::from("cv.pdf"));
                assert_eq!(job, Some(PathBuf::from("jd.txt")));
                assert_eq!(out.as_deref(), Some("run1"));
                assert!(no_save);
            }
            _ => panic!("expected analyze command"),
        }
    }

    #[test]
    fn test_batch_requires_files() {
        assert!(Cli::try_parse_from(["resume-analyzer", "batch"]).is_err());
        assert!(Cli::try_parse_from(["resume-analyzer", "batch", "a.pdf", "b.txt"]).is_ok());
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(parse_output_format("md").unwrap(), OutputFormat::Markdown);
        assert!(parse_output_format("html").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(Path::new("cv.PDF"), RESUME_EXTENSIONS).is_ok());
        assert!(validate_file_extension(Path::new("jd.pdf"), JOB_EXTENSIONS).is_err());
        assert!(validate_file_extension(Path::new("README"), RESUME_EXTENSIONS).is_err());
    }
}
