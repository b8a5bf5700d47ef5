//! Configuration management for the resume analyzer

use crate::error::{Result, ResumeAnalyzerError};
use crate::processing::scoring::ScoringWeights;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Number of source characters kept in a report preview.
pub const DEFAULT_PREVIEW_CHARS: usize = 2000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub analysis: AnalysisConfig,
    pub scoring: ScoringWeights,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub preview_chars: usize,
    /// Custom skill catalog, one term per line. The built-in catalog is used when unset.
    pub skills_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
    pub out_prefix: String,
    pub save_files: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            analysis: AnalysisConfig {
                preview_chars: DEFAULT_PREVIEW_CHARS,
                skills_file: None,
            },
            scoring: ScoringWeights::default(),
            output: OutputConfig {
                format: OutputFormat::Console,
                color_output: true,
                out_prefix: "resume_analysis".to_string(),
                save_files: true,
            },
        }
    }
}

impl Config {
    /// Load from `config_path`, writing defaults there on first use.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| ResumeAnalyzerError::Configuration(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ResumeAnalyzerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-analyzer")
            .join("config.toml")
    }

    fn validate(&self) -> Result<()> {
        let weights = &self.scoring;
        for weight in [weights.skills_weight, weights.sections_weight] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ResumeAnalyzerError::Configuration(format!(
                    "Scoring weights must be finite and not negative (got {})",
                    weight
                )));
            }
        }
        if (weights.skills_weight + weights.sections_weight - 1.0).abs() > 1e-6 {
            return Err(ResumeAnalyzerError::Configuration(format!(
                "Scoring weights must sum to 1.0 (got {} + {})",
                weights.skills_weight, weights.sections_weight
            )));
        }
        Ok(())
    }
}
