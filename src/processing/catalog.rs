//! Skill catalog: the authoritative list of recognized skill terms

use crate::error::{Result, ResumeAnalyzerError};
use log::{info, warn};
use std::collections::HashSet;
use std::path::Path;

const DEFAULT_SKILLS: [&str; 30] = [
    "python", "java", "c++", "c", "sql", "html", "css", "javascript",
    "react", "node", "django", "flask", "machine learning",
    "deep learning", "nlp", "data science", "git", "linux", "excel",
    "pandas", "numpy", "tensorflow", "pytorch", "rest api",
    "mongodb", "mysql", "docker", "kubernetes", "aws", "azure",
];

/// Ordered, duplicate-free list of lower-cased skill terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillCatalog {
    terms: Vec<String>,
}

impl Default for SkillCatalog {
    fn default() -> Self {
        Self::from_terms(DEFAULT_SKILLS)
    }
}

impl SkillCatalog {
    /// Build a catalog from arbitrary terms.
    ///
    /// Terms are trimmed and lower-cased; blank entries are skipped and later
    /// duplicates are dropped so they never count twice in a ratio.
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let terms = terms
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .filter(|t| seen.insert(t.clone()))
            .collect();

        Self { terms }
    }

    /// Parse a one-term-per-line catalog.
    pub fn parse(content: &str) -> Self {
        Self::from_terms(content.lines())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ResumeAnalyzerError::InputUnavailable(format!(
                "Cannot read skills file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let catalog = Self::parse(&content);
        info!("Loaded {} skills from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Load a custom catalog when one is given, else the built-in default.
    ///
    /// A custom file that does not exist falls back to the default with a warning.
    pub fn load(skills_file: Option<&Path>) -> Result<Self> {
        match skills_file {
            Some(path) if path.exists() => Self::from_file(path),
            Some(path) => {
                warn!("Skills file not found: {}, using built-in catalog", path.display());
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.iter().any(|t| t == term)
    }
}
