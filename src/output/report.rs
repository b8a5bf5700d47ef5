//! Analysis report structures and their export shapes

use crate::error::ResumeAnalyzerError;
use crate::processing::catalog::SkillCatalog;
use crate::processing::job_skills::JobContext;
use crate::processing::scoring::ScoreResult;
use crate::processing::section_detector::SectionKind;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Terminal result of analyzing one resume.
///
/// Field names are the stable keys of the JSON export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Identifier of the analyzed document (usually its path)
    pub file_searched: String,

    /// Catalog terms found in the resume, sorted
    pub found_skills: Vec<String>,
    pub skill_count: usize,
    pub total_skills_in_list: usize,

    /// Catalog terms found in the job description, in catalog order
    pub job_skills_detected: Vec<String>,
    pub missing_skills_against_job: Vec<String>,

    /// Present sections in canonical order
    pub sections_present: Vec<SectionKind>,
    pub sections_map: BTreeMap<SectionKind, bool>,
    pub missing_sections: Vec<SectionKind>,

    /// Presence flag for every catalog term, in catalog order
    pub skill_presence: SkillPresence,

    pub scores: ScoreResult,
    pub job_context: JobContext,
    pub resume_preview: String,
}

/// Catalog-ordered `skill -> present` mapping, exported as a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillPresence(Vec<(String, bool)>);

/// One row of the flat skills table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRow {
    pub skill: String,
    pub present: bool,
}

/// Outcome for one document of a batch run.
#[derive(Debug)]
pub struct BatchOutcome {
    pub source: PathBuf,
    pub outcome: Result<AnalysisReport, ResumeAnalyzerError>,
}

/// One row of the multi-resume comparison table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub filename: String,
    pub skills_found: usize,
    pub sections_found: usize,
    pub final_score: Option<u8>,
    pub status: String,
}

impl SkillPresence {
    /// Flag every catalog term by membership in `found`.
    pub fn from_catalog(catalog: &SkillCatalog, found: &[String]) -> Self {
        Self(
            catalog
                .iter()
                .map(|term| (term.to_string(), found.iter().any(|f| f == term)))
                .collect(),
        )
    }

    pub fn get(&self, skill: &str) -> Option<bool> {
        self.0.iter().find(|(s, _)| s == skill).map(|(_, present)| *present)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(s, p)| (s.as_str(), *p))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn rows(&self) -> Vec<SkillRow> {
        self.iter()
            .map(|(skill, present)| SkillRow {
                skill: skill.to_string(),
                present,
            })
            .collect()
    }
}

impl Serialize for SkillPresence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(skill, present)| (skill, present)))
    }
}

impl<'de> Deserialize<'de> for SkillPresence {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(SkillPresenceVisitor)
    }
}

struct SkillPresenceVisitor;

impl<'de> Visitor<'de> for SkillPresenceVisitor {
    type Value = SkillPresence;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of skill names to presence flags")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((skill, present)) = access.next_entry::<String, bool>()? {
            entries.push((skill, present));
        }
        Ok(SkillPresence(entries))
    }
}

impl AnalysisReport {
    pub fn final_score(&self) -> u8 {
        self.scores.final_score
    }

    pub fn has_job_skills(&self) -> bool {
        !self.job_skills_detected.is_empty()
    }

    /// Improvement hints derived from the report fields alone.
    pub fn suggestions(&self) -> Vec<String> {
        let mut suggestions = Vec::new();

        if !self.missing_skills_against_job.is_empty() {
            suggestions.push(format!(
                "Add these job-specific skills to increase matching: {}",
                self.missing_skills_against_job.join(", ")
            ));
        } else {
            suggestions.push(
                "No job file or no missing job skills detected. Consider adding more domain skills if relevant."
                    .to_string(),
            );
        }

        if !self.missing_sections.is_empty() {
            let names: Vec<&str> = self.missing_sections.iter().map(|k| k.name()).collect();
            suggestions.push(format!("Consider adding these sections: {}", names.join(", ")));
        } else {
            suggestions.push("Resume already has the basic sections detected.".to_string());
        }

        suggestions
    }

    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl BatchOutcome {
    pub fn file_name(&self) -> String {
        display_name(&self.source)
    }

    pub fn comparison_row(&self) -> ComparisonRow {
        match &self.outcome {
            Ok(report) => ComparisonRow {
                filename: self.file_name(),
                skills_found: report.skill_count,
                sections_found: report.sections_present.len(),
                final_score: Some(report.final_score()),
                status: "ok".to_string(),
            },
            Err(e) => ComparisonRow {
                filename: self.file_name(),
                skills_found: 0,
                sections_found: 0,
                final_score: None,
                status: format!("failed: {}", e),
            },
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
