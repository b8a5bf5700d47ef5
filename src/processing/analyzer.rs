//! Analysis engine: runs the pipeline and aggregates the report

use crate::config::{Config, DEFAULT_PREVIEW_CHARS};
use crate::error::{Result, ResumeAnalyzerError};
use crate::input::manager::InputManager;
use crate::output::report::{AnalysisReport, BatchOutcome, SkillPresence};
use crate::processing::catalog::SkillCatalog;
use crate::processing::job_skills::{extract_required, JobRequirement};
use crate::processing::normalizer::{normalize, preview};
use crate::processing::scoring::{score, ScoreResult, ScoringWeights};
use crate::processing::section_detector::{detect_sections_normalized, SectionFindings};
use crate::processing::skill_matcher::SkillMatcher;
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinSet;

/// Owns the catalog and its compiled matcher; shared read-only across analyses.
pub struct AnalysisEngine {
    catalog: SkillCatalog,
    matcher: SkillMatcher,
    weights: ScoringWeights,
    preview_chars: usize,
}

/// What the matchers found in one resume.
#[derive(Debug, Clone)]
pub struct Findings {
    pub found_skills: Vec<String>,
    pub sections: SectionFindings,
}

impl AnalysisEngine {
    pub fn new(catalog: SkillCatalog) -> Result<Self> {
        if catalog.is_empty() {
            warn!("Skill catalog is empty; skill coverage will score 0");
        }
        let matcher = SkillMatcher::new(&catalog)?;

        Ok(Self {
            catalog,
            matcher,
            weights: ScoringWeights::default(),
            preview_chars: DEFAULT_PREVIEW_CHARS,
        })
    }

    /// Build an engine from configuration, loading the configured catalog.
    pub fn from_config(config: &Config) -> Result<Self> {
        let catalog = SkillCatalog::load(config.analysis.skills_file.as_deref())?;
        Ok(Self::new(catalog)?
            .with_weights(config.scoring)
            .with_preview_chars(config.analysis.preview_chars))
    }

    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_preview_chars(mut self, preview_chars: usize) -> Self {
        self.preview_chars = preview_chars;
        self
    }

    pub fn catalog(&self) -> &SkillCatalog {
        &self.catalog
    }

    pub fn matcher(&self) -> &SkillMatcher {
        &self.matcher
    }

    /// Required skills for an optional job description text.
    pub fn job_requirement(&self, job_text: Option<&str>) -> JobRequirement {
        extract_required(job_text, &self.matcher)
    }

    /// Run detection on one resume text.
    pub fn detect(&self, resume_text: &str) -> Findings {
        let normalized = normalize(resume_text);
        Findings {
            found_skills: self.matcher.find_normalized(&normalized),
            sections: detect_sections_normalized(&normalized),
        }
    }

    /// Analyze one resume. Never fails: empty or unrecognizable text scores low.
    pub fn analyze(&self, source: &str, resume_text: &str, job: &JobRequirement) -> AnalysisReport {
        let findings = self.detect(resume_text);
        let scores = score(
            &findings.found_skills,
            &job.skills,
            &findings.sections.presence,
            self.catalog.len(),
            &self.weights,
        );

        debug!(
            "{}: {} skills, {} sections, score {}",
            source,
            findings.found_skills.len(),
            findings.sections.present_count(),
            scores.final_score
        );

        aggregate(source, resume_text, &self.catalog, findings, job, scores, self.preview_chars)
    }

    /// Read and analyze one resume file.
    pub async fn analyze_file(&self, path: &Path, job: &JobRequirement) -> Result<AnalysisReport> {
        let mut input_manager = InputManager::new().with_cache(false);
        let text = input_manager.extract_text(path).await?;
        Ok(self.analyze(&path.to_string_lossy(), &text, job))
    }

    /// Analyze several resumes concurrently.
    ///
    /// Outcomes come back in input order; a document that cannot be read is
    /// recorded as failed without affecting the others.
    pub async fn analyze_batch(self: Arc<Self>, paths: Vec<PathBuf>, job: JobRequirement) -> Vec<BatchOutcome> {
        info!("Analyzing batch of {} resumes", paths.len());

        let job = Arc::new(job);
        let mut tasks = JoinSet::new();
        for (idx, path) in paths.iter().cloned().enumerate() {
            let engine = Arc::clone(&self);
            let job = Arc::clone(&job);
            tasks.spawn(async move {
                let outcome = engine.analyze_file(&path, &job).await;
                (idx, outcome)
            });
        }

        let mut outcomes: Vec<Option<Result<AnalysisReport>>> = paths.iter().map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((idx, outcome)) => outcomes[idx] = Some(outcome),
                Err(e) => warn!("Batch analysis task failed: {}", e),
            }
        }

        paths
            .into_iter()
            .zip(outcomes)
            .map(|(source, outcome)| {
                let outcome = outcome.unwrap_or_else(|| {
                    Err(ResumeAnalyzerError::InputUnavailable(format!(
                        "Analysis task for '{}' did not complete",
                        source.display()
                    )))
                });
                match &outcome {
                    Err(e) if e.is_per_document() => warn!("Skipping {}: {}", source.display(), e),
                    Err(e) => error!("Analysis of {} failed: {}", source.display(), e),
                    Ok(_) => {}
                }
                BatchOutcome { source, outcome }
            })
            .collect()
    }
}

/// Assemble the report: gap lists, per-term presence and the text preview.
pub fn aggregate(
    source: &str,
    resume_text: &str,
    catalog: &SkillCatalog,
    findings: Findings,
    job: &JobRequirement,
    scores: ScoreResult,
    preview_chars: usize,
) -> AnalysisReport {
    let Findings {
        found_skills,
        sections,
    } = findings;

    let missing_skills_against_job = job
        .skills
        .iter()
        .filter(|s| !found_skills.contains(s))
        .cloned()
        .collect();
    let missing_sections = sections.missing();
    let skill_presence = SkillPresence::from_catalog(catalog, &found_skills);

    AnalysisReport {
        file_searched: source.to_string(),
        skill_count: found_skills.len(),
        total_skills_in_list: catalog.len(),
        found_skills,
        job_skills_detected: job.skills.clone(),
        missing_skills_against_job,
        sections_present: sections.present,
        sections_map: sections.presence,
        missing_sections,
        skill_presence,
        scores,
        job_context: job.context.clone(),
        resume_preview: preview(resume_text, preview_chars),
    }
}
