//! Required-skill extraction from a job description

use crate::processing::normalizer::normalize;
use crate::processing::skill_matcher::SkillMatcher;
use serde::{Deserialize, Serialize};

/// Where the job context for an analysis came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobContext {
    Provided,
    /// No job description was supplied.
    Absent,
    /// A job description was requested but could not be read.
    Unavailable(String),
}

/// Catalog terms required by the job description, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRequirement {
    pub skills: Vec<String>,
    pub context: JobContext,
}

impl JobRequirement {
    pub fn absent() -> Self {
        Self {
            skills: Vec::new(),
            context: JobContext::Absent,
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            skills: Vec::new(),
            context: JobContext::Unavailable(reason.into()),
        }
    }

    /// True unless a job description was actually read.
    pub fn is_missing_context(&self) -> bool {
        !matches!(self.context, JobContext::Provided)
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

/// Derive the required skills from `job_text` using the resume's matcher.
///
/// `None` yields an empty requirement tagged [`JobContext::Absent`]; the caller
/// decides whether that is worth a warning.
pub fn extract_required(job_text: Option<&str>, matcher: &SkillMatcher) -> JobRequirement {
    match job_text {
        Some(text) => JobRequirement {
            skills: matcher.find_in_catalog_order(&normalize(text)),
            context: JobContext::Provided,
        },
        None => JobRequirement::absent(),
    }
}
