//! Text normalization, matching and scoring

pub mod analyzer;
pub mod catalog;
pub mod job_skills;
pub mod normalizer;
pub mod scoring;
pub mod section_detector;
pub mod skill_matcher;
