//! Integration tests for the resume analyzer

use resume_analyzer::input::manager::InputManager;
use resume_analyzer::output::formatter::{comparison_csv, skills_csv};
use resume_analyzer::output::report::AnalysisReport;
use resume_analyzer::processing::analyzer::AnalysisEngine;
use resume_analyzer::processing::catalog::SkillCatalog;
use resume_analyzer::processing::job_skills::{JobContext, JobRequirement};
use resume_analyzer::processing::section_detector::SectionKind;
use resume_analyzer::{Config, ResumeAnalyzerError};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

const RESUME_TXT: &str = "tests/fixtures/sample_resume.txt";
const RESUME_MD: &str = "tests/fixtures/sample_resume.md";
const JOB_TXT: &str = "tests/fixtures/sample_job.txt";

fn default_engine() -> AnalysisEngine {
    AnalysisEngine::new(SkillCatalog::default()).unwrap()
}

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let path = Path::new(RESUME_TXT);

    let result = manager.extract_text(path).await;
    assert!(result.is_ok());

    let text = result.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();
    let path = Path::new(RESUME_MD);

    let result = manager.extract_text(path).await;
    assert!(result.is_ok());

    let text = result.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
    // Should not contain markdown formatting
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new(RESUME_TXT);

    // First extraction
    let text1 = manager.extract_text(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    // Second extraction should use cache
    let text2 = manager.extract_text(path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);

    manager.clear_cache();
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_missing_file_is_input_unavailable() {
    let mut manager = InputManager::new();
    let result = manager.extract_text(Path::new("tests/fixtures/does_not_exist.pdf")).await;

    assert!(matches!(result, Err(ResumeAnalyzerError::InputUnavailable(_))));
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("resume.xyz");
    std::fs::write(&path, "Python").unwrap();

    let mut manager = InputManager::new();
    let result = manager.extract_text(&path).await;
    assert!(matches!(result, Err(ResumeAnalyzerError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_analyze_file_against_job() {
    let engine = default_engine();
    let mut manager = InputManager::new();
    let job = manager.load_job_requirement(Some(Path::new(JOB_TXT)), engine.matcher()).await;

    assert_eq!(job.context, JobContext::Provided);
    assert_eq!(
        job.skills,
        vec!["python", "sql", "django", "flask", "docker", "kubernetes", "aws"]
    );

    let report = engine.analyze_file(Path::new(RESUME_TXT), &job).await.unwrap();

    assert_eq!(
        report.found_skills,
        vec!["aws", "docker", "git", "javascript", "kubernetes", "linux", "node", "python", "react", "sql"]
    );
    assert_eq!(report.missing_skills_against_job, vec!["django", "flask"]);
    assert_eq!(report.missing_sections, vec![SectionKind::Projects]);
    assert_eq!(report.scores.skills_ratio, 0.714);
    assert_eq!(report.scores.sections_ratio, 0.833);
    assert_eq!(report.final_score(), 75);
}

#[tokio::test]
async fn test_analyze_file_without_job() {
    let engine = default_engine();
    let report = engine
        .analyze_file(Path::new(RESUME_TXT), &JobRequirement::absent())
        .await
        .unwrap();

    assert_eq!(report.skill_count, 10);
    assert_eq!(report.total_skills_in_list, 30);
    assert!(report.job_skills_detected.is_empty());
    // (10/30 * 0.7 + 5/6 * 0.3) * 100 = 48.33
    assert_eq!(report.final_score(), 48);
}

#[tokio::test]
async fn test_unreadable_job_falls_back_to_coverage() {
    let engine = default_engine();
    let mut manager = InputManager::new();
    let job = manager
        .load_job_requirement(Some(Path::new("tests/fixtures/no_such_job.txt")), engine.matcher())
        .await;

    assert!(job.skills.is_empty());
    assert!(matches!(job.context, JobContext::Unavailable(_)));

    let report = engine.analyze_file(Path::new(RESUME_TXT), &job).await.unwrap();
    assert_eq!(report.final_score(), 48);
    assert!(report.suggestions()[0].starts_with("No job file"));
}

#[tokio::test]
async fn test_batch_comparison_export() {
    let engine = Arc::new(default_engine());
    let files = vec![
        PathBuf::from(RESUME_TXT),
        PathBuf::from("tests/fixtures/missing_resume.pdf"),
        PathBuf::from(RESUME_MD),
    ];

    let outcomes = engine.analyze_batch(files, JobRequirement::absent()).await;
    assert_eq!(outcomes.len(), 3);
    assert!(outcomes[0].outcome.is_ok());
    assert!(outcomes[1].outcome.is_err());
    assert!(outcomes[2].outcome.is_ok());

    let csv = comparison_csv(&outcomes).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("sample_resume.txt,10,5,48,"));
    assert!(lines[2].starts_with("missing_resume.pdf,0,0,,failed"));
    assert!(lines[3].starts_with("sample_resume.md,"));
}

#[tokio::test]
async fn test_json_and_csv_exports() {
    let engine = default_engine();
    let report = engine
        .analyze_file(Path::new(RESUME_TXT), &JobRequirement::absent())
        .await
        .unwrap();

    let parsed = AnalysisReport::from_json(&report.to_json(true).unwrap()).unwrap();
    assert_eq!(parsed, report);

    let csv = skills_csv(&report).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "skill,present");
    assert_eq!(lines[1], "python,true");
    assert_eq!(lines[2], "java,false");
    assert_eq!(lines.len(), 31);
}

#[test]
fn test_config_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    let created = Config::load_from(&path).unwrap();
    assert!(path.exists());
    assert_eq!(created, Config::default());

    let mut config = created;
    config.analysis.preview_chars = 500;
    config.save_to(&path).unwrap();
    assert_eq!(Config::load_from(&path).unwrap().analysis.preview_chars, 500);
}

#[test]
fn test_custom_skill_catalog_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("skills.txt");
    std::fs::write(&path, "Rust\n\n  Go \nrust\nTokio\n").unwrap();

    let catalog = SkillCatalog::load(Some(path.as_path())).unwrap();
    assert_eq!(catalog.terms(), &["rust", "go", "tokio"]);

    let engine = AnalysisEngine::new(catalog).unwrap();
    let report = engine.analyze("r.txt", "Rust and Tokio, some Go", &JobRequirement::absent());
    assert_eq!(report.found_skills, vec!["go", "rust", "tokio"]);
}
