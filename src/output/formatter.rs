//! Output formatters for console, JSON, markdown and CSV exports

use crate::config::OutputFormat;
use crate::error::{Result, ResumeAnalyzerError};
use crate::output::report::{AnalysisReport, BatchOutcome, ComparisonRow};
use crate::processing::job_skills::JobContext;
use colored::{Color, Colorize};
use csv::WriterBuilder;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Trait for formatting a single analysis report
pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
}

/// Console formatter with colors and score badge
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for the stable export record
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for shareable reports
pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n----- {} -----\n", title.color(Color::Blue).bold())
        } else {
            format!("\n----- {} -----\n", title)
        }
    }

    fn format_score_badge(&self, score: u8) -> String {
        let (badge, color) = score_band(score);

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    /// Render a comparison table for a batch, one row per input in input order.
    pub fn format_comparison(&self, outcomes: &[BatchOutcome]) -> String {
        let rows: Vec<ComparisonRow> = outcomes.iter().map(BatchOutcome::comparison_row).collect();
        let name_width = rows
            .iter()
            .map(|r| r.filename.chars().count())
            .max()
            .unwrap_or(0)
            .max("File".len());

        let mut output = self.format_header("Resume Comparison");
        output.push_str(&format!(
            "{:<width$}  {:>6}  {:>8}  {:>5}\n",
            "File",
            "Skills",
            "Sections",
            "Score",
            width = name_width
        ));

        for row in &rows {
            match row.final_score {
                Some(score) => {
                    let score_text = format!("{:>5}", score);
                    output.push_str(&format!(
                        "{:<width$}  {:>6}  {:>8}  {}\n",
                        row.filename,
                        row.skills_found,
                        row.sections_found,
                        self.colorize(&score_text, score_band(score).1),
                        width = name_width
                    ));
                }
                None => {
                    output.push_str(&format!(
                        "{:<width$}  {:>6}  {:>8}  {}\n",
                        row.filename,
                        "-",
                        "-",
                        self.colorize(&row.status, Color::Red),
                        width = name_width
                    ));
                }
            }
        }

        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut output = self.format_header("Analysis Summary");

        output.push_str(&format!("File: {}\n", report.file_searched));
        output.push_str(&format!(
            "Found skills ({}): {}\n",
            report.skill_count,
            self.colorize(&list_or_none(&report.found_skills), Color::Green)
        ));

        if report.has_job_skills() {
            output.push_str(&format!(
                "Job skills required ({}): {}\n",
                report.job_skills_detected.len(),
                report.job_skills_detected.join(", ")
            ));
            output.push_str(&format!(
                "Missing vs job ({}): {}\n",
                report.missing_skills_against_job.len(),
                self.colorize(&list_or_none(&report.missing_skills_against_job), Color::Yellow)
            ));
        }
        if let JobContext::Unavailable(reason) = &report.job_context {
            output.push_str(&format!(
                "{}\n",
                self.colorize(&format!("Job description unavailable: {}", reason), Color::Yellow)
            ));
        }

        let present: Vec<&str> = report.sections_present.iter().map(|k| k.name()).collect();
        output.push_str(&format!("Sections present: {}\n", list_or_none(&present)));
        output.push_str(&format!(
            "Score: {} / 100 {}\n",
            report.final_score(),
            self.format_score_badge(report.final_score())
        ));

        if self.detailed {
            output.push_str(&self.format_header("Details"));
            output.push_str(&format!(
                "Skills ratio: {:.3} | Sections ratio: {:.3}\n",
                report.scores.skills_ratio, report.scores.sections_ratio
            ));
            output.push_str(&format!(
                "Catalog coverage: {} of {} terms\n",
                report.skill_count, report.total_skills_in_list
            ));
            for (kind, found) in &report.sections_map {
                let mark = if *found {
                    self.colorize("yes", Color::Green)
                } else {
                    self.colorize("no", Color::Red)
                };
                output.push_str(&format!("  {:<18} {}\n", kind.name(), mark));
            }
        }

        output.push_str("\nSuggestions:\n");
        for suggestion in report.suggestions() {
            output.push_str(&format!(" - {}\n", suggestion));
        }

        Ok(output)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        Ok(report.to_json(self.pretty)?)
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn markdown_score_badge(score: u8) -> &'static str {
        match score {
            90..=100 => "🟢 Excellent",
            80..=89 => "🟡 Very Good",
            70..=79 => "🟠 Good",
            60..=69 => "🔴 Fair",
            50..=59 => "🔴 Below Average",
            _ => "🔴 Poor",
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut output = String::from("# Resume Analysis Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Resume:** `{}`\n\n",
                chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
                report.file_searched
            ));
        }

        output.push_str(&format!(
            "**Score:** {} / 100 {}\n\n",
            report.final_score(),
            Self::markdown_score_badge(report.final_score())
        ));

        output.push_str("| Component | Ratio |\n");
        output.push_str("|-----------|-------|\n");
        output.push_str(&format!("| Skills | {:.3} |\n", report.scores.skills_ratio));
        output.push_str(&format!("| Sections | {:.3} |\n\n", report.scores.sections_ratio));

        output.push_str(&format!("## Skills ({} of {})\n\n", report.skill_count, report.total_skills_in_list));
        if report.found_skills.is_empty() {
            output.push_str("_No catalog skills found._\n\n");
        } else {
            output.push_str(&format!("`{}`\n\n", report.found_skills.join("`, `")));
        }

        if report.has_job_skills() {
            output.push_str("## Job Match\n\n");
            output.push_str(&format!("**Required:** {}\n\n", report.job_skills_detected.join(", ")));
            output.push_str(&format!(
                "**Missing:** {}\n\n",
                list_or_none(&report.missing_skills_against_job)
            ));
        }

        output.push_str("## Sections\n\n");
        for (kind, found) in &report.sections_map {
            output.push_str(&format!("- [{}] {}\n", if *found { "x" } else { " " }, kind.name()));
        }
        output.push('\n');

        output.push_str("## Suggestions\n\n");
        for suggestion in report.suggestions() {
            output.push_str(&format!("- {}\n", suggestion));
        }

        Ok(output)
    }
}

impl ReportGenerator {
    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    pub fn generate_report(&self, report: &AnalysisReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }

    pub fn generate_comparison(&self, outcomes: &[BatchOutcome]) -> String {
        self.console_formatter.format_comparison(outcomes)
    }
}

fn score_band(score: u8) -> (&'static str, Color) {
    match score {
        90..=100 => ("EXCELLENT", Color::Green),
        80..=89 => ("VERY GOOD", Color::BrightGreen),
        70..=79 => ("GOOD", Color::Yellow),
        60..=69 => ("FAIR", Color::BrightYellow),
        50..=59 => ("BELOW AVG", Color::Red),
        _ => ("POOR", Color::BrightRed),
    }
}

fn list_or_none<S: AsRef<str>>(items: &[S]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.iter().map(|s| s.as_ref()).collect::<Vec<&str>>().join(", ")
    }
}

fn write_csv_rows<W: Write, T: Serialize>(writer: W, rows: &[T]) -> Result<W> {
    let mut wtr = WriterBuilder::new().has_headers(true).from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    wtr.into_inner()
        .map_err(|e| ResumeAnalyzerError::OutputFormatting(format!("Failed to finish CSV output: {}", e)))
}

fn csv_to_string<T: Serialize>(rows: &[T]) -> Result<String> {
    let bytes = write_csv_rows(Vec::new(), rows)?;
    String::from_utf8(bytes).map_err(|e| ResumeAnalyzerError::OutputFormatting(e.to_string()))
}

/// `skill,present` table, one row per catalog term in catalog order.
pub fn skills_csv(report: &AnalysisReport) -> Result<String> {
    csv_to_string(&report.skill_presence.rows())
}

/// `filename,skills_found,sections_found,final_score,status` table in input order.
pub fn comparison_csv(outcomes: &[BatchOutcome]) -> Result<String> {
    let rows: Vec<ComparisonRow> = outcomes.iter().map(BatchOutcome::comparison_row).collect();
    csv_to_string(&rows)
}

// Utility functions for saving reports
pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("{}_analysis{}.txt", base_name, timestamp_suffix),
        OutputFormat::Json => format!("{}_analysis{}.json", base_name, timestamp_suffix),
        OutputFormat::Markdown => format!("{}_analysis{}.md", base_name, timestamp_suffix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::analyzer::AnalysisEngine;
    use crate::processing::catalog::SkillCatalog;
    use std::path::PathBuf;

    fn sample_report() -> AnalysisReport {
        let engine = AnalysisEngine::new(SkillCatalog::from_terms(["python", "sql", "docker"])).unwrap();
        let job = engine.job_requirement(Some("python and sql"));
        engine.analyze("cv/jane.txt", "Skills: Python, Docker\nEducation: BSc", &job)
    }

    #[test]
    fn test_console_summary_without_colors() {
        let formatter = ConsoleFormatter::new(false, false);
        let output = formatter.format_report(&sample_report()).unwrap();

        assert!(output.contains("File: cv/jane.txt"));
        assert!(output.contains("Found skills (2): docker, python"));
        assert!(output.contains("Job skills required (2): python, sql"));
        assert!(output.contains("Missing vs job (1): sql"));
        assert!(output.contains("Sections present: education, skills"));
        assert!(output.contains("Add these job-specific skills to increase matching: sql"));
        assert!(!output.contains("Skills ratio"));
    }

    #[test]
    fn test_detailed_console_lists_sections() {
        let formatter = ConsoleFormatter::new(false, true);
        let output = formatter.format_report(&sample_report()).unwrap();

        assert!(output.contains("Skills ratio: 0.500 | Sections ratio: 0.333"));
        assert!(output.contains("Catalog coverage: 2 of 3 terms"));
    }

    #[test]
    fn test_score_badge() {
        let formatter = ConsoleFormatter::new(false, false);
        assert_eq!(formatter.format_score_badge(95), "[EXCELLENT]");
        assert_eq!(formatter.format_score_badge(65), "[FAIR]");
        assert_eq!(formatter.format_score_badge(10), "[POOR]");
    }

    #[test]
    fn test_json_formatter_matches_report_export() {
        let report = sample_report();
        let output = JsonFormatter::new(false).format_report(&report).unwrap();
        assert_eq!(output, report.to_json(false).unwrap());
    }

    #[test]
    fn test_markdown_formatter() {
        let output = MarkdownFormatter::new(false).format_report(&sample_report()).unwrap();

        assert!(output.starts_with("# Resume Analysis Report"));
        assert!(output.contains("- [x] skills"));
        assert!(output.contains("- [ ] projects"));
        assert!(output.contains("**Missing:** sql"));
    }

    #[test]
    fn test_skills_csv_in_catalog_order() {
        let csv = skills_csv(&sample_report()).unwrap();
        assert_eq!(csv, "skill,present\npython,true\nsql,false\ndocker,true\n");
    }

    #[test]
    fn test_comparison_outputs() {
        let outcomes = vec![
            BatchOutcome {
                source: PathBuf::from("cv/jane.txt"),
                outcome: Ok(sample_report()),
            },
            BatchOutcome {
                source: PathBuf::from("cv/gone.pdf"),
                outcome: Err(ResumeAnalyzerError::InputUnavailable("gone".to_string())),
            },
        ];

        let csv = comparison_csv(&outcomes).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "filename,skills_found,sections_found,final_score,status");
        assert!(lines[1].starts_with("jane.txt,2,2,"));
        assert!(lines[1].ends_with(",ok"));
        assert!(lines[2].starts_with("gone.pdf,0,0,,failed"));

        let table = ConsoleFormatter::new(false, false).format_comparison(&outcomes);
        let jane = table.find("jane.txt").unwrap();
        let gone = table.find("gone.pdf").unwrap();
        assert!(jane < gone);
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(suggest_filename(&OutputFormat::Json, "cv/jane.pdf", false), "jane_analysis.json");
        assert_eq!(suggest_filename(&OutputFormat::Markdown, "jane.txt", false), "jane_analysis.md");
        assert!(suggest_filename(&OutputFormat::Console, "jane.txt", true).starts_with("jane_analysis_"));
    }

    #[test]
    fn test_save_report_creates_parent_dirs() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("report.md");
        save_report_to_file("# Report", &path).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "# Report");
    }
}
