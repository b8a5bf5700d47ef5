//! Resume analyzer: skill and section coverage scoring for resumes

use anyhow::{bail, Context};
use clap::Parser;
use log::{error, info, warn};
use resume_analyzer::cli::{self, Cli, Commands, ConfigAction};
use resume_analyzer::input::manager::InputManager;
use resume_analyzer::config::OutputFormat;
use resume_analyzer::output::formatter::{
    comparison_csv, save_report_to_file, skills_csv, suggest_filename, ReportGenerator,
};
use resume_analyzer::processing::analyzer::AnalysisEngine;
use resume_analyzer::processing::catalog::SkillCatalog;
use resume_analyzer::processing::job_skills::JobRequirement;
use resume_analyzer::Config;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, mut config: Config, config_path: &Path) -> anyhow::Result<()> {
    match command {
        Commands::Analyze {
            file,
            job,
            skills,
            out,
            output,
            detailed,
            no_save,
        } => {
            cli::validate_file_extension(&file, cli::RESUME_EXTENSIONS)
                .map_err(|e| anyhow::anyhow!("Resume file: {}", e))?;

            let format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(anyhow::Error::msg)?,
                None => config.output.format,
            };

            if skills.is_some() {
                config.analysis.skills_file = skills;
            }
            let engine = AnalysisEngine::from_config(&config).context("Failed to prepare the skill catalog")?;

            let mut input_manager = InputManager::new();
            let resume_text = input_manager
                .extract_text(&file)
                .await
                .with_context(|| format!("Failed to read resume {}", file.display()))?;
            let job_requirement = load_job(&mut input_manager, job.as_deref(), &engine).await;

            info!("Analyzing {}", file.display());
            let report = engine.analyze(&file.to_string_lossy(), &resume_text, &job_requirement);

            let generator = ReportGenerator::with_options(config.output.color_output, detailed, true, true);
            let rendered = generator.generate_report(&report, &format)?;
            println!("{}", rendered);

            if !no_save && config.output.save_files {
                if format == OutputFormat::Markdown {
                    let md_path = match &out {
                        Some(prefix) => PathBuf::from(format!("{}.md", prefix)),
                        None => PathBuf::from(suggest_filename(&format, &file.to_string_lossy(), true)),
                    };
                    save_report_to_file(&rendered, &md_path)
                        .with_context(|| format!("Failed to write {}", md_path.display()))?;
                    println!("Saved report: {}", md_path.display());
                }

                let prefix = out.unwrap_or_else(|| config.output.out_prefix.clone());
                let json_path = PathBuf::from(format!("{}.json", prefix));
                let csv_path = PathBuf::from(format!("{}_skills.csv", prefix));

                save_report_to_file(&report.to_json(true)?, &json_path)
                    .with_context(|| format!("Failed to write {}", json_path.display()))?;
                save_report_to_file(&skills_csv(&report)?, &csv_path)
                    .with_context(|| format!("Failed to write {}", csv_path.display()))?;

                println!("Saved JSON: {}", json_path.display());
                println!("Saved CSV (skills): {}", csv_path.display());
            }
        }

        Commands::Batch {
            files,
            job,
            skills,
            out,
            no_save,
        } => {
            if skills.is_some() {
                config.analysis.skills_file = skills;
            }
            let engine = Arc::new(AnalysisEngine::from_config(&config).context("Failed to prepare the skill catalog")?);

            let mut input_manager = InputManager::new();
            let job_requirement = load_job(&mut input_manager, job.as_deref(), &engine).await;

            let total = files.len();
            let outcomes = Arc::clone(&engine).analyze_batch(files, job_requirement).await;
            let succeeded = outcomes.iter().filter(|o| o.outcome.is_ok()).count();

            let generator = ReportGenerator::with_options(config.output.color_output, false, true, false);
            println!("{}", generator.generate_comparison(&outcomes));

            for outcome in &outcomes {
                if let Ok(report) = &outcome.outcome {
                    println!("{}", generator.generate_report(report, &config.output.format)?);
                }
            }

            if !no_save && config.output.save_files {
                let prefix = out.unwrap_or_else(|| config.output.out_prefix.clone());
                let csv_path = PathBuf::from(format!("{}_comparison.csv", prefix));
                save_report_to_file(&comparison_csv(&outcomes)?, &csv_path)
                    .with_context(|| format!("Failed to write {}", csv_path.display()))?;
                println!("Saved CSV (comparison): {}", csv_path.display());
            }

            info!("{} of {} resumes analyzed", succeeded, total);
            if succeeded == 0 {
                bail!("None of the {} resumes could be analyzed", total);
            }
        }

        Commands::Skills { skills } => {
            let skills_file = skills.or(config.analysis.skills_file);
            let catalog = SkillCatalog::load(skills_file.as_deref()).context("Failed to load skill catalog")?;

            println!("Skill catalog ({} terms)\n", catalog.len());
            for (i, term) in catalog.iter().enumerate() {
                println!("{:>3}. {}", i + 1, term);
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("Current Configuration\n");
                println!("Preview length: {} characters", config.analysis.preview_chars);
                match &config.analysis.skills_file {
                    Some(path) => println!("Skills file: {}", path.display()),
                    None => println!("Skills file: built-in catalog"),
                }
                println!("\nScoring Weights:");
                println!("  Skills: {:.1}%", config.scoring.skills_weight * 100.0);
                println!("  Sections: {:.1}%", config.scoring.sections_weight * 100.0);
                println!("\nOutput:");
                println!("  Format: {:?}", config.output.format);
                println!("  Colors: {}", config.output.color_output);
                println!("  File prefix: {}", config.output.out_prefix);
                println!("  Save files: {}", config.output.save_files);
            }

            Some(ConfigAction::Reset) => {
                println!("Resetting configuration to defaults...");
                Config::default()
                    .save_to(config_path)
                    .with_context(|| format!("Failed to write {}", config_path.display()))?;
                println!("Configuration reset successfully!");
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }
        },
    }

    Ok(())
}

/// Read the job description if one was given. Failure to read it is not fatal.
async fn load_job(input_manager: &mut InputManager, job: Option<&Path>, engine: &AnalysisEngine) -> JobRequirement {
    if let Some(path) = job {
        if let Err(e) = cli::validate_file_extension(path, cli::JOB_EXTENSIONS) {
            warn!("Job description file: {}", e);
            return JobRequirement::unavailable(e);
        }
    }
    input_manager.load_job_requirement(job, engine.matcher()).await
}
