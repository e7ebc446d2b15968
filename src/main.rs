//! Resume matcher: score a resume against a job description

use clap::Parser;
use log::{error, info};
use resume_matcher::cli::{self, Cli, Commands, ConfigAction};
use resume_matcher::compute_score_with_config;
use resume_matcher::config::Config;
use resume_matcher::error::{MatcherError, Result};
use resume_matcher::input::manager::InputManager;
use resume_matcher::output::formatter::{resolve_save_path, save_report_to_file, ReportContext, ReportGenerator};
use resume_matcher::processing::ontology::SkillsOntology;
use resume_matcher::processing::term_extractor::TermMatcher;
use std::path::{Path, PathBuf};
use std::process;
use std::time::{Duration, Instant};

const DOCUMENT_EXTENSIONS: [&str; 3] = ["txt", "md", "markdown"];

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    if let Err(e) = run_command(cli.command, cli.config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn load_or_default(path: &Path) -> Result<Config> {
    if path.exists() {
        Config::load_from(path)
    } else {
        Ok(Config::default())
    }
}

async fn run_command(command: Commands, config_path: Option<PathBuf>) -> Result<()> {
    match command {
        Commands::Score {
            resume,
            job,
            ontology,
            output,
            save,
            timeout_secs,
            no_color,
        } => {
            let config = load_config(config_path.as_deref())?;

            cli::validate_file_extension(&resume, &DOCUMENT_EXTENSIONS)
                .map_err(|e| MatcherError::InvalidInput(format!("Resume file: {}", e)))?;
            cli::validate_file_extension(&job, &DOCUMENT_EXTENSIONS)
                .map_err(|e| MatcherError::InvalidInput(format!("Job description file: {}", e)))?;

            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(MatcherError::InvalidInput)?,
                None => config.output.format,
            };

            let mut input_manager = InputManager::new();
            let resume_text = input_manager.extract_text(&resume).await?;
            let job_text = input_manager.extract_text(&job).await?;
            info!(
                "Read resume ({} chars) and job description ({} chars)",
                resume_text.len(),
                job_text.len()
            );

            let start_time = Instant::now();
            let worker_config = config.clone();
            let worker_ontology = ontology.clone();
            let worker = tokio::task::spawn_blocking(move || {
                compute_score_with_config(&resume_text, &job_text, &worker_ontology, &worker_config)
            });

            // the blocking worker cannot be cancelled; on timeout its result is dropped
            let joined = match timeout_secs {
                Some(secs) => tokio::time::timeout(Duration::from_secs(secs), worker)
                    .await
                    .map_err(|_| MatcherError::Timeout(format!("scoring did not finish within {}s", secs)))?,
                None => worker.await,
            };
            let report = joined.map_err(|e| MatcherError::Worker(e.to_string()))??;

            let context = ReportContext {
                resume_file: resume.to_string_lossy().to_string(),
                job_file: job.to_string_lossy().to_string(),
                embedding_model: config.model.embedding_model.clone(),
                weights: config.scoring,
                generated_at: chrono::Utc::now(),
                processing_time_ms: start_time.elapsed().as_millis() as u64,
            };

            let generator = ReportGenerator::with_options(
                config.output.color_output && !no_color,
                config.output.max_skill_chips,
                true,
                true,
            );
            let rendered = generator.generate_report(&report, &context, &output_format)?;
            println!("{}", rendered);

            if let Some(save_path) = save {
                // saved copies never carry terminal color codes
                let plain = ReportGenerator::with_options(false, config.output.max_skill_chips, true, true)
                    .generate_report(&report, &context, &output_format)?;
                let save_path = resolve_save_path(&save_path, &output_format, &context.resume_file);
                save_report_to_file(&plain, &save_path)?;
                println!("💾 Report saved to {}", save_path.display());
            }
        }

        Commands::Skills { ontology, file } => {
            cli::validate_file_extension(&file, &DOCUMENT_EXTENSIONS).map_err(MatcherError::InvalidInput)?;

            let ontology = SkillsOntology::load(&ontology)?;
            let text = InputManager::new().extract_text(&file).await?;
            let found = TermMatcher::new(&ontology.vocabulary())?.find_terms(&text);

            println!("🔍 {} of {} known skills found in {}", found.len(), ontology.vocabulary().len(), file.display());
            for (category, terms) in ontology.categories() {
                let hits: Vec<&str> = terms
                    .iter()
                    .filter(|term| found.contains(*term))
                    .map(String::as_str)
                    .collect();
                if !hits.is_empty() {
                    println!("  • {}: {}", category, hits.join(", "));
                }
            }
        }

        Commands::Config { action } => {
            let path = config_path.unwrap_or_else(Config::config_path);

            match action {
                Some(ConfigAction::Show) | None => {
                    let config = load_or_default(&path)?;
                    println!("⚙️  Current Configuration\n");
                    println!("Embedding Model: {}", config.model.embedding_model);
                    println!("\nScoring Weights:");
                    println!("  Embedding similarity: {:.1}", config.scoring.embedding);
                    println!("  Skills coverage: {:.1}", config.scoring.coverage);
                    println!("  Keyword alignment: {:.1}", config.scoring.keyword_alignment);
                    println!("  Evidence: {:.1}", config.scoring.evidence);
                    println!("\nMatching:");
                    println!("  Top-k: {}", config.matching.top_k);
                    println!("  Action verbs: {}", config.matching.action_verbs.join(", "));
                    println!("\nOutput: {:?} (color: {})", config.output.format, config.output.color_output);
                }

                Some(ConfigAction::Path) => {
                    println!("{}", path.display());
                }

                Some(ConfigAction::Reset) => {
                    println!("🔄 Resetting configuration to defaults...");
                    Config::default().save_to(&path)?;
                    println!("✅ Configuration reset: {}", path.display());
                }

                Some(ConfigAction::Set { key, value }) => {
                    let mut config = load_or_default(&path)?;
                    config.set(&key, &value)?;
                    config.validate()?;
                    config.save_to(&path)?;
                    println!("✅ {} = {}", key, value);
                }
            }
        }
    }

    Ok(())
}
