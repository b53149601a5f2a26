mod cli;

use clap::Parser;
use scoredoc::config::load_config;
use scoredoc::error::{Result, ScoreDocError};
use scoredoc::i18n::format_value;
use scoredoc::report::{self, OutputFormat};
use scoredoc::types::config::{OutputFormatSetting, ScoreDocConfig};
use scoredoc::types::findings::Findings;
use scoredoc::types::report::{Locale, Request};
use scoredoc::types::score::{parse_requested, ScoreSystemId};
use scoredoc::{batch, calculators, recommend, Engine, Normalizer};
use std::io::Read;
use std::path::Path;
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const INCOMPLETE: i32 = 1;
    pub const INVALID_INPUT: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default_filter = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: cli::Cli) -> Result<i32> {
    let config = load_config(&std::env::current_dir()?)?;
    let normalizer = Normalizer::with_aliases(&config.aliases);

    match cli.command {
        cli::Commands::Evaluate(cmd) => {
            let requested = requested_score(cmd.score.as_deref(), &config)?;
            let locale = locale(cmd.locale.as_deref(), &config)?;
            let findings = read_findings(&cmd.input, &normalizer)?;
            let request = Request::new(findings)
                .with_requested(requested)
                .with_locale(locale);

            let score_report = engine(&config)?.evaluate(&request)?;
            let rendered = report::render(&score_report, output_format(cmd.format, &config))?;
            println!("{rendered}");

            if score_report.is_complete() {
                Ok(exit_code::SUCCESS)
            } else {
                Ok(exit_code::INCOMPLETE)
            }
        }
        cli::Commands::Recommend(cmd) => {
            let locale = locale(cmd.locale.as_deref(), &config)?;
            let findings = read_findings(&cmd.input, &normalizer)?;
            let recommendation = recommend::recommend(&findings, locale);

            match output_format(cmd.format, &config) {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&recommendation)?),
                OutputFormat::Md => {
                    print!("{}", report::md::recommendation_to_markdown(&recommendation))
                }
            }
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Normalize(cmd) => {
            let findings = read_findings(&cmd.input, &normalizer)?;
            println!("{}", serde_json::to_string_pretty(&findings)?);
            if findings.rejections().is_empty() {
                Ok(exit_code::SUCCESS)
            } else {
                Ok(exit_code::INCOMPLETE)
            }
        }
        cli::Commands::Batch(cmd) => {
            let requested = requested_score(cmd.score.as_deref(), &config)?;
            let locale = locale(cmd.locale.as_deref(), &config)?;
            let outcome = batch::run(&cmd.dir, &engine(&config)?, &normalizer, requested, locale)?;

            for entry in &outcome.entries {
                match (&entry.report, &entry.error) {
                    (Some(score_report), _) => println!(
                        "{}: {}/{} computed{}",
                        entry.path.display(),
                        score_report.computed_count(),
                        score_report.scores.len(),
                        if score_report.is_complete() { "" } else { " (incomplete)" }
                    ),
                    (None, Some(error)) => {
                        println!("{}: skipped ({error})", entry.path.display())
                    }
                    (None, None) => {}
                }
            }
            println!(
                "batch: {} files, {} evaluated, {} complete, {} skipped",
                outcome.entries.len(),
                outcome.evaluated(),
                outcome.complete(),
                outcome.skipped()
            );

            if outcome.skipped() > 0 {
                Ok(exit_code::INVALID_INPUT)
            } else if outcome.complete() < outcome.evaluated() {
                Ok(exit_code::INCOMPLETE)
            } else {
                Ok(exit_code::SUCCESS)
            }
        }
        cli::Commands::Systems => {
            for calculator in calculators::all_calculators() {
                let id = calculator.id();
                let (min, max) = id.range();
                println!(
                    "{} ({}) range {}..{}",
                    id.as_str(),
                    id.display_name(),
                    format_value(min),
                    format_value(max)
                );
                println!("  required: {}", calculator.required_fields().join(", "));
                if !calculator.optional_fields().is_empty() {
                    println!("  optional: {}", calculator.optional_fields().join(", "));
                }
                println!("  reference: {}", id.reference_url());
            }
            Ok(exit_code::SUCCESS)
        }
    }
}

fn requested_score(flag: Option<&str>, config: &ScoreDocConfig) -> Result<Option<ScoreSystemId>> {
    match flag {
        Some(score) => parse_requested(score),
        None => config.requested_score(),
    }
}

fn locale(flag: Option<&str>, config: &ScoreDocConfig) -> Result<Locale> {
    match flag {
        Some(locale) => locale.parse(),
        None => config.locale(),
    }
}

fn output_format(flag: Option<cli::ReportFormat>, config: &ScoreDocConfig) -> OutputFormat {
    match flag {
        Some(cli::ReportFormat::Json) => OutputFormat::Json,
        Some(cli::ReportFormat::Md) => OutputFormat::Md,
        None => match config.format() {
            OutputFormatSetting::Json => OutputFormat::Json,
            OutputFormatSetting::Md => OutputFormat::Md,
        },
    }
}

fn engine(config: &ScoreDocConfig) -> Result<Engine> {
    match config.workers() {
        Some(workers) => Engine::with_workers(workers),
        None => Ok(Engine::default()),
    }
}

/// Read a findings document from `input`, or from stdin when it is `-`.
fn read_findings(input: &Path, normalizer: &Normalizer) -> Result<Findings> {
    let content = if input == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| ScoreDocError::from_read(e, "stdin"))?;
        buffer
    } else {
        if !input.exists() {
            return Err(ScoreDocError::PathNotFound(input.display().to_string()));
        }
        std::fs::read_to_string(input)
            .map_err(|e| ScoreDocError::from_read(e, &input.display().to_string()))?
    };
    let raw: serde_json::Value = serde_json::from_str(&content)?;
    normalizer.normalize(&raw)
}

fn main() {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            let code = if e.is_invalid_input() {
                exit_code::INVALID_INPUT
            } else {
                exit_code::RUNTIME_FAILURE
            };
            std::process::exit(code);
        }
    }
}
