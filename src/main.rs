use anyhow::Result;
use appliance_diagnosis::links;
use appliance_diagnosis::models::{AnalysisMode, AnalysisResult, Config, Language};
use appliance_diagnosis::AnalysisService;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "appliance-diagnosis")]
#[command(about = "Identify spare parts and diagnose errors from photos or sound recordings")]
struct CliArgs {
    /// Prompt language (de or en). Detected from LANG when omitted.
    #[arg(long, global = true, value_parser = parse_language_arg)]
    language: Option<Language>,

    /// Print the result as JSON instead of a report.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Analyze a photo of a spare part or an error display.
    Image {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// part or error-code
        #[arg(long, default_value = "part", value_parser = parse_image_mode_arg)]
        mode: AnalysisMode,
    },
    /// Analyze a sound recording of the running machine.
    Audio {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

fn parse_language_arg(input: &str) -> std::result::Result<Language, String> {
    input.parse()
}

fn parse_image_mode_arg(input: &str) -> std::result::Result<AnalysisMode, String> {
    match input.parse()? {
        AnalysisMode::Audio => Err("Use the `audio` command for sound recordings".to_string()),
        mode => Ok(mode),
    }
}

fn detect_language() -> Language {
    std::env::var("LANG")
        .map(|locale| Language::from_locale(&locale))
        .unwrap_or(Language::English)
}

fn render_report(result: &AnalysisResult) -> String {
    let mut lines = Vec::new();
    match result {
        AnalysisResult::Part(part) => {
            lines.push(format!("Part:          {}", part.part_name));
            if !part.likely_models.is_empty() {
                lines.push(format!("Likely models: {}", part.likely_models.join(", ")));
            }
            lines.push(format!("Price range:   {}", part.estimated_price_range));
            lines.push(format!("Confidence:    {}", part.confidence));
            lines.push(format!("Shop:          {}", links::shopping_search_url(part)));
        }
        AnalysisResult::Error(diagnosis) => {
            lines.push(format!("Error:       {}", diagnosis.error_code));
            lines.push(format!("Description: {}", diagnosis.description));
            lines.push(format!("Confidence:  {}", diagnosis.confidence));
            if !diagnosis.possible_causes.is_empty() {
                lines.push("Possible causes:".to_string());
                lines.extend(diagnosis.possible_causes.iter().map(|c| format!("  - {}", c)));
            }
            if !diagnosis.suggested_fixes.is_empty() {
                lines.push("Suggested fixes:".to_string());
                lines.extend(
                    diagnosis
                        .suggested_fixes
                        .iter()
                        .enumerate()
                        .map(|(i, fix)| format!("  {}. {}", i + 1, fix)),
                );
            }
        }
    }
    lines.push(format!("Community:     {}", links::community_search_url(result)));
    lines.join("\n")
}

async fn run(args: CliArgs) -> Result<AnalysisResult> {
    let config = Config::from_env()?;
    let service = AnalysisService::from_config(&config);
    let language = args.language.unwrap_or_else(detect_language);

    let result = match args.command {
        Command::Image { file, mode } => {
            info!("Analyzing image {} ({:?})", file.display(), mode);
            service.analyze_image_file(&file, mode, language).await?
        }
        Command::Audio { file } => {
            info!("Analyzing recording {}", file.display());
            service.analyze_audio_file(&file, language).await?
        }
    };
    Ok(result)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "appliance_diagnosis=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();
    let json = args.json;

    match run(args).await {
        Ok(result) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", render_report(&result));
            }
            Ok(())
        }
        Err(e) => {
            error!("Analysis failed: {}", e);
            std::process::exit(1);
        }
    }
}
