use clap::Parser;
use purus::analyzer::{self, AnalysisClient, GeminiModel};
use purus::app::{self, AppStatus, Session};
use purus::cli::{Cli, Commands};
use purus::config::Config;
use purus::error::{PurusError, Result};
use purus::{documents, export, interactive, loader};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "purus=debug,purus_common=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Analyze { files, mode, symptoms, output, markdown, no_pdf } => {
            println!("🩺 purus - document analysis\n");

            // APIキーがなければ何もせず終了
            let client = AnalysisClient::new(GeminiModel::from_config(&config)?);

            let selected = documents::load_files(&files)?;
            for file in &selected {
                if !documents::is_supported_media_type(&file.media_type) {
                    println!("⚠ {} is not an image or PDF ({})", file.name, file.media_type);
                }
            }

            let mut session = Session::new();
            session.set_mode(mode)?;
            session.select_files(selected)?;
            session.set_symptoms(symptoms.unwrap_or_default())?;
            if session.trend_falls_back_to_summary() {
                println!("⚠ {}", analyzer::SINGLE_FILE_TREND_WARNING);
            }

            println!("[1/2] {} ({})", session.primary_action_label(), session.selection_label());
            let loader = loader::AnalysisLoader::start();
            let status = session.run(&client).await;
            loader.finish();

            if status? != AppStatus::Success {
                return Err(PurusError::AnalysisFailed(session.error().to_string()));
            }
            println!("✔ Analysis complete\n");

            let report = session
                .report()
                .ok_or_else(|| PurusError::AnalysisFailed(app::UNKNOWN_ERROR_MESSAGE.into()))?;
            export::print_report(&report);

            if let Some(path) = markdown {
                std::fs::write(&path, session.result())?;
                println!("✔ Markdown saved: {}", path.display());
            }

            if !no_pdf {
                println!("[2/2] Exporting...");
                let output_dir = output.unwrap_or_else(|| PathBuf::from("."));
                export::export_pdf(&report, &output_dir, &config.output_file)?;
            }

            println!("\n✅ Done");
        }

        Commands::Export { input, output } => {
            println!("📄 purus - export\n");

            if !input.is_file() {
                return Err(PurusError::FileNotFound(input.display().to_string()));
            }
            let content = std::fs::read_to_string(&input)?;
            let report = purus_common::split_report(&content);
            println!(
                "- Sections: {}",
                if report.has_trend() { "summary + trend analysis" } else { "summary" }
            );

            let output_dir = output.unwrap_or_else(|| PathBuf::from("."));
            export::export_pdf(&report, &output_dir, &config.output_file)?;

            println!("\n✅ Export complete");
        }

        Commands::Prompt { mode, symptoms } => {
            println!("{}", purus_common::build_prompt(mode, symptoms.as_deref()));
        }

        Commands::Interactive => {
            let client = AnalysisClient::new(GeminiModel::from_config(&config)?);
            interactive::run_interactive(&client, &PathBuf::from("."), &config.output_file).await?;
        }

        Commands::Config { set_api_key, show } => {
            let mut config = config;

            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ API key saved");
            }

            if show {
                println!("Settings:");
                println!("  Model: {}", config.model);
                println!("  API base: {}", config.api_base);
                println!(
                    "  Temperature: {}",
                    config.temperature.map(|t| t.to_string()).unwrap_or_else(|| "model default".into())
                );
                println!(
                    "  Timeout: {}",
                    config.timeout_seconds.map(|s| format!("{}s", s)).unwrap_or_else(|| "none".into())
                );
                println!("  Output file: {}", config.output_file);
                println!("  API key: {}", if config.get_api_key().is_ok() { "set" } else { "not set" });
            }
        }
    }

    Ok(())
}
