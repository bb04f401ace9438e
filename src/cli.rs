use clap::{Parser, Subcommand};
use purus_common::AnalysisMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "purus")]
#[command(about = "Plain-language summaries and trend reports for medical documents", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze one document (summary) or several documents (trend)
    Analyze {
        /// Documents to analyze (images/PDF)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Analysis mode (summary/trend)
        #[arg(short, long, default_value = "summary")]
        mode: AnalysisMode,

        /// Current symptoms (optional)
        #[arg(short, long)]
        symptoms: Option<String>,

        /// Output PDF file or directory (default: Purus-Report.pdf)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also save the raw Markdown result
        #[arg(long)]
        markdown: Option<PathBuf>,

        /// Skip PDF export
        #[arg(long)]
        no_pdf: bool,
    },

    /// Build a PDF report from a saved Markdown result
    Export {
        /// Markdown result file
        #[arg(required = true)]
        input: PathBuf,

        /// Output PDF file or directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the instruction text sent to the model
    Prompt {
        /// Analysis mode (summary/trend)
        #[arg(short, long, default_value = "summary")]
        mode: AnalysisMode,

        /// Current symptoms (optional)
        #[arg(short, long)]
        symptoms: Option<String>,
    },

    /// Guided session: pick mode, files and symptoms, then analyze
    Interactive,

    /// Show or edit settings
    Config {
        /// Save the Gemini API key
        #[arg(long)]
        set_api_key: Option<String>,

        /// Show current settings
        #[arg(long)]
        show: bool,
    },
}
