//! kiosk CLI entry point.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt};

use kiosk::commands;
use kiosk::config::Config;
use kiosk::export::CsvSchema;

#[derive(Parser)]
#[command(name = "kiosk", version, about = "Booth-kiosk demo feedback service")]
struct Cli {
    /// Path to kiosk.toml (defaults to the kiosk home directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the feedback API server
    Serve {
        /// Port to listen on (overrides config)
        #[arg(long)]
        port: Option<u16>,
        /// Use an in-memory store instead of the redb file
        #[arg(long)]
        memory: bool,
    },
    /// Submit feedback for a demo video
    Submit {
        /// Video id the feedback is about
        video_id: String,
        /// Video title, for the spreadsheet row
        #[arg(long, default_value = "")]
        title: String,
        /// Thumbs: "up" or "down"
        #[arg(long)]
        sentiment: Option<String>,
        /// Free-form comment (truncated to 500 characters)
        #[arg(long)]
        comment: Option<String>,
        /// Contact email, if the visitor consented
        #[arg(long)]
        email: Option<String>,
        /// Spreadsheet endpoint (overrides config)
        #[arg(long)]
        endpoint: Option<String>,
    },
    /// Export stored feedback as CSV
    Export {
        /// Write to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Column schema (overrides config)
        #[arg(long, value_enum)]
        schema: Option<CsvSchema>,
    },
    /// List the demo video catalog
    Videos {
        /// Catalog path or URL (overrides config)
        #[arg(long)]
        source: Option<String>,
        /// Include local analytics tallies per demo
        #[arg(long)]
        stats: bool,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Commands::Serve { port, memory } => commands::serve::execute(&config, port, memory).await,
        Commands::Submit {
            video_id,
            title,
            sentiment,
            comment,
            email,
            endpoint,
        } => {
            commands::submit::execute(
                &config, video_id, title, sentiment, comment, email, endpoint,
            )
            .await
        },
        Commands::Export { output, schema } => {
            commands::export::execute(&config, output, schema).await
        },
        Commands::Videos { source, stats } => {
            commands::videos::execute(&config, source, stats).await
        },
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "kiosk",
                &mut std::io::stdout(),
            );
            Ok(())
        },
    }
}
