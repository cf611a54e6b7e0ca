use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "giron")]
#[command(about = "Giron - persona-driven strategy discussion", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a discussion over a strategy document
    Run {
        /// Read the document from this file instead of stdin
        #[arg(long)]
        file: Option<PathBuf>,
        /// Seconds between persona turns
        #[arg(long)]
        interval: Option<u64>,
        /// Where to export the transcript when the discussion ends
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Manage the persona roster
    Personas {
        #[command(subcommand)]
        action: PersonasAction,
    },
}

#[derive(Subcommand)]
enum PersonasAction {
    /// List registered personas
    List,
    /// Register a new persona
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        role: String,
        /// Stance toward the document (賛成派, 中立派, 懐疑派, ...)
        #[arg(long)]
        position: String,
        #[arg(long)]
        speaking_style: String,
        #[arg(long)]
        icon: Option<String>,
        /// Portrait image to upload
        #[arg(long)]
        image: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            file,
            interval,
            output,
        } => commands::run::execute(file, interval, output).await,
        Commands::Personas { action } => match action {
            PersonasAction::List => commands::personas::list().await,
            PersonasAction::Add {
                name,
                role,
                position,
                speaking_style,
                icon,
                image,
            } => {
                commands::personas::add(name, role, position, speaking_style, icon, image).await
            }
        },
    }
}
