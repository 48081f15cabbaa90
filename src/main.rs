//! Docqa CLI - serve the document Q&A service or run the pipeline once

use clap::{Parser, Subcommand};
use docqa::config::{self, DocqaConfig};
use docqa::qa::QaEngine;
use docqa::server::{start_server, AppState};
use docqa::store::memory::{MemoryDocumentStore, MemoryQuestionStore};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "docqa")]
#[command(version = "0.0.1")]
#[command(about = "Document Q&A service - upload documents, ask questions, get extractive answers")]
#[command(long_about = r#"
Docqa keeps documents in injected in-memory stores and answers questions by
keyword overlap:
  • Upload, list, search and delete documents over HTTP
  • Ask questions answered from the first matching sentences
  • Admin surface for user oversight, gated at the boundary

Example usage:
  docqa serve --port 8080 --demo
  docqa ask --path ./docs --question "How do I upload a document?"
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP service
    Serve {
        /// Port to bind (overrides the config file)
        #[arg(short, long)]
        port: Option<u16>,

        /// Path to the config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Seed the demo document, question and users
        #[arg(long)]
        demo: bool,

        /// Processing delay in milliseconds (overrides the config file)
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Directory of .txt/.md files to load at startup
        #[arg(long)]
        seed_dir: Option<PathBuf>,
    },

    /// Load a directory of documents and answer a single question
    Ask {
        /// The question to ask
        #[arg(short, long)]
        question: String,

        /// Directory of .txt/.md files to load as documents
        #[arg(long, default_value = "./docs")]
        path: PathBuf,

        /// User id to record as the asker
        #[arg(short, long, default_value = "cli")]
        user: String,
    },

    /// Write a default config file
    Init {
        /// Where to write the config
        #[arg(long, default_value = "docqa.toml")]
        path: PathBuf,

        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Serve {
            port,
            config,
            demo,
            delay_ms,
            seed_dir,
        } => {
            let file_config = config::load_config(config.as_deref())?.unwrap_or_default();

            let port = port.unwrap_or_else(|| file_config.port());
            let delay = delay_ms
                .map(Duration::from_millis)
                .unwrap_or_else(|| file_config.processing_delay());

            let state = if demo {
                println!("🧪 Seeding demo document, question and users");
                Arc::new(AppState::demo(delay).await)
            } else {
                Arc::new(AppState::in_memory(delay))
            };

            let seed_dir = seed_dir.or_else(|| file_config.seed_dir.clone().map(PathBuf::from));
            if let Some(dir) = seed_dir {
                let loaded =
                    docqa::ingest::load_directory(state.documents.as_ref(), &dir, "seed").await?;
                println!("🗂️  Loaded {} documents from {:?}", loaded.len(), dir);
            }

            start_server(port, state).await?;
        }

        Commands::Ask { question, path, user } => {
            let documents = MemoryDocumentStore::new();
            let questions = MemoryQuestionStore::new();

            let loaded = docqa::ingest::load_directory(&documents, &path, &user).await?;
            println!("🗂️  Loaded {} documents from {:?}", loaded.len(), path);

            let engine = QaEngine::new(&documents, &questions);
            let record = engine.ask_question(&question, &user).await;

            println!("❓ {}", record.question);
            println!("💬 {}", record.answer);
            if record.document_references.is_empty() {
                println!("📎 No documents referenced.");
            } else {
                println!("📎 Referenced: {}", record.document_references.join(", "));
            }
        }

        Commands::Init { path, force } => {
            config::write_config(&path, &DocqaConfig::default(), force)?;
            println!("✅ Config written to {:?}", path);
        }
    }

    Ok(())
}
