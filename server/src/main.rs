use anyhow::{Context, Result};
use axum::Router;
use clap::{Parser, Subcommand};
use docsearch_core::{IndexStore, Searcher};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};
use server::{build_app, run_repl};
use tokio::net::TcpListener;

#[derive(Parser)]
#[command(name = "docsearch")]
#[command(about = "Serve keyword search over a cleaned document corpus", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index and serve it over HTTP
    Serve {
        /// Corpus file produced by the parser
        #[arg(long, default_value = "data/raw_html/raw.txt")]
        corpus: String,
        /// Host to bind
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        /// Port to bind
        #[arg(long, default_value_t = 8081)]
        port: u16,
        /// Directory of static files served for unmatched paths
        #[arg(long)]
        www: Option<PathBuf>,
    },
    /// Build the index and answer queries read from stdin
    Repl {
        /// Corpus file produced by the parser
        #[arg(long, default_value = "data/raw_html/raw.txt")]
        corpus: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { corpus, host, port, www } => {
            let app: Router = build_app(&corpus, www)?;
            let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
            let listener = TcpListener::bind(addr).await?;
            tracing::info!(%addr, "server listening");
            axum::serve(listener, app).await?;
        }
        Commands::Repl { corpus } => {
            let index = IndexStore::shared(&corpus).with_context(|| format!("building index from {corpus}"))?;
            let searcher = Searcher::with_word_tokenizer(index);
            tokio::task::spawn_blocking(move || run_repl(&searcher, std::io::stdin().lock(), std::io::stdout()))
                .await??;
        }
    }
    Ok(())
}
