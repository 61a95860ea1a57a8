use anyhow::Result;
use clap::Parser;
use parser::{run, ParseOptions};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "parser")]
#[command(about = "Strip HTML pages into a flat search corpus")]
struct Cli {
    /// Directory searched recursively for .html files
    #[arg(long, default_value = "data/input")]
    input: PathBuf,
    /// Corpus file to write
    #[arg(long, default_value = "data/raw_html/raw.txt")]
    output: PathBuf,
    /// Prefix joined with each page's relative path to form its URL
    #[arg(long, default_value = "https://www.boost.org/doc/libs/1_81_0/doc/html")]
    url_prefix: String,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();
    let opts = ParseOptions { input: cli.input, output: cli.output, url_prefix: cli.url_prefix };
    run(&opts)?;
    Ok(())
}
