//! Turns a directory of HTML pages into the flat corpus file the index is
//! built from: one `title \x03 content \x03 url` line per page.

use anyhow::{bail, Context, Result};
use docsearch_core::CorpusRecord;
use lazy_static::lazy_static;
use scraper::{Html, Selector};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

lazy_static! {
    static ref TITLE: Selector = Selector::parse("title").expect("valid selector");
}

#[derive(Debug, Clone)]
pub struct ParseOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub url_prefix: String,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ParseStats {
    pub written: usize,
    pub skipped: usize,
}

/// All `.html` files under `root`, sorted so the corpus order is stable.
pub fn enumerate_html(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        bail!("input directory {} does not exist", root.display());
    }
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("html"))
        .collect();
    files.sort();
    Ok(files)
}

/// Extract `(title, content)` from a page. Pages without a `<title>` yield
/// `None`. Content is the text of the whole document with every tag
/// stripped, the title text included.
pub fn parse_page(html: &str) -> Option<(String, String)> {
    let doc = Html::parse_document(html);
    let title = doc.select(&TITLE).next()?.text().collect::<String>();
    let content = doc.root_element().text().collect::<String>();
    Some((title.trim().to_string(), content))
}

/// URL of a page: `prefix` joined with its path relative to the input root.
pub fn page_url(root: &Path, page: &Path, prefix: &str) -> String {
    let rel = page.strip_prefix(root).unwrap_or(page);
    let rel = rel.components().map(|c| c.as_os_str().to_string_lossy()).collect::<Vec<_>>().join("/");
    format!("{}/{}", prefix.trim_end_matches('/'), rel)
}

pub fn run(opts: &ParseOptions) -> Result<ParseStats> {
    let files = enumerate_html(&opts.input)?;
    tracing::info!(files = files.len(), input = %opts.input.display(), "enumerated html files");

    if let Some(dir) = opts.output.parent() {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let mut out = BufWriter::new(
        File::create(&opts.output).with_context(|| format!("creating {}", opts.output.display()))?,
    );

    let mut stats = ParseStats::default();
    for file in files {
        let bytes = match fs::read(&file) {
            Ok(b) => b,
            Err(e) => {
                tracing::warn!(file = %file.display(), error = %e, "skipping unreadable file");
                stats.skipped += 1;
                continue;
            }
        };
        let Some((title, content)) = parse_page(&String::from_utf8_lossy(&bytes)) else {
            tracing::warn!(file = %file.display(), "skipping page without <title>");
            stats.skipped += 1;
            continue;
        };
        let url = page_url(&opts.input, &file, &opts.url_prefix);
        CorpusRecord::new(title, content, url).write_line(&mut out)?;
        stats.written += 1;
    }
    out.flush()?;

    tracing::info!(written = stats.written, skipped = stats.skipped, output = %opts.output.display(), "corpus written");
    Ok(stats)
}
