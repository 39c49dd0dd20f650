use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    time::Instant,
};

use anyhow::{Context, Result};
use clap::Parser;
use tf_idf_recommender::{RecommendError, RecommenderConfig, Session};
use tracing_subscriber::EnvFilter;

/// Recommend similar books from a corpus of titles and summaries.
#[derive(Parser, Debug)]
#[command(name = "tf-idf-recommender", version, about)]
struct Cli {
    /// Corpus file (.csv, .tsv, .xls or .xlsx, with a header row)
    #[arg(short, long)]
    file: PathBuf,

    /// JSON config file; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long)]
    title_column: Option<String>,

    #[arg(long)]
    summary_column: Option<String>,

    /// Number of recommendations per query
    #[arg(short = 'k', long)]
    top_k: Option<usize>,

    /// Run one query and exit; without it an interactive prompt starts
    #[arg(short, long)]
    title: Option<String>,

    /// Print recommendations with scores as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn config(&self) -> Result<RecommenderConfig> {
        let mut config = match &self.config {
            Some(path) => RecommenderConfig::from_json_file(path)
                .with_context(|| format!("reading config {}", path.display()))?,
            None => RecommenderConfig::default(),
        };
        if let Some(c) = &self.title_column {
            config.title_column = c.clone();
        }
        if let Some(c) = &self.summary_column {
            config.summary_column = c.clone();
        }
        if let Some(k) = self.top_k {
            config.top_k = k;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config()?;

    let start = Instant::now();
    let mut session: Session = Session::new(config);
    let summary = session
        .load_file(&cli.file)
        .with_context(|| format!("loading {}", cli.file.display()))?;
    tracing::info!(
        documents = summary.documents,
        vocabulary = summary.vocabulary,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "index ready"
    );

    match &cli.title {
        Some(title) => {
            if !run_query(&session, title, cli.json)? {
                std::process::exit(1);
            }
        }
        None => run_interactive(&session, cli.json)?,
    }
    Ok(())
}

/// 1件のクエリを実行して stdout に出力
/// タイトルが見つからなければ false
fn run_query(session: &Session, title: &str, json: bool) -> Result<bool> {
    let start = Instant::now();
    let result = session.recommend_scored(title);
    tracing::debug!(elapsed_ms = start.elapsed().as_secs_f64() * 1000.0, "query done");

    let recs = match result {
        Ok(recs) => recs,
        Err(e @ RecommendError::NotFound { .. }) => {
            eprintln!("{e}");
            return Ok(false);
        }
        Err(e) => return Err(e.into()),
    };

    let mut out = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &recs)?;
        writeln!(out)?;
    } else {
        for rec in &recs {
            writeln!(out, "{}", rec.title)?;
        }
    }
    Ok(true)
}

fn run_interactive(session: &Session, json: bool) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("Title> ");
        stdout.flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("exit") || trimmed.eq_ignore_ascii_case("quit") {
            break;
        }
        run_query(session, trimmed, json)?;
    }
    tracing::info!("bye");
    Ok(())
}
