use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "nutrigraph", version)]
#[command(about = "Render per-serving nutrition infographics from a nutrient sheet")]
struct Cli {
    /// Serving-request list: identifier / grams / description triples.
    #[arg(long = "requests")]
    requests: PathBuf,

    /// Comma-delimited nutrient sheet.
    #[arg(long = "dataset")]
    dataset: PathBuf,

    /// Output directory (created if missing).
    #[arg(long = "out")]
    out_dir: PathBuf,

    /// Font file used for all captions (one weight, four sizes).
    #[arg(long = "font")]
    font: PathBuf,

    /// Optional theme JSON overriding colors and font sizes.
    #[arg(long = "theme")]
    theme: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let theme = match &cli.theme {
        Some(path) => read_theme_json(path)?,
        None => nutrigraph::Theme::default(),
    };

    std::fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("create output dir '{}'", cli.out_dir.display()))?;

    let options = nutrigraph::BatchOptions {
        requests: cli.requests,
        dataset: cli.dataset,
        out_dir: cli.out_dir,
        font: cli.font,
        theme,
    };

    let summary = nutrigraph::run_batch(&options)?;
    eprintln!(
        "{} written, {} skipped of {} requested",
        summary.written, summary.skipped, summary.requested
    );
    Ok(())
}

fn read_theme_json(path: &Path) -> anyhow::Result<nutrigraph::Theme> {
    let f = File::open(path).with_context(|| format!("open theme '{}'", path.display()))?;
    let r = BufReader::new(f);
    let theme: nutrigraph::Theme =
        serde_json::from_reader(r).with_context(|| "parse theme JSON")?;
    Ok(theme)
}
