//! CLI binary for paper-thumbs.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ThumbnailConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use paper_thumbs::{
    generate, inspect, FileError, ProgressCallback, ThumbnailConfig, ThumbnailProgressCallback,
    ThumbnailResult,
};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: a bar anchored at the bottom of the terminal
/// plus one log line per PDF.
struct CliProgressCallback {
    bar: ProgressBar,
    errors: AtomicUsize,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0);
        let style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} PDFs  \
             ⏱ {elapsed_precise}  {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(style);
        bar.set_prefix("Rendering");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            errors: AtomicUsize::new(0),
        })
    }
}

impl ThumbnailProgressCallback for CliProgressCallback {
    fn on_batch_start(&self, total_files: usize) {
        self.bar.set_length(total_files as u64);
        self.bar.reset_eta();
    }

    fn on_file_start(&self, _index: usize, _total: usize, pdf: &Path) {
        self.bar
            .set_message(pdf.file_name().unwrap_or_default().to_string_lossy().into_owned());
    }

    fn on_file_complete(&self, index: usize, total: usize, result: &ThumbnailResult) {
        let size = match result.dimensions {
            Some((w, h)) => format!("{w}x{h}"),
            None => "?".to_string(),
        };
        self.bar.println(format!(
            "  {} [{}/{}] {}  {}",
            green("✓"),
            index,
            total,
            result.web_thumb,
            dim(&format!("{size} (scale-to {})", result.scale_to)),
        ));
        self.bar.inc(1);
    }

    fn on_file_error(&self, index: usize, total: usize, pdf: &Path, error: &FileError) {
        self.errors.fetch_add(1, Ordering::SeqCst);

        let msg = error.to_string();
        let first_line = msg.lines().next().unwrap_or_default();
        self.bar.println(format!(
            "  {} [{}/{}] {}  {}",
            red("✗"),
            index,
            total,
            pdf.display(),
            red(first_line),
        ));
        self.bar.inc(1);
    }

    fn on_batch_complete(&self, total_files: usize, success_count: usize) {
        self.bar.finish_and_clear();
        let failed = self.errors.load(Ordering::SeqCst);
        if failed == 0 {
            eprintln!(
                "{} {} thumbnails rendered",
                green("✔"),
                bold(&success_count.to_string())
            );
        } else {
            eprintln!(
                "{} {}/{} thumbnails rendered  ({} failed)",
                if success_count == 0 { red("✘") } else { cyan("⚠") },
                bold(&success_count.to_string()),
                total_files,
                red(&failed.to_string()),
            );
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Defaults: public/assets/papers → public/assets/paper_thumbs
  paper-thumbs

  # Custom locations and a smaller box
  paper-thumbs --papers-dir docs/pdf --out-dir docs/thumbs --max-width 400 --max-height 600

  # Only top-level PDFs
  paper-thumbs --glob '*.pdf'

  # Show what scale a single PDF would get
  paper-thumbs --inspect-only public/assets/papers/attention.pdf

  # Machine-readable summary
  paper-thumbs --json > batch.json

REQUIREMENTS:
  pdftoppm and pdfinfo from poppler-utils must be on PATH
  (e.g. sudo apt-get install poppler-utils, brew install poppler).

ENVIRONMENT VARIABLES:
  PAPER_THUMBS_PDFTOPPM   Rasteriser executable (default: pdftoppm)
  PAPER_THUMBS_PDFINFO    Page-size probe executable (default: pdfinfo)
  RUST_LOG                Override log filter (e.g. paper_thumbs=debug)
"#;

/// Make PNG thumbnails (first page) for PDFs using pdftoppm.
#[derive(Parser, Debug)]
#[command(
    name = "paper-thumbs",
    version,
    about = "Make PNG thumbnails (first page) for PDFs using pdftoppm",
    long_about = "Render the first page of every PDF under a directory to a PNG that fits \
a max width x height box, mirroring the directory structure, and write a pdf,thumb CSV \
manifest of web-root-relative paths.",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Where PDFs live. Default: public/assets/papers or src/assets/papers.
    #[arg(long, env = "PAPER_THUMBS_PAPERS_DIR")]
    papers_dir: Option<PathBuf>,

    /// Where thumbnails go. Default: public/assets/paper_thumbs.
    #[arg(long, env = "PAPER_THUMBS_OUT_DIR")]
    out_dir: Option<PathBuf>,

    /// CSV: pdf,thumb. Default: public/assets/papers_thumbnails.csv.
    #[arg(long, env = "PAPER_THUMBS_CSV_OUT")]
    csv_out: Option<PathBuf>,

    /// PDF glob relative to the papers dir.
    #[arg(long, env = "PAPER_THUMBS_GLOB", default_value = "**/*.pdf")]
    glob: String,

    /// Maximum thumbnail width in pixels.
    #[arg(long, env = "PAPER_THUMBS_MAX_WIDTH", default_value_t = 900,
          value_parser = clap::value_parser!(u32).range(1..))]
    max_width: u32,

    /// Maximum thumbnail height in pixels.
    #[arg(long, env = "PAPER_THUMBS_MAX_HEIGHT", default_value_t = 1200,
          value_parser = clap::value_parser!(u32).range(1..))]
    max_height: u32,

    /// Project root. Default: nearest ancestor with a package.json.
    #[arg(long, env = "PAPER_THUMBS_PROJECT_ROOT")]
    project_root: Option<PathBuf>,

    /// pdfinfo executable.
    #[arg(long, env = "PAPER_THUMBS_PDFINFO", default_value = "pdfinfo")]
    pdfinfo: PathBuf,

    /// pdftoppm executable.
    #[arg(long, env = "PAPER_THUMBS_PDFTOPPM", default_value = "pdftoppm")]
    pdftoppm: PathBuf,

    /// Web prefix for the pdf column.
    #[arg(long, default_value = "/assets/papers")]
    papers_prefix: String,

    /// Web prefix for the thumb column.
    #[arg(long, default_value = "/assets/paper_thumbs")]
    thumbs_prefix: String,

    /// Probe a single PDF and print its page size and scale; render nothing.
    #[arg(long, value_name = "PDF")]
    inspect_only: Option<PathBuf>,

    /// Print the batch result as JSON on stdout.
    #[arg(long)]
    json: bool,

    /// Disable progress bar.
    #[arg(long)]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn shows_progress(&self) -> bool {
        !self.quiet && !self.no_progress && !self.json && self.inspect_only.is_none()
    }

    /// Default tracing filter when `RUST_LOG` is unset.
    ///
    /// The progress bar already shows per-file progress, so INFO lines are
    /// dropped while it is active; warnings (missing tools, fallback scale)
    /// still get through.
    fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else if self.shows_progress() {
            "warn"
        } else {
            "info"
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let show_progress = cli.shows_progress();
    let filter = cli.log_filter();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let cli_progress = show_progress.then(CliProgressCallback::new);
    let progress_cb = cli_progress
        .clone()
        .map(|cb| cb as Arc<dyn ThumbnailProgressCallback>);
    let config = build_config(&cli, progress_cb)?;

    // ── Inspect-only mode ────────────────────────────────────────────────
    if let Some(ref pdf) = cli.inspect_only {
        let info = inspect(pdf, &config)
            .await
            .context("Failed to inspect PDF")?;
        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&info).context("Failed to serialise inspection")?
            );
        } else {
            println!("File:       {}", info.pdf_path.display());
            match info.page_size {
                Some(size) => println!(
                    "Page size:  {} x {} pts",
                    size.width_pts, size.height_pts
                ),
                None => println!("Page size:  unknown (fallback scale)"),
            }
            println!("Scale-to:   {}", info.scale_to);
        }
        return Ok(());
    }

    // ── Run batch ────────────────────────────────────────────────────────
    let output = match generate(&config).await {
        Ok(output) => output,
        Err(e) => {
            // Clear the bar before anyhow prints the error.
            if let Some(ref cb) = cli_progress {
                cb.bar.finish_and_clear();
            }
            return Err(e).context("Thumbnail generation failed");
        }
    };

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&output).context("Failed to serialise output")?
        );
    } else if !cli.quiet {
        eprintln!(
            "{} Wrote {} rows -> {}",
            if output.is_complete() { green("✔") } else { cyan("⚠") },
            output.stats.succeeded,
            bold(&output.manifest_path.display().to_string()),
        );
        if let Some(first) = output.results.first() {
            eprintln!("    Example row:");
            eprintln!("    {}, {}", first.web_pdf, first.web_thumb);
        }
        if output.stats.probe_fallbacks > 0 {
            eprintln!(
                "    {}",
                dim(&format!(
                    "{} PDFs used the fallback scale (no page size from pdfinfo)",
                    output.stats.probe_fallbacks
                ))
            );
        }
    }

    Ok(())
}

/// Map CLI args to `ThumbnailConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ThumbnailConfig> {
    let mut builder = ThumbnailConfig::builder()
        .pattern(cli.glob.clone())
        .max_width(cli.max_width)
        .max_height(cli.max_height)
        .pdfinfo(cli.pdfinfo.clone())
        .pdftoppm(cli.pdftoppm.clone())
        .papers_web_prefix(cli.papers_prefix.clone())
        .thumbs_web_prefix(cli.thumbs_prefix.clone());

    if let Some(ref root) = cli.project_root {
        builder = builder.project_root(root.clone());
    }
    if let Some(ref dir) = cli.papers_dir {
        builder = builder.papers_dir(dir.clone());
    }
    if let Some(ref dir) = cli.out_dir {
        builder = builder.thumbs_dir(dir.clone());
    }
    if let Some(ref path) = cli.csv_out {
        builder = builder.manifest_path(path.clone());
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}
