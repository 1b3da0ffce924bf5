mod cases;
mod generate;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use courtmap_core::RegionKind;
use courtmap_site::SiteManifest;
use courtmap_sync::config::{DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "courtmap", version, about = "Build the US federal courts map site")]
struct Cli {
    /// Site source root holding `data/` and the page directories.
    #[arg(long, global = true, default_value = "src")]
    site_root: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Flatten a boundary file into the region array pages load.
    Transform {
        #[arg(long)]
        kind: RegionKind,
        /// Boundary file [default: <site-root>/data/<kind>.json]
        #[arg(long)]
        input: Option<PathBuf>,
        /// Output file, or `-` for stdout.
        #[arg(long, default_value = "-")]
        output: String,
    },
    /// Generate one Markdown page per region.
    Pages {
        #[arg(long)]
        kind: RegionKind,
        /// Boundary file [default: <site-root>/data/<kind>.json]
        #[arg(long)]
        input: Option<PathBuf>,
        /// Page directory [default: <site-root>/<kind>]
        #[arg(long)]
        out_dir: Option<PathBuf>,
        /// Also write the group's index.md.
        #[arg(long)]
        with_index: bool,
    },
    /// Fetch recent and most-cited cases for every circuit.
    FetchCases(FetchArgs),
    /// Print the site manifest.
    Manifest {
        #[arg(long, default_value = "-")]
        output: String,
    },
}

#[derive(Args, Debug, Clone)]
pub(crate) struct FetchArgs {
    #[arg(long, env = "COURTLISTENER_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,
    /// Pause after every request, in milliseconds.
    #[arg(long, default_value_t = 1000)]
    delay_ms: u64,
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: u32,
    /// Filing-date floor for the recent-cases query [default: 2024-01-01]
    #[arg(long)]
    filed_after: Option<NaiveDate>,
    /// Output file, or `-` for stdout.
    #[arg(long, default_value = "-")]
    output: String,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Write to `target`, or to stdout when it is `-`.
pub(crate) fn write_output(target: &str, contents: &str) -> anyhow::Result<()> {
    if target == "-" {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(contents.as_bytes())?;
        stdout.write_all(b"\n")?;
        return Ok(());
    }
    let path = Path::new(target);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    std::fs::write(path, contents).with_context(|| format!("writing {}", path.display()))
}

fn default_input(site_root: &Path, kind: RegionKind) -> PathBuf {
    site_root.join("data").join(kind.data_file())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    tracing::info!("courtmap v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Transform {
            kind,
            input,
            output,
        } => {
            let input = input.unwrap_or_else(|| default_input(&cli.site_root, kind));
            let count = generate::run_transform(kind, &input, &output)?;
            eprintln!("  Transformed {count} {kind}");
        }
        Command::Pages {
            kind,
            input,
            out_dir,
            with_index,
        } => {
            let input = input.unwrap_or_else(|| default_input(&cli.site_root, kind));
            let out_dir = out_dir.unwrap_or_else(|| cli.site_root.join(kind.dir_name()));
            let stats = generate::run_pages(kind, &input, &out_dir, with_index)?;
            eprintln!(
                "  Generated {} {kind} pages in {:.2}s",
                stats.pages, stats.elapsed_secs
            );
        }
        Command::FetchCases(args) => {
            let dataset = cases::run_fetch_cases(&args).await?;
            cases::print_summary(&dataset);
            let json = serde_json::to_string_pretty(&dataset).context("serialising case data")?;
            write_output(&args.output, &json)?;
        }
        Command::Manifest { output } => {
            let json = SiteManifest::default()
                .to_json()
                .context("serialising manifest")?;
            write_output(&output, &json)?;
        }
    }

    Ok(())
}
