use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "support-crawl",
    version,
    about = "Crawl support-program listings into a flat CSV dataset"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Crawl(CrawlArgs),
    Extract(ExtractArgs),
    Status(StatusArgs),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum ProfileKind {
    /// Program listings: captures detail links and splits program periods.
    Program,
    /// Agency listings: keeps an operating-agency column, no links.
    Agency,
}

impl ProfileKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Program => "program",
            Self::Agency => "agency",
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct CrawlArgs {
    #[arg(long, value_enum, default_value_t = ProfileKind::Program)]
    pub profile: ProfileKind,

    #[arg(long, default_value = ".cache/crawl")]
    pub output_dir: PathBuf,

    /// CSV destination; defaults to `<output-dir>/CCEI_crawl.csv`.
    #[arg(long)]
    pub output: Option<PathBuf>,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,

    /// JSON file overriding the built-in start URL and selectors.
    #[arg(long)]
    pub site_config: Option<PathBuf>,

    /// Pause after entering a detail page and after returning to the list.
    #[arg(long, default_value_t = 1000)]
    pub settle_ms: u64,

    /// Pause after clicking the next-page control.
    #[arg(long, default_value_t = 3000)]
    pub page_settle_ms: u64,

    /// Upper bound on waiting for the list container after a page change.
    #[arg(long, default_value_t = 10)]
    pub list_wait_secs: u64,

    /// Stop after this many list pages.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_pages: Option<u64>,

    #[arg(long)]
    pub chrome_path: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub show_browser: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    /// Saved detail page markup; may be repeated.
    #[arg(long = "input", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Detail URL recorded as `Link` for every input.
    #[arg(long)]
    pub url: Option<String>,

    #[arg(long, value_enum, default_value_t = ProfileKind::Program)]
    pub profile: ProfileKind,

    #[arg(long)]
    pub site_config: Option<PathBuf>,

    /// Write CSV here instead of printing records as JSON.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    #[arg(long, default_value = ".cache/crawl")]
    pub output_dir: PathBuf,
}
