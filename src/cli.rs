use clap::{Args, Parser, Subcommand, ValueEnum};

pub const DEFAULT_BASE_URL: &str = "https://www.audible.com";

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Crawl every category listing in the seed file and export its titles.
    Crawl(CrawlArgs),
    /// Parse one saved listing page and print its records as JSON Lines.
    Parse(ParseArgs),
    /// Print the listing URLs the seed file would start crawls from.
    Seeds(SeedsArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Jsonl,
}

#[derive(Debug, Args)]
pub struct CrawlArgs {
    /// CSV file with a `title_list_url` column of listing-page URLs.
    #[arg(long)]
    pub seeds: String,

    /// Output file for the scraped titles.
    #[arg(long)]
    pub out: String,

    /// Output file format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,

    /// Site origin; relative links resolve against it and only it is fetched.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Maximum listing pages to follow per seed (default: until the last page).
    #[arg(long)]
    pub max_pages: Option<usize>,

    /// Per-request HTTP timeout.
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request.
    #[arg(long, default_value = "audible-titles/0.1")]
    pub user_agent: String,

    /// Overwrite the output file if it exists.
    #[arg(long, default_value_t = false)]
    pub force: bool,
}

#[derive(Debug, Args)]
pub struct ParseArgs {
    /// Saved listing page HTML.
    #[arg(long)]
    pub html: String,

    /// Site origin used to resolve relative links.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,
}

#[derive(Debug, Args)]
pub struct SeedsArgs {
    /// CSV file with a `title_list_url` column of listing-page URLs.
    #[arg(long)]
    pub seeds: String,
}
