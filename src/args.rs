use clap::{ArgGroup, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "page-verdict")]
#[command(about = "Extracts the text of a page and fact-checks it against a verification service")]
#[command(version)]
#[command(group(ArgGroup::new("source").required(true).args(["url", "html_file", "text"])))]
pub struct Args {
    /// Open this URL in a WebDriver-controlled browser and analyze it
    #[arg(short, long)]
    pub url: Option<String>,

    /// Analyze a saved HTML document
    #[arg(long)]
    pub html_file: Option<PathBuf>,

    /// URL to report for --html-file (drives video detection)
    #[arg(long, requires = "html_file", default_value = "file:///local")]
    pub page_url: String,

    /// Analyze pasted text directly
    #[arg(short, long)]
    pub text: Option<String>,

    /// Verification service endpoint (overrides the configuration)
    #[arg(short, long)]
    pub endpoint: Option<String>,

    /// Path to a JSON configuration file
    #[arg(short, long)]
    pub config_file: Option<PathBuf>,

    /// Maximum number of characters to extract
    #[arg(long)]
    pub max_content_length: Option<usize>,

    /// Print the extracted content instead of analyzing it
    #[arg(long, conflicts_with = "text")]
    pub extract_only: bool,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}
