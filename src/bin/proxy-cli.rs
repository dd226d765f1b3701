use std::process::ExitCode;

use clap::{Parser, Subcommand};
use reqwest::header::ACCEPT;
use serde_json::Value;
use url::Url;

#[derive(Parser)]
#[command(name = "proxy-cli")]
#[command(about = "Command-line client for a running Confluence proxy", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3001")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check proxy liveness
    Health,
    /// List pages of the configured space
    Pages,
    /// Show a single page by ID
    Page {
        /// Confluence content ID
        id: String,
    },
    /// Print the relayed theme stylesheet
    Stylesheet,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let url = endpoint(&cli.url, &cli.command)?;

    let res = client
        .get(url)
        .header(ACCEPT, "application/json, text/css")
        .send()
        .await?;

    let ok = print_response(res).await?;
    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Proxy URL for `command`; the page id is escaped as a single path segment.
fn endpoint(base: &str, command: &Commands) -> Result<Url, Box<dyn std::error::Error>> {
    let segments: Vec<&str> = match command {
        Commands::Health => vec!["health"],
        Commands::Pages => vec!["pages"],
        Commands::Page { id } => vec!["page", id.as_str()],
        Commands::Stylesheet => vec!["confluence-styles.css"],
    };

    let mut url = Url::parse(base)?;
    url.path_segments_mut()
        .map_err(|_| format!("proxy URL cannot be a base: {}", base))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

async fn print_response(res: reqwest::Response) -> Result<bool, Box<dyn std::error::Error>> {
    let status = res.status();
    let is_json = res
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"));
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: proxy returned status {}", status);
    }

    if is_json {
        let json: Value = serde_json::from_str(&text)?;
        let rendered = serde_json::to_string_pretty(&json)?;
        if status.is_success() {
            println!("{}", rendered);
        } else {
            eprintln!("{}", rendered);
        }
    } else if status.is_success() {
        println!("{}", text);
    } else {
        eprintln!("{}", text);
    }

    Ok(status.is_success())
}
