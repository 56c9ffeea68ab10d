use clap::Parser;
use page_verdict::bridge::ui_agent::failure_hint;
use page_verdict::config::VerifierConfig;
use page_verdict::page::{StaticPage, WebDriverPage};
use page_verdict::results::Outcome;
use page_verdict::{AnalysisResult, PageContent, Verifier, VerifierError};
use std::process::ExitCode;
use std::sync::Arc;

mod args;
use args::Args;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            ::log::error!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let webdriver_url = config.webdriver_url.clone();

    let session = match Verifier::new(config).start() {
        Ok(session) => session,
        Err(e) => {
            ::log::error!("Failed to start verifier: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let ui = session.ui();

    // Bind the page agent to whichever page was asked for
    let mut browser = None;
    if let Some(url) = &args.url {
        ::log::info!("Opening {} over WebDriver at {}", url, webdriver_url);
        let page = match open_in_browser(&webdriver_url, url).await {
            Ok(page) => Arc::new(page),
            Err(e) => {
                report_failure(&e);
                return ExitCode::FAILURE;
            }
        };
        session.attach_page(page.clone());
        browser = Some(page);
    } else if let Some(path) = &args.html_file {
        let html = match std::fs::read_to_string(path) {
            Ok(html) => html,
            Err(e) => {
                ::log::error!("Failed to read {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        };
        session.attach_page(Arc::new(StaticPage::from_html(args.page_url.clone(), html)));
    }

    let outcome = if args.extract_only {
        ui.extract_active_page()
            .await
            .map(|page| print_page(&page, args.json))
    } else if let Some(text) = &args.text {
        ui.analyze_text(text)
            .await
            .map(|result| print_result(&result, args.json))
    } else {
        ui.analyze_active_page()
            .await
            .map(|result| print_result(&result, args.json))
    };

    session.detach_page();
    if let Some(page) = browser {
        page.close().await;
    }

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_failure(&e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(args: &Args) -> Result<VerifierConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config_file {
        Some(path) => VerifierConfig::from_file(path)?,
        None => VerifierConfig::default(),
    }
    .with_env_overrides();

    if let Some(endpoint) = &args.endpoint {
        config.endpoint = endpoint.clone();
    }
    if let Some(max) = args.max_content_length {
        config.max_content_length = max;
    }
    Ok(config)
}

async fn open_in_browser(webdriver_url: &str, url: &str) -> Result<WebDriverPage, VerifierError> {
    let page = WebDriverPage::connect(webdriver_url).await?;
    page.open(url).await?;
    Ok(page)
}

fn report_failure(error: &VerifierError) {
    eprintln!("Error: {}", error);
    if let Some(hint) = failure_hint(&error.to_string()) {
        eprintln!("{}", hint);
    }
}

fn print_page(page: &PageContent, json: bool) {
    if json {
        match serde_json::to_string_pretty(page) {
            Ok(out) => println!("{}", out),
            Err(e) => ::log::error!("Failed to serialize page: {}", e),
        }
        return;
    }
    println!("{} [{}]", page.title, page.content_type);
    println!("{}", page.url);
    println!();
    println!("{}", page.content);
}

fn print_result(result: &AnalysisResult, json: bool) {
    if json {
        match serde_json::to_string_pretty(result) {
            Ok(out) => println!("{}", out),
            Err(e) => ::log::error!("Failed to serialize result: {}", e),
        }
        return;
    }

    let tally = match result.outcome() {
        Outcome::NoClaims => {
            println!("No verifiable claims found on this page.");
            return;
        }
        Outcome::Claims(tally) => tally,
    };

    println!(
        "Supported: {}  Refuted: {}  Unclear: {}",
        tally.supported, tally.refuted, tally.unclear
    );
    for claim in &result.claims {
        println!();
        println!(
            "[{}] {:>3}%  \"{}\"",
            claim.verdict.as_str(),
            claim.confidence,
            claim.text
        );
        if let Some(evidence) = &claim.evidence {
            println!("      {}", evidence);
        }
    }
}
