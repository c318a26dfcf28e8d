use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use product_scraper::logging::init_logging;
use product_scraper::report::{
    default_report_filename, render_failure_guidance, render_summary, save_report, ScrapeReport,
};
use product_scraper::{Scraper, ScraperConfig};

/// Extract product listings from a web page
#[derive(Parser, Debug)]
#[command(name = "product-scraper", version)]
struct Args {
    /// Page to scrape (defaults to the config file's base_url)
    #[arg(short, long)]
    url: Option<String>,

    /// User agent sent by every fetch strategy
    #[arg(long)]
    user_agent: Option<String>,

    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Report path (default: <site>-products-<date>.json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Never launch a headless browser
    #[arg(long)]
    no_browser: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = init_logging(args.verbose) {
        eprintln!("failed to initialize logging: {}", e);
    }

    let mut config = match &args.config {
        Some(path) => match ScraperConfig::from_json_file(path) {
            Ok(c) => c,
            Err(e) => {
                error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => ScraperConfig::default(),
    };
    if let Some(url) = args.url {
        config.base_url = url;
    }
    if let Some(user_agent) = args.user_agent {
        config.user_agent = user_agent;
    }
    if args.no_browser {
        config.enable_browser = false;
    }

    let scraper = match Scraper::new(config) {
        Ok(s) => s,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let products = scraper.scrape();

    if products.is_empty() {
        println!("{}", render_failure_guidance());
        return ExitCode::SUCCESS;
    }

    let source = &scraper.config().base_url;
    let path = args.output.unwrap_or_else(|| {
        PathBuf::from(default_report_filename(source, chrono::Utc::now().date_naive()))
    });

    let saved = save_report(&path, &ScrapeReport::new(source, &products));
    println!("{}", render_summary(&products));

    match saved {
        Ok(path) => {
            info!("Products saved to {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Error saving products: {}", e);
            ExitCode::FAILURE
        }
    }
}
