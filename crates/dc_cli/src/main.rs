use std::sync::Arc;
use std::time::Duration;
use anyhow::Context;
use clap::Parser;
use dc_core::ArticleSource;
use dc_feed::{FeedController, FeedState, FeedView};
use dc_scrapers::cli::{format_article, handle_command, ScraperArgs};
use dc_scrapers::scrapers::droidcon::build_client;
use dc_scrapers::{init_logging, DroidconScraper, FeedProfile};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Browse droidcon conference talks from the terminal", long_about = None)]
pub struct Cli {
    /// Log outgoing requests and responses
    #[arg(long, global = true)]
    debug: bool,
    /// Feed profile: `all` or `tag:<event-tag>`
    #[arg(long, global = true, default_value = "all")]
    profile: String,
    /// Prefix prepended to request and avatar URLs (e.g. a CORS proxy)
    #[arg(long, global = true, env = "DCTALKS_PROXY")]
    proxy: Option<String>,
    /// Talks requested per page
    #[arg(long, global = true)]
    page_size: Option<u32>,
    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = 30)]
    timeout: u64,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Load the talk feed page by page
    Feed {
        /// Number of pages to load
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        pages: u32,
        /// Print the accumulated list as JSON
        #[arg(long)]
        json: bool,
    },
    /// Low-level scraper commands
    Scrape(ScraperArgs),
}

impl Cli {
    fn feed_profile(&self) -> dc_core::Result<FeedProfile> {
        let mut profile = FeedProfile::by_name(&self.profile)?
            .with_proxy(self.proxy.clone())
            .with_debug(self.debug)
            .with_timeout(Duration::from_secs(self.timeout));
        if let Some(page_size) = self.page_size {
            profile = profile.with_page_size(page_size);
        }
        profile.validate()?;
        Ok(profile)
    }
}

async fn run_feed(source: Arc<dyn ArticleSource>, pages: u32, json: bool) -> anyhow::Result<()> {
    let controller = FeedController::new(source);
    let mut state = controller.settled().await;

    for _ in 1..pages {
        if state.is_error() || !controller.has_more() {
            break;
        }
        controller.load_more();
        state = controller.settled().await;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(state.articles())?);
    } else {
        render(&state);
    }
    Ok(())
}

fn render(state: &FeedState) {
    match state.view() {
        FeedView::Spinner => println!("⏳ Loading talks..."),
        FeedView::Retry => {
            println!("⚠️ Could not load talks: {}", state.message().unwrap_or("unknown error"));
            println!("Run the command again to retry.");
        }
        FeedView::List => {
            for article in state.articles() {
                println!("{}", format_article(article));
            }
            println!("🎤 {} talks", state.articles().len());
            if let Some(message) = state.message() {
                println!("⚠️ Stopped early: {}", message);
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let profile = cli.feed_profile().context("invalid feed configuration")?;
    // one client for the whole process, handed to every consumer
    let client = build_client(&profile)?;
    let scraper = DroidconScraper::with_client(profile, client)?;
    info!("Using profile {}", scraper.profile().name);

    match cli.command {
        Commands::Feed { pages, json } => run_feed(Arc::new(scraper), pages, json).await?,
        Commands::Scrape(args) => handle_command(args, &scraper).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_builds_profile() {
        let cli = Cli::parse_from([
            "dctalks",
            "--profile",
            "tag:droidcon-berlin",
            "--proxy",
            "https://proxy.example/?",
            "--page-size",
            "20",
            "feed",
            "--pages",
            "2",
        ]);
        let profile = cli.feed_profile().unwrap();
        assert_eq!(profile.event_tags, vec!["droidcon-berlin".to_string()]);
        assert_eq!(profile.page_size, 20);
        assert_eq!(profile.proxy_prefix.as_deref(), Some("https://proxy.example/?"));
        assert!(matches!(cli.command, Commands::Feed { pages: 2, json: false }));
    }

    #[test]
    fn test_cli_rejects_unknown_profile() {
        let cli = Cli::parse_from(["dctalks", "--profile", "nope", "feed"]);
        assert!(cli.feed_profile().is_err());
    }

    #[test]
    fn test_feed_rejects_zero_pages() {
        let result = Cli::try_parse_from(["dctalks", "feed", "--pages", "0"]);
        assert!(result.is_err());

        let cli = Cli::try_parse_from(["dctalks", "feed", "--pages", "1"]).unwrap();
        assert!(matches!(cli.command, Commands::Feed { pages: 1, .. }));
    }

    #[test]
    fn test_scrape_subcommand_parses() {
        let cli = Cli::parse_from(["dctalks", "scrape", "page", "3", "--json"]);
        assert!(matches!(cli.command, Commands::Scrape(_)));
    }
}
