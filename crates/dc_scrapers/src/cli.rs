use std::path::PathBuf;
use clap::{Args, Subcommand};
use dc_core::{Article, ArticlePage, ArticleSource, Result};
use crate::profile::{FeedProfile, ALL_DROIDCON_EVENTS};
use crate::scrapers::droidcon::{parser, DroidconScraper};

#[derive(Args, Debug)]
pub struct ScraperArgs {
    #[command(subcommand)]
    pub command: ScraperCommands,
}

#[derive(Subcommand, Debug)]
pub enum ScraperCommands {
    /// Run one fetch cycle for a single grid page
    Page {
        /// 1-based page number
        #[arg(default_value_t = 1)]
        page: u32,
        /// Print the page as JSON
        #[arg(long)]
        json: bool,
    },
    /// Parse a saved grid HTML fragment without touching the network
    Parse {
        file: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// List available profiles
    Profiles,
}

pub async fn handle_command(args: ScraperArgs, scraper: &DroidconScraper) -> Result<()> {
    match args.command {
        ScraperCommands::Page { page, json } => {
            let article_page = scraper.fetch_page(page).await?;
            print_page(&article_page, json)?;
        }
        ScraperCommands::Parse { file, json } => {
            let html = std::fs::read_to_string(&file)?;
            let article_page = parser::parse_html(&html, scraper.profile());
            print_page(&article_page, json)?;
        }
        ScraperCommands::Profiles => {
            println!("Available profiles:");
            println!("  all  (every droidcon event, droidcon-branded cards only)");
            for tag in ALL_DROIDCON_EVENTS {
                println!("  {}", FeedProfile::single_tag(tag).name);
            }
        }
    }
    Ok(())
}

fn print_page(page: &ArticlePage, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(page)?);
        return Ok(());
    }
    for article in &page.articles {
        println!("{}", format_article(article));
    }
    println!(
        "📄 Page {}/{} ({} articles){}",
        page.pagination.current_page,
        page.pagination.total_pages,
        page.articles.len(),
        page.pagination
            .next_page_url
            .as_deref()
            .map(|next| format!(" next: {}", next))
            .unwrap_or_default()
    );
    Ok(())
}

/// One-line terminal rendering of an article.
pub fn format_article(article: &Article) -> String {
    let mut line = format!("{} {}", article.date, article.title);
    if !article.speaker_title.is_empty() {
        line.push_str(&format!(" - {}", article.speaker_title));
    }
    if !article.tags.is_empty() {
        line.push_str(&format!(" [{}]", article.tags.join(", ")));
    }
    if let Some(url) = &article.url {
        line.push_str(&format!(" {}", url));
    }
    line
}
