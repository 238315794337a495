use async_trait::async_trait;
use dc_core::{ArticlePage, ArticleSource, Error, Result, SourceMetadata};
use reqwest::redirect::Policy;
use reqwest::Client;
use crate::logging::Logger;
use crate::profile::FeedProfile;

pub mod parser;
pub mod request;

const MAX_REDIRECTS: usize = 10;

/// Fetches talk pages from the conference site's grid endpoint.
#[derive(Debug, Clone)]
pub struct DroidconScraper {
    profile: FeedProfile,
    client: Client,
    logger: Logger,
}

impl DroidconScraper {
    /// Builds a scraper with its own HTTP client configured from the profile.
    pub fn new(profile: FeedProfile) -> Result<Self> {
        let client = build_client(&profile)?;
        Self::with_client(profile, client)
    }

    /// Builds a scraper around an existing client, so one client can be
    /// shared by everything that talks to the site.
    pub fn with_client(profile: FeedProfile, client: Client) -> Result<Self> {
        profile.validate()?;
        let logger = Logger::new().with_prefix(format!("[droidcon:{}]", profile.name));
        Ok(Self {
            profile,
            client,
            logger,
        })
    }

    pub fn profile(&self) -> &FeedProfile {
        &self.profile
    }

    async fn fetch_html(&self, page: u32) -> Result<String> {
        let fields = request::form_fields(page, &self.profile)?;
        let url = self.profile.request_url();
        let logger = self.logger.clone().with_prefix(format!("[page {}]", page));

        if self.profile.debug {
            logger.debug(&format!("POST {} form={:?}", url, fields));
        }

        let response = self.client.post(&url).form(&fields).send().await?;
        let status = response.status();
        if !status.is_success() {
            logger.warn(&format!("request failed with status {}", status));
            return Err(Error::Status(status.as_u16()));
        }

        let html = response.text().await?;
        if self.profile.debug {
            logger.debug(&format!("{} response, {} bytes", status, html.len()));
        }
        Ok(html)
    }
}

/// HTTP client with the fetcher's timeouts and redirect policy.
pub fn build_client(profile: &FeedProfile) -> Result<Client> {
    Client::builder()
        .timeout(profile.timeout)
        .connect_timeout(profile.timeout)
        .redirect(Policy::limited(MAX_REDIRECTS))
        .connection_verbose(profile.debug)
        .build()
        .map_err(Error::from)
}

#[async_trait]
impl ArticleSource for DroidconScraper {
    fn source_metadata(&self) -> SourceMetadata {
        SourceMetadata {
            name: "droidcon",
            emoji: "🤖",
        }
    }

    async fn fetch_page(&self, page: u32) -> Result<ArticlePage> {
        if page == 0 {
            return Err(Error::Config("pages are numbered from 1".to_string()));
        }

        let html = self.fetch_html(page).await?;
        let article_page = parser::parse_html(&html, &self.profile);
        self.logger.info(&format!(
            "page {}/{}: {} articles",
            article_page.pagination.current_page,
            article_page.pagination.total_pages,
            article_page.articles.len()
        ));
        Ok(article_page)
    }
}
