use std::time::Duration;
use dc_core::{Error, Result};
use url::Url;

pub const DROIDCON_ENDPOINT: &str = "https://www.droidcon.com/wp-admin/admin-ajax.php";
pub const DEFAULT_PAGE_SIZE: u32 = 100;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DROIDCON_TAG_PREFIX: &str = "droidcon";

pub const ALL_DROIDCON_EVENTS: &[&str] = &[
    "droidcon-americas",
    "droidcon-apac",
    "droidcon-berlin",
    "droidcon-emea",
    "droidcon-lagos",
    "droidcon-london",
    "droidcon-new-york",
    "droidcon_san_francisco",
    "droidcon-turin",
];

/// One configuration of the grid fetcher.
///
/// The full profile filters to conference-branded cards and extracts speaker
/// metadata; the single-tag profile asks the grid for one event only and keeps
/// every card it gets back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedProfile {
    pub name: String,
    pub endpoint: String,
    pub event_tags: Vec<String>,
    pub tag_prefix_filter: Option<String>,
    /// Prepended verbatim to the request URL and to avatar URLs.
    pub proxy_prefix: Option<String>,
    pub page_size: u32,
    pub rich_fields: bool,
    pub debug: bool,
    pub timeout: Duration,
}

impl FeedProfile {
    pub fn all_droidcons() -> Self {
        Self {
            name: "all".to_string(),
            endpoint: DROIDCON_ENDPOINT.to_string(),
            event_tags: ALL_DROIDCON_EVENTS.iter().map(|t| t.to_string()).collect(),
            tag_prefix_filter: Some(DROIDCON_TAG_PREFIX.to_string()),
            proxy_prefix: None,
            page_size: DEFAULT_PAGE_SIZE,
            rich_fields: true,
            debug: false,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn single_tag(tag: &str) -> Self {
        Self {
            name: format!("tag:{}", tag),
            event_tags: vec![tag.to_string()],
            tag_prefix_filter: None,
            rich_fields: false,
            ..Self::all_droidcons()
        }
    }

    /// Resolves a CLI profile name: `all` or `tag:<event-tag>`.
    pub fn by_name(name: &str) -> Result<Self> {
        match name.split_once(':') {
            None if name == "all" => Ok(Self::all_droidcons()),
            Some(("tag", tag)) if !tag.trim().is_empty() => Ok(Self::single_tag(tag.trim())),
            _ => Err(Error::Config(format!(
                "Unknown profile '{}'. Expected: all or tag:<event-tag>",
                name
            ))),
        }
    }

    pub fn with_proxy(mut self, proxy: Option<String>) -> Self {
        self.proxy_prefix = proxy.filter(|p| !p.is_empty());
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(Error::Config("page_size must be at least 1".to_string()));
        }
        if self.event_tags.is_empty() {
            return Err(Error::Config("at least one event tag is required".to_string()));
        }
        if self.timeout.is_zero() {
            return Err(Error::Config("timeout must be non-zero".to_string()));
        }
        Url::parse(&self.request_url())
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", self.request_url(), e)))?;
        Ok(())
    }

    /// The URL the form is posted to: the endpoint behind the optional proxy.
    pub fn request_url(&self) -> String {
        self.proxied(&self.endpoint)
    }

    pub fn proxied(&self, url: &str) -> String {
        match &self.proxy_prefix {
            Some(prefix) => format!("{}{}", prefix, url),
            None => url.to_string(),
        }
    }

    pub fn joined_tags(&self) -> String {
        self.event_tags.join(",")
    }
}

impl Default for FeedProfile {
    fn default() -> Self {
        Self::all_droidcons()
    }
}
