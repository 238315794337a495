use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Scraping error: {0}")]
    Scraping(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP error: server responded with status {0}")]
    Status(u16),
}

impl Error {
    /// True for transport-level failures: timeouts, refused connections and
    /// non-success statuses.
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Http(_) | Error::Status(_))
    }
}
