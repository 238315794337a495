use async_trait::async_trait;
use crate::types::ArticlePage;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceMetadata {
    pub name: &'static str,
    pub emoji: &'static str,
}

#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Returns the name and emoji of the feed source
    fn source_metadata(&self) -> SourceMetadata;

    /// Runs one fetch cycle for the given 1-based page
    async fn fetch_page(&self, page: u32) -> Result<ArticlePage>;
}
