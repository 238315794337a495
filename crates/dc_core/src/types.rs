use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One conference talk scraped from a grid card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub description: String,
    /// Canonical link to the talk, also its identity when merging pages.
    pub url: Option<String>,
    pub avatar_url: Option<String>,
    pub speaker_title: String,
    pub speaker_desc: String,
    pub tags: Vec<String>,
    pub date: NaiveDate,
}

impl Article {
    pub fn has_tag_with_prefix(&self, prefix: &str) -> bool {
        self.tags.iter().any(|tag| tag.starts_with(prefix))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub next_page_url: Option<String>,
}

impl Pagination {
    /// A single-page result: no page controls were found.
    pub fn single() -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            next_page_url: None,
        }
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::single()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ArticlePage {
    pub articles: Vec<Article>,
    pub pagination: Pagination,
}
