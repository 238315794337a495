use dc_core::Article;

/// What the feed screen should show. Every variant carries the list to
/// render so previously fetched talks stay visible while loading or after a
/// failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedState {
    Loading { articles: Vec<Article> },
    Success { articles: Vec<Article> },
    Error { articles: Vec<Article>, message: String },
}

/// Coarse presentation decision derived from a [`FeedState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedView {
    /// Nothing to show yet; a fetch is running.
    Spinner,
    /// Nothing to show and the last fetch failed.
    Retry,
    List,
}

impl FeedState {
    pub fn articles(&self) -> &[Article] {
        match self {
            FeedState::Loading { articles }
            | FeedState::Success { articles }
            | FeedState::Error { articles, .. } => articles,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FeedState::Loading { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, FeedState::Error { .. })
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            FeedState::Error { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn view(&self) -> FeedView {
        match self {
            FeedState::Loading { articles } if articles.is_empty() => FeedView::Spinner,
            FeedState::Error { articles, .. } if articles.is_empty() => FeedView::Retry,
            _ => FeedView::List,
        }
    }
}

impl Default for FeedState {
    fn default() -> Self {
        FeedState::Loading { articles: Vec::new() }
    }
}
