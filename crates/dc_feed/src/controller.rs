use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use dc_core::{ArticlePage, ArticleSource, Article, Result};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use crate::merge::merge_unique;
use crate::state::FeedState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadMode {
    Replace,
    Append,
}

struct Inner {
    articles: Vec<Article>,
    /// Last page reported by a successful fetch; 0 before the first one.
    cursor: u32,
    total_pages: u32,
    generation: u64,
    task: Option<JoinHandle<()>>,
}

struct Shared {
    source: Arc<dyn ArticleSource>,
    inner: Mutex<Inner>,
    state_tx: watch::Sender<FeedState>,
}

/// Owns the accumulated talk list and the page cursor, and publishes a
/// [`FeedState`] for the presentation layer to observe.
///
/// At most one fetch is in flight. `refresh` replaces whatever is running;
/// `load_more` is ignored while the state is `Loading`. Results from a
/// superseded fetch are dropped.
pub struct FeedController {
    shared: Arc<Shared>,
}

impl FeedController {
    /// Creates the controller and immediately starts fetching page 1.
    /// Must be called from within a Tokio runtime.
    pub fn new(source: Arc<dyn ArticleSource>) -> Self {
        let controller = Self::idle(source);
        controller.refresh();
        controller
    }

    /// Creates the controller in `Loading([])` without starting a fetch.
    pub fn idle(source: Arc<dyn ArticleSource>) -> Self {
        let (state_tx, _) = watch::channel(FeedState::default());
        Self {
            shared: Arc::new(Shared {
                source,
                inner: Mutex::new(Inner {
                    articles: Vec::new(),
                    cursor: 0,
                    total_pages: 0,
                    generation: 0,
                    task: None,
                }),
                state_tx,
            }),
        }
    }

    pub fn state(&self) -> FeedState {
        self.shared.state_tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FeedState> {
        self.shared.state_tx.subscribe()
    }

    /// Waits until no fetch is in flight and returns that state.
    pub async fn settled(&self) -> FeedState {
        let mut rx = self.subscribe();
        let settled = match rx.wait_for(|state| !state.is_loading()).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        };
        settled
    }

    pub fn cursor(&self) -> u32 {
        self.shared.lock().cursor
    }

    pub fn total_pages(&self) -> u32 {
        self.shared.lock().total_pages
    }

    /// Whether the last reported pagination promises another page. Advisory:
    /// `load_more` does not consult it.
    pub fn has_more(&self) -> bool {
        let inner = self.shared.lock();
        inner.cursor < inner.total_pages
    }

    /// Fetches page 1 and replaces the accumulated list with it. Any fetch
    /// already running is aborted.
    pub fn refresh(&self) {
        let mut inner = self.shared.lock();
        if let Some(task) = inner.task.take() {
            debug!("refresh supersedes in-flight fetch");
            task.abort();
        }
        Shared::start(&self.shared, &mut inner, 1, LoadMode::Replace);
    }

    /// Fetches the page after the cursor and appends it. No-op while a fetch
    /// is in flight, so it is safe to call on every scroll event.
    pub fn load_more(&self) {
        let mut inner = self.shared.lock();
        if self.shared.state_tx.borrow().is_loading() {
            return;
        }
        let next = inner.cursor + 1;
        Shared::start(&self.shared, &mut inner, next, LoadMode::Append);
    }
}

impl Drop for FeedController {
    fn drop(&mut self) {
        if let Some(task) = self.shared.lock().task.take() {
            task.abort();
        }
    }
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn start(shared: &Arc<Shared>, inner: &mut Inner, page: u32, mode: LoadMode) {
        inner.generation += 1;
        let generation = inner.generation;

        let shown = match mode {
            LoadMode::Replace => Vec::new(),
            LoadMode::Append => inner.articles.clone(),
        };
        shared.state_tx.send_replace(FeedState::Loading { articles: shown });

        let metadata = shared.source.source_metadata();
        info!("{} Fetching {} page {}", metadata.emoji, metadata.name, page);

        let task_shared = Arc::clone(shared);
        inner.task = Some(tokio::spawn(async move {
            let result = task_shared.source.fetch_page(page).await;
            task_shared.complete(generation, mode, result);
        }));
    }

    fn complete(&self, generation: u64, mode: LoadMode, result: Result<ArticlePage>) {
        let mut inner = self.lock();
        if inner.generation != generation {
            debug!("Dropping result of superseded fetch #{}", generation);
            return;
        }
        inner.task = None;

        match result {
            Ok(page) => {
                let existing = match mode {
                    LoadMode::Replace => Vec::new(),
                    LoadMode::Append => std::mem::take(&mut inner.articles),
                };
                inner.articles = merge_unique(existing, page.articles);
                inner.cursor = page.pagination.current_page;
                inner.total_pages = page.pagination.total_pages;
                info!(
                    "✅ Page {}/{} loaded, {} articles total",
                    inner.cursor,
                    inner.total_pages,
                    inner.articles.len()
                );
                self.state_tx.send_replace(FeedState::Success {
                    articles: inner.articles.clone(),
                });
            }
            Err(e) => {
                warn!("❌ Fetch failed: {}", e);
                self.state_tx.send_replace(FeedState::Error {
                    articles: inner.articles.clone(),
                    message: e.to_string(),
                });
            }
        }
    }
}
