pub mod error;
pub mod source;
pub mod types;

pub use error::Error;
pub use source::{ArticleSource, SourceMetadata};
pub use types::{Article, ArticlePage, Pagination};

pub type Result<T> = std::result::Result<T, Error>;
