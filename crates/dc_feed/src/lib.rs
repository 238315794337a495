pub mod controller;
pub mod merge;
pub mod state;

pub use controller::FeedController;
pub use merge::merge_unique;
pub use state::{FeedState, FeedView};
