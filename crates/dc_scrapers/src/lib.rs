pub mod cli;
pub mod logging;
pub mod profile;
pub mod scrapers;

pub use cli::{handle_command, ScraperArgs, ScraperCommands};
pub use logging::{init_logging, Logger};
pub use profile::FeedProfile;
pub use scrapers::droidcon::DroidconScraper;
