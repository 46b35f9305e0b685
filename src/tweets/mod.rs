pub mod parsing;
mod scraper;

pub use scraper::TweetsScraper;
