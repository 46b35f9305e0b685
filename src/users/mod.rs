pub mod parsing;
mod scraper;

pub use scraper::UsersScraper;

#[cfg(test)]
mod parsing_test;
