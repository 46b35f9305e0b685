//! Tweets and user profiles from twitter's private graphql api, using a guest
//! token instead of an account.
//!
//! ```no_run
//! # async fn demo() -> Result<(), twitter_guest_scraper::ScraperError> {
//! use futures::{pin_mut, StreamExt};
//! use twitter_guest_scraper::{ScraperOptions, TweetsScraper};
//!
//! let mut scraper = TweetsScraper::new(["1737324434359202275"], ScraperOptions::default())?;
//! let tweets = scraper.get_items();
//! pin_mut!(tweets);
//! while let Some(tweet) = tweets.next().await {
//!   println!("{:?}", tweet?);
//! }
//! # Ok(()) }
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod features;
pub mod fetch;
pub mod guest_token;
pub mod parsing;
pub mod tweets;
pub mod types;
pub mod users;

pub use config::{ScraperConfig, ScraperOptions};
pub use error::ScraperError;
pub use fetch::{ApiSession, HttpSession};
pub use guest_token::GuestTokenManager;
pub use tweets::TweetsScraper;
pub use types::{Tombstone, Tweet, TweetItem, TweetMedia, TweetURLs, User};
pub use users::UsersScraper;

#[cfg(test)]
mod test_support;
