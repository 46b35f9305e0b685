use async_stream::stream;
use futures::Stream;
use tracing::debug;
use crate::{
  batch::{triage, Triage},
  config::ScraperOptions,
  error::{Result, ScraperError},
  features::tweet_result_request,
  fetch::{page_url, ApiSession},
  parsing::{is_empty, require},
  types::TweetItem,
};
use super::parsing::tweet_from_result;

/// looks up tweets one id at a time
pub struct TweetsScraper {
  session: ApiSession,
  tweet_ids: Vec<String>,
}

impl TweetsScraper {
  pub fn new<I, S>(tweet_ids: I, options: ScraperOptions) -> Result<Self>
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    let tweet_ids: Vec<String> = tweet_ids.into_iter().map(Into::into).collect();
    let base_url = match tweet_ids.first() {
      Some(id) => page_url(&options.config.web_base, &["i", "web", "status", id.as_str()])?,
      None => page_url(&options.config.web_base, &[])?,
    };
    let session = ApiSession::new(base_url, options)?;
    Ok(Self { session, tweet_ids })
  }

  pub fn session(&self) -> &ApiSession {
    &self.session
  }

  /// every tweet that could be found, in the order the ids were given
  ///
  /// ids that fail are logged and skipped. a guest token failure is yielded as
  /// the last item, since no later id could succeed either
  pub fn get_items(&mut self) -> impl Stream<Item = std::result::Result<TweetItem, ScraperError>> + '_ {
    stream! {
      let tweet_ids = self.tweet_ids.clone();
      for tweet_id in tweet_ids {
        match triage(&tweet_id, self.get_item(&tweet_id).await) {
          Triage::Keep(tweet) => yield Ok(tweet),
          Triage::Skip => continue,
          Triage::Abort(e) => {
            yield Err(e);
            return;
          },
        }
      }
    }
  }

  /// one tweet, or `None` if twitter returned no data for the id
  pub async fn get_item(&mut self, tweet_id: &str) -> Result<Option<TweetItem>> {
    let api_base = self.session.config().api_base.clone();
    let request = tweet_result_request(&api_base, tweet_id);
    let json = self.session.get_api_data(&request).await?;

    if is_empty(json.get("data")) {
      debug!("No data for tweet {tweet_id}");
      return Ok(None);
    }
    let result = require(&json, &["data", "tweetResult", "result"])?;
    tweet_from_result(result, tweet_id).map(Some)
  }
}
