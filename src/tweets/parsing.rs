use serde_json::Value;
use tracing::warn;
use crate::{
  error::{Result, ScraperError},
  parsing::{lookup, opt_string, opt_u64, require, require_str, typename},
  types::{Tombstone, Tweet, TweetItem, TweetMedia, TweetURLs},
};

pub fn parse_urls(json: &Value) -> Option<Vec<TweetURLs>> {
  let urls_json = json["entities"]["urls"].as_array()?;
  let urls = urls_json.iter()
    .filter_map(|url_json| Some(TweetURLs {
      shortened_url: url_json["url"].as_str()?.to_string(),
      // urls that twitter couldn't expand have no "expanded_url"
      full_url: url_json["expanded_url"].as_str()
        .or(url_json["url"].as_str())?.to_string(),
    }))
    .collect::<Vec<TweetURLs>>();
  match urls.is_empty() {
    true => None,
    false => Some(urls),
  }
}

pub fn parse_media(json: &Value) -> Option<Vec<TweetMedia>> {
  let media_json = json["extended_entities"]["media"].as_array()?;
  let media = media_json.iter()
    .filter_map(|item| {
      let shortened_img_url = item["url"].as_str()?.to_string();
      let full_img_url = item["media_url_https"].as_str()?.to_string();
      let kind = item["type"].as_str()?.to_string(); // i.e. photo or video
      let variants = item["video_info"]["variants"].as_array();

      let video_url = match kind.as_str() {
        // the .m3u8 variant has no bitrate, so it loses to every mp4
        "video" => variants.and_then(|variants| variants.iter()
          .filter(|v| v["bitrate"].is_u64())
          .max_by_key(|v| v["bitrate"].as_u64().unwrap_or(0))
          .and_then(|v| v["url"].as_str())
          .map(str::to_string)),
        // only one entry in the variants array for gifs
        "animated_gif" => variants
          .and_then(|variants| variants.first())
          .and_then(|v| v["url"].as_str())
          .map(str::to_string),
        _ => None,
      };
      Some(TweetMedia { shortened_img_url, full_img_url, kind, video_url })
    })
    .collect::<Vec<TweetMedia>>();
  match media.is_empty() {
    true => None,
    false => Some(media),
  }
}

/// convert the `tweetResult.result` object of a graphql response
///
/// `tweet_id` is the id that was asked for; it names tombstones, which carry no
/// id of their own
pub fn tweet_from_result(result: &Value, tweet_id: &str) -> Result<TweetItem> {
  let kind = typename(result).unwrap_or("Tweet");
  let result = match kind {
    // normal visible tweet
    "Tweet" => result,
    // normal-ish tweet, with the tweet one level down
    "TweetWithVisibilityResults" => require(result, &["tweet"])?,
    "TweetTombstone" => return Ok(TweetItem::Tombstone(tombstone(result, tweet_id))),
    "TweetUnavailable" => {
      let reason = opt_string(result, &["reason"]).unwrap_or_else(|| "unavailable".to_string());
      return Err(ScraperError::EntityUnavailable(format!("Tweet {tweet_id}: {reason}")));
    },
    other => return Err(ScraperError::Scraper(format!("Unknown tweet result type: {other}"))),
  };

  let tweet = parse_tweet(result)?;
  if tweet.id != tweet_id {
    warn!("Requested tweet {tweet_id} but got {}", tweet.id);
  }
  Ok(TweetItem::Tweet(Box::new(tweet)))
}

fn parse_tweet(result: &Value) -> Result<Tweet> {
  let legacy = require(result, &["legacy"])?;
  let id = require_str(legacy, &["id_str"])?.to_string();
  let user = require_str(result, &["core", "user_results", "result", "legacy", "screen_name"])?.to_string();
  // long tweets keep the untruncated text in the note tweet
  let text = match opt_string(result, &["note_tweet", "note_tweet_results", "result", "text"]) {
    Some(text) => text,
    None => require_str(legacy, &["full_text"])?.to_string(),
  };
  // a quoted tweet that can't be parsed shouldn't lose the tweet quoting it
  let quote = lookup(result, &["quoted_status_result", "result"])
    .and_then(|quoted| {
      let quoted = match typename(quoted) {
        Some("TweetWithVisibilityResults") => quoted.get("tweet")?,
        _ => quoted,
      };
      parse_tweet(quoted).ok()
    })
    .map(Box::new);

  Ok(Tweet {
    url: format!("https://twitter.com/{user}/status/{id}"),
    user_id: opt_string(legacy, &["user_id_str"]),
    date: opt_string(legacy, &["created_at"]),
    lang: opt_string(legacy, &["lang"]),
    media: parse_media(legacy),
    urls: parse_urls(legacy),
    quote,
    thread_id: opt_string(legacy, &["self_thread", "id_str"]),
    conversation_id: opt_string(legacy, &["conversation_id_str"]),
    in_reply_to_tweet_id: opt_string(legacy, &["in_reply_to_status_id_str"]),
    reply_count: opt_u64(legacy, &["reply_count"]),
    retweet_count: opt_u64(legacy, &["retweet_count"]),
    like_count: opt_u64(legacy, &["favorite_count"]),
    quote_count: opt_u64(legacy, &["quote_count"]),
    view_count: opt_u64(result, &["views", "count"]),
    id,
    user,
    text,
  })
}

fn tombstone(result: &Value, tweet_id: &str) -> Tombstone {
  // e.g. "You’re unable to view this Post because this account owner limits
  // who can view their Posts. Learn more"
  let text = opt_string(result, &["tombstone", "text", "text"])
    .map(|txt| txt.trim_end_matches("Learn more").trim_end().to_string());
  Tombstone { id: tweet_id.to_string(), text }
}
