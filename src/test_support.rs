use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::{Match, MockServer, Request};
use crate::{
  config::{ScraperConfig, ScraperOptions},
  features::{TWEET_RESULT_BY_REST_ID, USER_BY_SCREEN_NAME},
  guest_token::GuestTokenManager,
};

pub const ACTIVATE_PATH: &str = "/1.1/guest/activate.json";

pub fn tweet_path() -> String {
  format!("/{TWEET_RESULT_BY_REST_ID}")
}

pub fn user_path() -> String {
  format!("/{USER_BY_SCREEN_NAME}")
}

/// options pointing at `server`, with a token holder of their own so tests
/// don't share the process-wide token
pub fn options(server: &MockServer) -> (ScraperOptions, Arc<GuestTokenManager>) {
  let manager = Arc::new(GuestTokenManager::new());
  let options = ScraperOptions::new(ScraperConfig::with_base(&server.uri()))
    .guest_token_manager(manager.clone());
  (options, manager)
}

pub fn html_with_token(token: &str) -> String {
  format!(r#"<html><head><script>document.cookie="gt={token}; Max-Age=10800; Domain=.twitter.com; Path=/; Secure";</script></head></html>"#)
}

/// matches graphql requests whose `variables` param has `key` set to `value`
pub struct Variable(pub &'static str, pub String);

impl Match for Variable {
  fn matches(&self, request: &Request) -> bool {
    request.url.query_pairs()
      .find(|(name, _)| name == "variables")
      .and_then(|(_, variables)| serde_json::from_str::<Value>(&variables).ok())
      .map_or(false, |variables| variables[self.0] == self.1.as_str())
  }
}

pub fn tweet_json(id: &str, screen_name: &str, text: &str) -> Value {
  json!({
    "__typename": "Tweet",
    "rest_id": id,
    "core": { "user_results": { "result": {
      "__typename": "User",
      "rest_id": "44196397",
      "legacy": { "screen_name": screen_name, "name": "Someone" }
    } } },
    "views": { "count": "2500", "state": "EnabledWithCount" },
    "legacy": {
      "id_str": id,
      "user_id_str": "44196397",
      "full_text": text,
      "created_at": "Wed Dec 20 08:16:41 +0000 2023",
      "conversation_id_str": id,
      "lang": "en",
      "favorite_count": 10,
      "retweet_count": 2,
      "reply_count": 3,
      "quote_count": 1,
      "entities": { "urls": [] }
    }
  })
}

pub fn tweet_response(id: &str, screen_name: &str, text: &str) -> Value {
  json!({ "data": { "tweetResult": { "result": tweet_json(id, screen_name, text) } } })
}

pub fn user_response(id: &str, screen_name: &str) -> Value {
  json!({ "data": { "user": { "result": {
    "__typename": "User",
    "id": "VXNlcjo0NDE5NjM5Nw==",
    "rest_id": id,
    "is_blue_verified": true,
    "legacy": {
      "screen_name": screen_name,
      "name": "Display Name",
      "description": "bio",
      "location": "",
      "created_at": "Tue Jun 02 20:12:29 +0000 2009",
      "followers_count": 100,
      "friends_count": 50,
      "statuses_count": 1000,
      "favourites_count": 20,
      "listed_count": 5,
      "media_count": 7,
      "verified": false,
      "protected": false,
      "url": "https://t.co/abc",
      "entities": { "url": { "urls": [
        { "url": "https://t.co/abc", "expanded_url": "https://example.com" }
      ] } },
      "profile_image_url_https": "https://pbs.twimg.com/profile_images/1/a_normal.jpg"
    }
  } } } })
}

pub fn unavailable_user_response() -> Value {
  json!({ "data": { "user": { "result": {
    "__typename": "UserUnavailable",
    "reason": "Suspended"
  } } } })
}
