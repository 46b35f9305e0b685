use serde_json::Value;
use crate::{
  error::{Result, ScraperError},
  parsing::{lookup, opt_string, opt_u64, require, require_str, typename},
  types::User,
};

/// convert the `data.user` object of a UserByScreenName response
pub fn user_from_results(user: &Value) -> Result<User> {
  let result = require(user, &["result"])?;
  match typename(result) {
    Some("User") | None => {},
    Some("UserUnavailable") => {
      let reason = opt_string(result, &["reason"]).unwrap_or_else(|| "unavailable".to_string());
      return Err(ScraperError::EntityUnavailable(format!("User unavailable: {reason}")));
    },
    Some(other) => return Err(ScraperError::Scraper(format!("Unknown user result type: {other}"))),
  }

  let legacy = require(result, &["legacy"])?;
  let flag = |path: &[&str]| lookup(result, path).and_then(Value::as_bool).unwrap_or(false);

  Ok(User {
    id: require_str(result, &["rest_id"])?.to_string(),
    username: require_str(legacy, &["screen_name"])?.to_string(),
    display_name: opt_string(legacy, &["name"]),
    description: opt_string(legacy, &["description"]).filter(|d| !d.is_empty()),
    location: opt_string(legacy, &["location"]).filter(|l| !l.is_empty()),
    link_url: profile_link(legacy),
    created: opt_string(legacy, &["created_at"]),
    followers_count: opt_u64(legacy, &["followers_count"]),
    friends_count: opt_u64(legacy, &["friends_count"]),
    statuses_count: opt_u64(legacy, &["statuses_count"]),
    favourites_count: opt_u64(legacy, &["favourites_count"]),
    listed_count: opt_u64(legacy, &["listed_count"]),
    media_count: opt_u64(legacy, &["media_count"]),
    verified: flag(&["legacy", "verified"]),
    blue: flag(&["is_blue_verified"]),
    protected: flag(&["legacy", "protected"]),
    profile_image_url: opt_string(legacy, &["profile_image_url_https"]),
    profile_banner_url: opt_string(legacy, &["profile_banner_url"]),
  })
}

/// the profile link is a t.co url, the real one is in the entities
fn profile_link(legacy: &Value) -> Option<String> {
  let short = legacy["url"].as_str()?;
  let expanded = legacy["entities"]["url"]["urls"].as_array()
    .and_then(|urls| urls.iter().find(|u| u["url"].as_str() == Some(short)))
    .and_then(|u| u["expanded_url"].as_str());
  Some(expanded.unwrap_or(short).to_string())
}
