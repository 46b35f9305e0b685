use serde_json::json;
use super::parsing::user_from_results;
use crate::{
  error::ScraperError,
  test_support::{unavailable_user_response, user_response},
};

#[test]
fn full_profile() {
  let response = user_response("44196397", "elonmusk");
  let user = user_from_results(&response["data"]["user"]).unwrap();

  assert_eq!(user.id, "44196397");
  assert_eq!(user.username, "elonmusk");
  assert_eq!(user.display_name.as_deref(), Some("Display Name"));
  assert_eq!(user.description.as_deref(), Some("bio"));
  assert_eq!(user.location, None);
  assert_eq!(user.link_url.as_deref(), Some("https://example.com"));
  assert_eq!(user.followers_count, Some(100));
  assert_eq!(user.media_count, Some(7));
  assert!(user.blue);
  assert!(!user.verified);
  assert!(!user.protected);
  assert_eq!(user.url(), "https://twitter.com/elonmusk");
}

#[test]
fn unavailable_user() {
  let response = unavailable_user_response();
  match user_from_results(&response["data"]["user"]) {
    Err(ScraperError::EntityUnavailable(msg)) => assert!(msg.contains("Suspended")),
    other => panic!("expected EntityUnavailable, got {other:?}"),
  }
}

#[test]
fn missing_screen_name() {
  let user = json!({ "result": { "__typename": "User", "rest_id": "1", "legacy": {} } });
  match user_from_results(&user) {
    Err(ScraperError::KeyMissing(path)) => assert_eq!(path, "screen_name"),
    other => panic!("expected KeyMissing, got {other:?}"),
  }
}

#[test]
fn unexpanded_profile_link() {
  let user = json!({ "result": { "rest_id": "1", "legacy": {
    "screen_name": "someone", "url": "https://t.co/xyz"
  } } });
  let user = user_from_results(&user).unwrap();
  assert_eq!(user.link_url.as_deref(), Some("https://t.co/xyz"));
  assert_eq!(user.display_name, None);
}
