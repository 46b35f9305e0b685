//! Versioned request shapes of the graphql endpoints.
//!
//! The server refuses a query unless every feature switch it expects for that
//! query id is present, so the tables below have to move together with the
//! query ids whenever twitter ships a new web client.

use reqwest::Url;
use serde_json::{Map, Value};
use crate::error::Result;

// "5GOHgZe-8U2j5sVHQzEm9A" is the query id, which changes between web client versions
pub const TWEET_RESULT_BY_REST_ID: &str = "graphql/5GOHgZe-8U2j5sVHQzEm9A/TweetResultByRestId";
pub const USER_BY_SCREEN_NAME: &str = "graphql/pVrmNaXcxPjisIvKtLDMEA/UserByScreenName";
pub const GUEST_ACTIVATE: &str = "1.1/guest/activate.json";

pub const TWEET_RESULT_FEATURES: &[(&str, bool)] = &[
  ("creator_subscriptions_tweet_preview_api_enabled", true),
  ("c9s_tweet_anatomy_moderator_badge_enabled", true),
  ("tweetypie_unmention_optimization_enabled", true),
  ("responsive_web_edit_tweet_api_enabled", true),
  ("graphql_is_translatable_rweb_tweet_is_translatable_enabled", true),
  ("view_counts_everywhere_api_enabled", true),
  ("longform_notetweets_consumption_enabled", true),
  ("responsive_web_twitter_article_tweet_consumption_enabled", false),
  ("tweet_awards_web_tipping_enabled", false),
  ("responsive_web_home_pinned_timelines_enabled", true),
  ("freedom_of_speech_not_reach_fetch_enabled", true),
  ("standardized_nudges_misinfo", true),
  ("tweet_with_visibility_results_prefer_gql_limited_actions_policy_enabled", true),
  ("longform_notetweets_rich_text_read_enabled", true),
  ("longform_notetweets_inline_media_enabled", true),
  ("responsive_web_graphql_exclude_directive_enabled", true),
  ("verified_phone_label_enabled", false),
  ("responsive_web_media_download_video_enabled", false),
  ("responsive_web_graphql_skip_user_profile_image_extensions_enabled", false),
  ("responsive_web_graphql_timeline_navigation_enabled", true),
  ("responsive_web_enhance_cards_enabled", false),
];

pub const USER_BY_SCREEN_NAME_FEATURES: &[(&str, bool)] = &[
  ("blue_business_profile_image_shape_enabled", true),
  ("responsive_web_graphql_exclude_directive_enabled", true),
  ("verified_phone_label_enabled", false),
  ("highlights_tweets_tab_ui_enabled", false),
  ("creator_subscriptions_tweet_preview_api_enabled", false),
  ("responsive_web_graphql_skip_user_profile_image_extensions_enabled", false),
  ("responsive_web_graphql_timeline_navigation_enabled", true),
];

/// turn a feature table into the json object sent as the `features` param
pub fn flags(table: &[(&str, bool)]) -> Map<String, Value> {
  table.iter()
    .map(|(name, on)| (name.to_string(), Value::Bool(*on)))
    .collect()
}

/// everything needed to make one graphql call
#[derive(Debug, Clone)]
pub struct GraphqlRequest {
  pub endpoint: String,
  pub variables: Map<String, Value>,
  pub features: Map<String, Value>,
  /// keys locating the part of the response the caller cares about
  pub instructions_path: &'static [&'static str],
}

impl GraphqlRequest {
  /// the endpoint with `variables` and `features` json-encoded into the query
  pub fn url(&self) -> Result<Url> {
    let parameters = [
      ("variables", Value::Object(self.variables.clone()).to_string()),
      ("features", Value::Object(self.features.clone()).to_string()),
    ];
    Ok(Url::parse_with_params(&self.endpoint, &parameters)?)
  }
}

/// request for a single tweet by its id
pub fn tweet_result_request(api_base: &str, tweet_id: &str) -> GraphqlRequest {
  let mut variables = Map::new();
  variables.insert("tweetId".into(), Value::from(tweet_id));
  variables.insert("withCommunity".into(), Value::Bool(false));
  variables.insert("includePromotedContent".into(), Value::Bool(false)); // true = include ads
  variables.insert("withVoice".into(), Value::Bool(false));

  GraphqlRequest {
    endpoint: format!("{}/{}", api_base.trim_end_matches('/'), TWEET_RESULT_BY_REST_ID),
    variables,
    features: flags(TWEET_RESULT_FEATURES),
    instructions_path: &["data", "tweetResult"],
  }
}

/// request for a single user by their screen name
pub fn user_by_screen_name_request(private_api_base: &str, screen_name: &str) -> GraphqlRequest {
  let mut variables = Map::new();
  variables.insert("screen_name".into(), Value::from(screen_name));
  variables.insert("withSafetyModeUserFields".into(), Value::Bool(true));

  GraphqlRequest {
    endpoint: format!("{}/{}", private_api_base.trim_end_matches('/'), USER_BY_SCREEN_NAME),
    variables,
    features: flags(USER_BY_SCREEN_NAME_FEATURES),
    instructions_path: &["data", "user"],
  }
}
