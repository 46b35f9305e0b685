use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tweet {
  /// id number of tweet (last part of url)
  pub id: String,
  pub url: String,
  /// username of the account who posted the tweet
  pub user: String,
  pub user_id: Option<String>,
  /// the text of the tweet
  pub text: String,
  /// as twitter formats it, e.g. "Wed Dec 20 08:16:41 +0000 2023"
  pub date: Option<String>,
  pub lang: Option<String>,
  pub media: Option<Vec<TweetMedia>>,
  pub urls: Option<Vec<TweetURLs>>,
  pub quote: Option<Box<Tweet>>,
  /// id of the first tweet in the thread this tweet is in
  pub thread_id: Option<String>,
  pub conversation_id: Option<String>,
  pub in_reply_to_tweet_id: Option<String>,
  pub reply_count: Option<u64>,
  pub retweet_count: Option<u64>,
  pub like_count: Option<u64>,
  pub quote_count: Option<u64>,
  pub view_count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TweetMedia {
  /// the twitter shortened url
  pub shortened_img_url: String,
  /// the original image url
  pub full_img_url: String,
  /// `photo` or `video` or `animated_gif`
  pub kind: String,
  pub video_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TweetURLs {
  /// the twitter shortened url
  pub shortened_url: String,
  /// the original url
  pub full_url: String,
}

/// a tweet twitter knows about but won't show, e.g. from a protected account
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tombstone {
  pub id: String,
  pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TweetItem {
  Tweet(Box<Tweet>),
  Tombstone(Tombstone),
}

impl TweetItem {
  pub fn id(&self) -> &str {
    match self {
      TweetItem::Tweet(tweet) => &tweet.id,
      TweetItem::Tombstone(tombstone) => &tombstone.id,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
  pub id: String,
  /// screen name, without the "@"
  pub username: String,
  pub display_name: Option<String>,
  pub description: Option<String>,
  pub location: Option<String>,
  /// the expanded link from the profile, not the t.co one
  pub link_url: Option<String>,
  pub created: Option<String>,
  pub followers_count: Option<u64>,
  pub friends_count: Option<u64>,
  pub statuses_count: Option<u64>,
  pub favourites_count: Option<u64>,
  pub listed_count: Option<u64>,
  pub media_count: Option<u64>,
  pub verified: bool,
  pub blue: bool,
  pub protected: bool,
  pub profile_image_url: Option<String>,
  pub profile_banner_url: Option<String>,
}

impl User {
  pub fn url(&self) -> String {
    format!("https://twitter.com/{}", self.username)
  }
}
