use std::{env, sync::Arc, time::Duration};
use url::{Host, Url};
use crate::{fetch::HttpSession, guest_token::GuestTokenManager};

/// public bearer token of the twitter web client
pub const AUTHORIZATION: &str = "Bearer AAAAAAAAAAAAAAAAAAAAANRILgAAAAAAnNwIzUejRCOuH5E6I8xnZz4puTs%3D1Zv7ttfk8LF81IUq16cHjhLTvJu4FA33AGWWjCpTnA";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Debug, Clone)]
pub struct ScraperConfig {
  /// full `authorization` header value, including the "Bearer " prefix
  pub bearer_token: String,
  pub user_agent: String,
  /// the html site, used for the guest token page and the `referer` header
  pub web_base: String,
  /// host of the guest activation endpoint and the tweet graphql endpoint
  pub api_base: String,
  /// host of the user graphql endpoint
  pub private_api_base: String,
  /// domain the `gt` cookie is scoped to
  pub cookie_domain: String,
  pub timeout: Duration,
}

impl Default for ScraperConfig {
  fn default() -> Self {
    Self {
      bearer_token: AUTHORIZATION.to_string(),
      user_agent: USER_AGENT.to_string(),
      web_base: "https://twitter.com".to_string(),
      api_base: "https://api.twitter.com".to_string(),
      private_api_base: "https://twitter.com/i/api".to_string(),
      cookie_domain: ".twitter.com".to_string(),
      timeout: Duration::from_secs(30),
    }
  }
}

impl ScraperConfig {
  /// defaults, overridden by any `TWITTER_*` environment variables that are set
  pub fn from_env() -> Self {
    let mut config = Self::default();
    if let Ok(v) = env::var("TWITTER_BEARER_TOKEN") {
      config.bearer_token = match v.starts_with("Bearer ") {
        true => v,
        false => format!("Bearer {v}"),
      };
    }
    if let Ok(v) = env::var("TWITTER_USER_AGENT") {
      config.user_agent = v;
    }
    if let Ok(v) = env::var("TWITTER_WEB_BASE") {
      if let Some(domain) = cookie_domain_of(&v) {
        config.cookie_domain = domain;
      }
      config.web_base = v;
    }
    if let Ok(v) = env::var("TWITTER_COOKIE_DOMAIN") {
      config.cookie_domain = v;
    }
    if let Ok(v) = env::var("TWITTER_API_BASE") {
      config.api_base = v;
    }
    if let Ok(v) = env::var("TWITTER_PRIVATE_API_BASE") {
      config.private_api_base = v;
    }
    if let Some(secs) = env::var("TWITTER_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()) {
      config.timeout = Duration::from_secs(secs);
    }
    config
  }

  /// a config whose every endpoint points at `base` (e.g. a local mock server)
  pub fn with_base(base: &str) -> Self {
    let base = base.trim_end_matches('/').to_string();
    Self {
      web_base: base.clone(),
      api_base: base.clone(),
      cookie_domain: cookie_domain_of(&base).unwrap_or_else(|| Self::default().cookie_domain),
      private_api_base: base,
      ..Self::default()
    }
  }
}

/// the `Domain=` a cookie needs to reach every host under `base`
///
/// ip addresses only match themselves, so they get no leading dot
fn cookie_domain_of(base: &str) -> Option<String> {
  match Url::parse(base).ok()?.host()? {
    Host::Domain(domain) => Some(format!(".{domain}")),
    ip => Some(ip.to_string()),
  }
}

/// construction-time options shared by both scrapers
#[derive(Default)]
pub struct ScraperOptions {
  pub config: ScraperConfig,
  /// use this client/cookie jar instead of building a new one from `config`
  pub session: Option<HttpSession>,
  /// use this token holder instead of the process-wide one
  pub guest_token_manager: Option<Arc<GuestTokenManager>>,
  /// not used for single-entity lookups, kept for callers that paginate
  pub max_empty_pages: u32,
}

impl ScraperOptions {
  pub fn new(config: ScraperConfig) -> Self {
    Self { config, ..Self::default() }
  }

  pub fn session(mut self, session: HttpSession) -> Self {
    self.session = Some(session);
    self
  }

  pub fn guest_token_manager(mut self, manager: Arc<GuestTokenManager>) -> Self {
    self.guest_token_manager = Some(manager);
    self
  }

  pub fn max_empty_pages(mut self, max_empty_pages: u32) -> Self {
    self.max_empty_pages = max_empty_pages;
    self
  }
}
