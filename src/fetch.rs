use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::{
  cookie::{CookieStore, Jar},
  header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, AUTHORIZATION, REFERER},
  Client, StatusCode, Url,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};
use crate::{
  config::{ScraperConfig, ScraperOptions},
  error::{Result, ScraperError},
  features::{GraphqlRequest, GUEST_ACTIVATE},
  guest_token::GuestTokenManager,
  parsing::lookup,
};

const GUEST_TOKEN_HEADER: &str = "x-guest-token";
const GUEST_TOKEN_ERROR: &str = "Unable to retrieve guest token";

static GUEST_TOKEN_IN_HTML: Lazy<Regex> =
  Lazy::new(|| Regex::new(r#"document\.cookie="gt=(\d+);"#).unwrap());

// statuses twitter answers with when it doesn't like the guest token
const BLOCKED_STATUSES: [StatusCode; 3] = [
  StatusCode::FORBIDDEN,
  StatusCode::NOT_FOUND,
  StatusCode::TOO_MANY_REQUESTS,
];
// error code 200: authentication token is expired
// error code 215: authentication token is missing(/ invalid (?))
// error code 239: bad guest token
const TOKEN_ERROR_CODES: [i64; 3] = [200, 215, 239];

/// the http client plus the cookie jar it reads and writes
#[derive(Debug, Clone)]
pub struct HttpSession {
  client: Client,
  jar: Arc<Jar>,
}

impl HttpSession {
  pub fn new(config: &ScraperConfig) -> Result<Self> {
    let jar = Arc::new(Jar::default());
    let client = Client::builder()
      .gzip(true).deflate(true).brotli(true)
      .cookie_provider(jar.clone())
      .user_agent(config.user_agent.as_str())
      .timeout(config.timeout)
      .build()?;
    Ok(Self { client, jar })
  }

  /// wrap an existing client; `jar` must be the cookie provider `client` was built with
  pub fn from_parts(client: Client, jar: Arc<Jar>) -> Self {
    Self { client, jar }
  }

  pub fn cookies(&self) -> &Arc<Jar> {
    &self.jar
  }
}

/// `web_base` with `segments` appended, each one percent-encoded
///
/// identifiers end up in the `referer` header, so they must never carry raw
/// control characters or slashes
pub fn page_url(web_base: &str, segments: &[&str]) -> Result<String> {
  let mut url = Url::parse(web_base)?;
  if !segments.is_empty() {
    url.path_segments_mut()
      .map_err(|_| ScraperError::Scraper(format!("{web_base} can't have a path")))?
      .pop_if_empty()
      .extend(segments);
  }
  Ok(url.into())
}

/// find the token twitter sometimes inlines into its html
pub fn guest_token_from_html(html: &str) -> Option<String> {
  GUEST_TOKEN_IN_HTML.captures(html)
    .and_then(|caps| caps.get(1))
    .map(|m| m.as_str().to_string())
}

/// authenticated access to the private api with a guest token
pub struct ApiSession {
  http: HttpSession,
  config: ScraperConfig,
  /// page fetched to look for a guest token, also sent as `referer`
  base_url: String,
  api_headers: HeaderMap,
  guest_token: Arc<GuestTokenManager>,
  max_empty_pages: u32,
}

impl ApiSession {
  pub fn new(base_url: impl Into<String>, options: ScraperOptions) -> Result<Self> {
    let ScraperOptions { config, session, guest_token_manager, max_empty_pages } = options;
    let http = match session {
      Some(session) => session,
      None => HttpSession::new(&config)?,
    };
    let base_url = base_url.into();

    let mut api_headers = HeaderMap::new();
    api_headers.insert(AUTHORIZATION, HeaderValue::from_str(&config.bearer_token)?);
    api_headers.insert(REFERER, HeaderValue::from_str(&base_url)?);
    api_headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));

    Ok(Self {
      http,
      config,
      base_url,
      api_headers,
      guest_token: guest_token_manager.unwrap_or_else(GuestTokenManager::shared),
      max_empty_pages,
    })
  }

  pub fn config(&self) -> &ScraperConfig {
    &self.config
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  pub fn api_headers(&self) -> &HeaderMap {
    &self.api_headers
  }

  pub fn guest_token_manager(&self) -> &Arc<GuestTokenManager> {
    &self.guest_token
  }

  pub fn http(&self) -> &HttpSession {
    &self.http
  }

  pub fn max_empty_pages(&self) -> u32 {
    self.max_empty_pages
  }

  /// make sure a guest token is held, and is in both the cookie jar and the
  /// api headers
  ///
  /// only touches the network when no valid token is held, so calling it again
  /// is cheap
  pub async fn ensure_guest_token(&mut self) -> Result<()> {
    let token = match self.guest_token.token().await {
      Some(token) => token,
      None => {
        info!("Retrieving guest token");
        let token = self.acquire_guest_token().await?;
        if token.is_empty() {
          return Err(ScraperError::GuestToken(format!("{GUEST_TOKEN_ERROR}: got an empty token")));
        }
        self.guest_token.set_token(token.clone()).await;
        token
      }
    };
    debug!("Using guest token {token}");
    self.set_guest_cookie(&token).await?;
    self.api_headers.insert(GUEST_TOKEN_HEADER, HeaderValue::from_str(&token)?);
    Ok(())
  }

  /// forget the current token so the next request acquires a new one
  pub async fn unset_guest_token(&mut self) {
    self.guest_token.reset().await;
    self.api_headers.remove(GUEST_TOKEN_HEADER);
  }

  /// html of the base page first, then its cookies, then the activation api
  async fn acquire_guest_token(&self) -> Result<String> {
    match self.http.client.get(&self.base_url).send().await {
      Ok(response) if response.status().is_success() => {
        let from_cookie = response.cookies()
          .find(|cookie| cookie.name() == "gt" && !cookie.value().is_empty())
          .map(|cookie| cookie.value().to_string());
        let html = response.text().await.unwrap_or_default();

        if let Some(token) = guest_token_from_html(&html) {
          debug!("Found guest token in HTML");
          return Ok(token);
        }
        if let Some(token) = from_cookie {
          debug!("Found guest token in cookies");
          return Ok(token);
        }
        debug!("No guest token in response");
      },
      Ok(response) => debug!("Base page returned {}, skipping to the api", response.status()),
      Err(e) => warn!("Failed to fetch {}: {e}", self.base_url),
    }

    info!("Retrieving guest token via API");
    self.activate_guest_token().await
  }

  /// get "x-guest-token" from the activation endpoint
  async fn activate_guest_token(&self) -> Result<String> {
    let url = format!("{}/{}", self.config.api_base.trim_end_matches('/'), GUEST_ACTIVATE);
    let failed = |reason: String| {
      warn!("Guest token activation failed: {reason}");
      ScraperError::GuestToken(GUEST_TOKEN_ERROR.to_string())
    };

    let response = self.http.client.post(&url)
      .headers(self.api_headers.clone())
      .body(Vec::new())
      .send().await
      .map_err(|e| failed(e.to_string()))?;
    let status = response.status();
    if !status.is_success() {
      return Err(failed(format!("status {status}")));
    }
    let json: Value = response.json().await.map_err(|e| failed(e.to_string()))?;

    match json.get("guest_token").and_then(Value::as_str) {
      Some(token) if !token.is_empty() => Ok(token.to_string()),
      _ => Err(failed(format!("no guest_token in {json}"))),
    }
  }

  async fn set_guest_cookie(&self, token: &str) -> Result<()> {
    let max_age = self.guest_token.remaining_validity().await.as_secs();
    let cookie = format!(
      "gt={token}; Domain={}; Path=/; Secure; Max-Age={max_age}",
      self.config.cookie_domain
    );
    let url = Url::parse(&self.config.web_base)?;
    self.http.jar.add_cookie_str(&cookie, &url);

    // the jar drops cookies whose domain doesn't cover `web_base`
    let stored = format!("gt={token}");
    let in_jar = self.http.jar.cookies(&url)
      .and_then(|cookies| cookies.to_str().ok().map(|header| header.split("; ").any(|c| c == stored)))
      .unwrap_or(false);
    if !in_jar {
      warn!(
        "Guest token cookie for {} rejected by {}, only the header will carry it",
        self.config.cookie_domain, self.config.web_base
      );
    }
    Ok(())
  }

  /// GET a graphql endpoint and return the whole json body
  ///
  /// if twitter rejects the guest token, a new one is acquired and the request
  /// is re-run once
  pub async fn get_api_data(&mut self, request: &GraphqlRequest) -> Result<Value> {
    self.ensure_guest_token().await?;
    let url = request.url()?;
    let mut refreshed = false;

    loop {
      debug!("Retrieving {}", request.endpoint);
      let response = self.http.client.get(url.clone())
        .headers(self.api_headers.clone())
        .send().await?;
      let status = response.status();

      if BLOCKED_STATUSES.contains(&status) && !refreshed {
        warn!("Blocked ({status}), retrying with a new guest token");
        self.refresh_guest_token().await?;
        refreshed = true;
        continue;
      }
      if !status.is_success() {
        return Err(ScraperError::Status { status, url: request.endpoint.clone() });
      }

      let text = response.text().await?;
      let json: Value = serde_json::from_str(&text)?;

      if let Some(errors) = json.get("errors").and_then(Value::as_array) {
        let token_error = errors.iter()
          .filter_map(|e| e["code"].as_i64())
          .any(|code| TOKEN_ERROR_CODES.contains(&code));
        if token_error && !refreshed {
          warn!("Guest token rejected, retrying with a new one");
          self.refresh_guest_token().await?;
          refreshed = true;
          continue;
        }

        let messages = errors.iter()
          .filter_map(|e| e["message"].as_str())
          .collect::<Vec<&str>>()
          .join(", ");
        if lookup(&json, request.instructions_path).is_none() {
          return Err(ScraperError::Scraper(format!("Twitter responded with an error: {messages}")));
        }
        warn!("Twitter returned some errors: {messages}");
      }

      return Ok(json);
    }
  }

  async fn refresh_guest_token(&mut self) -> Result<()> {
    self.unset_guest_token().await;
    self.ensure_guest_token().await
  }
}
