use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
  #[error("network error: {0}")]
  Http(#[from] reqwest::Error),
  #[error("invalid json: {0}")]
  Json(#[from] serde_json::Error),
  #[error("invalid url: {0}")]
  Url(#[from] url::ParseError),
  #[error("invalid header value: {0}")]
  Header(#[from] reqwest::header::InvalidHeaderValue),
  #[error("unexpected http status {status} from {url}")]
  Status { status: StatusCode, url: String },
  /// an expected key path was absent from a response
  #[error("missing key: {0}")]
  KeyMissing(String),
  #[error("{0}")]
  Scraper(String),
  /// the entity exists but can't be viewed (suspended, deleted, protected...)
  #[error("entity unavailable: {0}")]
  EntityUnavailable(String),
  #[error("{0}")]
  GuestToken(String),
}

impl ScraperError {
  /// a fatal error means the whole session is unusable, so a batch has to stop
  /// rather than skip to the next identifier
  pub fn is_fatal(&self) -> bool {
    matches!(self, ScraperError::GuestToken(_))
  }
}

pub type Result<T> = std::result::Result<T, ScraperError>;
