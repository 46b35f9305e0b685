use once_cell::sync::Lazy;
use std::{
  sync::Arc,
  time::{Duration, SystemTime},
};
use tokio::sync::Mutex;

/// how long twitter accepts a guest token for
pub const GUEST_TOKEN_VALIDITY: Duration = Duration::from_secs(9000);

static SHARED: Lazy<Arc<GuestTokenManager>> = Lazy::new(|| Arc::new(GuestTokenManager::new()));

#[derive(Debug)]
struct TokenState {
  token: Option<String>,
  set_time: SystemTime,
}

/// holds the "x-guest-token" used for every api request
///
/// a token is reused until it is reset or its validity window has elapsed
#[derive(Debug)]
pub struct GuestTokenManager {
  state: Mutex<TokenState>,
}

impl Default for GuestTokenManager {
  fn default() -> Self {
    Self::new()
  }
}

impl GuestTokenManager {
  pub fn new() -> Self {
    Self {
      state: Mutex::new(TokenState { token: None, set_time: SystemTime::UNIX_EPOCH }),
    }
  }

  /// the manager shared by every scraper in the process that wasn't given its own
  pub fn shared() -> Arc<Self> {
    SHARED.clone()
  }

  /// the held token, or `None` if there isn't one or it has expired
  pub async fn token(&self) -> Option<String> {
    let state = self.state.lock().await;
    let age = SystemTime::now().duration_since(state.set_time).unwrap_or_default();
    match age < GUEST_TOKEN_VALIDITY {
      true => state.token.clone(),
      false => None,
    }
  }

  pub async fn set_token(&self, token: String) {
    let mut state = self.state.lock().await;
    state.token = Some(token);
    state.set_time = SystemTime::now();
  }

  /// when the current token was set (unix epoch if never)
  pub async fn set_time(&self) -> SystemTime {
    self.state.lock().await.set_time
  }

  /// time left before the held token expires
  pub async fn remaining_validity(&self) -> Duration {
    let set_time = self.set_time().await;
    (set_time + GUEST_TOKEN_VALIDITY)
      .duration_since(SystemTime::now())
      .unwrap_or_default()
  }

  pub async fn reset(&self) {
    let mut state = self.state.lock().await;
    state.token = None;
    state.set_time = SystemTime::UNIX_EPOCH;
  }

  #[cfg(test)]
  pub(crate) async fn backdate(&self, by: Duration) {
    let mut state = self.state.lock().await;
    state.set_time -= by;
  }
}
