use async_stream::stream;
use futures::Stream;
use crate::{
  batch::{triage, Triage},
  config::ScraperOptions,
  error::{Result, ScraperError},
  features::user_by_screen_name_request,
  fetch::{page_url, ApiSession},
  parsing::{is_empty, lookup, typename},
  types::User,
};
use super::parsing::user_from_results;

/// looks up users one screen name at a time
pub struct UsersScraper {
  session: ApiSession,
  usernames: Vec<String>,
}

impl UsersScraper {
  pub fn new<I, S>(usernames: I, options: ScraperOptions) -> Result<Self>
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    let usernames: Vec<String> = usernames.into_iter().map(Into::into).collect();
    let base_url = match usernames.first() {
      Some(username) => page_url(&options.config.web_base, &[username.as_str()])?,
      None => page_url(&options.config.web_base, &[])?,
    };
    let session = ApiSession::new(base_url, options)?;
    Ok(Self { session, usernames })
  }

  pub fn session(&self) -> &ApiSession {
    &self.session
  }

  /// every user that could be found, in the order the names were given
  ///
  /// unavailable (suspended, deactivated) and unknown users are logged and
  /// skipped; a guest token failure ends the stream
  pub fn get_entities(&mut self) -> impl Stream<Item = std::result::Result<User, ScraperError>> + '_ {
    stream! {
      let usernames = self.usernames.clone();
      for username in usernames {
        match triage(&username, self.get_entity(&username).await.map(Some)) {
          Triage::Keep(user) => yield Ok(user),
          Triage::Skip => continue,
          Triage::Abort(e) => {
            yield Err(e);
            return;
          },
        }
      }
    }
  }

  pub async fn get_entity(&mut self, username: &str) -> Result<User> {
    // the user endpoint wants the token in place up front
    self.session.ensure_guest_token().await?;
    let private_api_base = self.session.config().private_api_base.clone();
    let request = user_by_screen_name_request(&private_api_base, username);
    let json = self.session.get_api_data(&request).await?;

    if is_empty(json.get("data")) || lookup(&json, &["data", "user", "result"]).is_none() {
      return Err(ScraperError::Scraper("Empty response".to_string()));
    }
    if lookup(&json, &["data", "user", "result"]).and_then(typename) == Some("UserUnavailable") {
      return Err(ScraperError::EntityUnavailable("User unavailable".to_string()));
    }
    user_from_results(&json["data"]["user"])
  }
}
