//! What a batch does with the outcome of one identifier.

use tracing::warn;
use crate::error::ScraperError;

#[derive(Debug)]
pub enum Triage<T> {
  /// hand the object to the caller
  Keep(T),
  /// nothing to hand over, move on to the next identifier
  Skip,
  /// the session is unusable, stop the batch
  Abort(ScraperError),
}

/// decide keep / skip / abort for one identifier's fetch
///
/// every error except a fatal one is logged with the identifier and skipped,
/// so one bad id never ends a batch
pub fn triage<T>(id: &str, outcome: Result<Option<T>, ScraperError>) -> Triage<T> {
  match outcome {
    Ok(Some(item)) => Triage::Keep(item),
    Ok(None) => Triage::Skip,
    Err(e) if e.is_fatal() => Triage::Abort(e),
    Err(e) => {
      warn!("Error scraping {id}: {e}");
      Triage::Skip
    },
  }
}
