use serde_json::Value;
use crate::error::{Result, ScraperError};

/// walk `path` down a json tree, `None` as soon as a key is missing
pub fn lookup<'a>(json: &'a Value, path: &[&str]) -> Option<&'a Value> {
  path.iter().try_fold(json, |node, key| node.get(*key))
}

/// like `lookup`, but a missing key is an error naming the full path
pub fn require<'a>(json: &'a Value, path: &[&str]) -> Result<&'a Value> {
  lookup(json, path).ok_or_else(|| ScraperError::KeyMissing(path.join(".")))
}

pub fn require_str<'a>(json: &'a Value, path: &[&str]) -> Result<&'a str> {
  require(json, path)?
    .as_str()
    .ok_or_else(|| ScraperError::KeyMissing(format!("{} (not a string)", path.join("."))))
}

pub fn opt_string(json: &Value, path: &[&str]) -> Option<String> {
  lookup(json, path).and_then(Value::as_str).map(str::to_string)
}

/// counts arrive either as numbers or, for views, as numeric strings
pub fn opt_u64(json: &Value, path: &[&str]) -> Option<u64> {
  lookup(json, path).and_then(|v| match v {
    Value::String(s) => s.parse().ok(),
    _ => v.as_u64(),
  })
}

/// `null`, a missing key, `{}`, `[]`, `""` and `false` all count as "no data"
pub fn is_empty(json: Option<&Value>) -> bool {
  match json {
    None | Some(Value::Null) => true,
    Some(Value::Object(o)) => o.is_empty(),
    Some(Value::Array(a)) => a.is_empty(),
    Some(Value::String(s)) => s.is_empty(),
    Some(Value::Bool(b)) => !b,
    Some(Value::Number(_)) => false,
  }
}

/// the graphql `__typename` of a result object
pub fn typename(json: &Value) -> Option<&str> {
  json.get("__typename").and_then(Value::as_str)
}
