//! Extraction — pulls the first well-formed JSON object out of free-form model text.
//!
//! Each `{` is tried in order as the start of a single JSON value. The first
//! candidate that parses to an object wins and anything after it is ignored,
//! so a reply like `Sure! {...} Hope this helps {:}` still yields the object.

use serde_json::{Deserializer, Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("no JSON object found in the response")]
    NoJsonObject,

    #[error("no candidate parsed as a JSON object: {0}")]
    InvalidJson(#[source] serde_json::Error),
}

/// Returns the first complete JSON object embedded in `text`.
pub fn extract_json_object(text: &str) -> Result<Map<String, Value>, ExtractionError> {
    let mut last_error: Option<serde_json::Error> = None;

    for (start, _) in text.match_indices('{') {
        let mut stream = Deserializer::from_str(&text[start..]).into_iter::<Map<String, Value>>();
        match stream.next() {
            Some(Ok(object)) => return Ok(object),
            Some(Err(e)) => last_error = Some(e),
            None => {}
        }
    }

    match last_error {
        Some(e) => Err(ExtractionError::InvalidJson(e)),
        None => Err(ExtractionError::NoJsonObject),
    }
}
