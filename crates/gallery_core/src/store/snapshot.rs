//! Snapshot encoding for persistence and backup files.

use crate::model::state::MemoryState;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Malformed snapshot document.
#[derive(Debug)]
pub struct ParseError {
    /// What was being decoded, e.g. `persisted snapshot`.
    pub context: &'static str,
    source: serde_json::Error,
}

impl ParseError {
    /// 1-based line of the first syntax or shape error.
    pub fn line(&self) -> usize {
        self.source.line()
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid {}: {}", self.context, self.source)
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

/// Compact form written to storage on every mutation.
pub fn encode_compact(state: &MemoryState) -> serde_json::Result<String> {
    serde_json::to_string(state)
}

/// Two-space indented form used for backup files.
pub fn encode_pretty(state: &MemoryState) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec_pretty(state)
}

/// Decodes and normalizes a snapshot.
///
/// Missing fields default; see [`MemoryState::normalize`] for id repair.
/// Documents whose ids leave no room for the counter are rejected.
pub fn decode(bytes: &[u8], context: &'static str) -> Result<MemoryState, ParseError> {
    let mut state: MemoryState =
        serde_json::from_slice(bytes).map_err(|source| ParseError { context, source })?;
    state.normalize().map_err(|err| ParseError {
        context,
        source: serde::de::Error::custom(err),
    })?;
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::{decode, encode_pretty};
    use crate::model::state::MemoryState;

    #[test]
    fn pretty_output_uses_two_space_indent() {
        let text = String::from_utf8(encode_pretty(&MemoryState::seed()).unwrap()).unwrap();
        assert!(text.starts_with("{\n  \"photos\": ["));
    }

    #[test]
    fn decode_defaults_missing_fields() {
        let state = decode(
            br#"{"photos":[{"id":5,"title":"No tags"}],"journals":[]}"#,
            "test document",
        )
        .unwrap();
        assert_eq!(state.photos[0].tags, Vec::<String>::new());
        assert!(state.videos.is_empty());
        assert_eq!(state.next_id, 6);
    }

    #[test]
    fn decode_reports_context() {
        let err = decode(b"{not json", "backup file").unwrap_err();
        assert_eq!(err.context, "backup file");
        assert!(err.to_string().starts_with("invalid backup file:"));
        assert_eq!(err.line(), 1);
    }

    #[test]
    fn decode_rejects_wrong_shape() {
        assert!(decode(br#"{"photos":"nope"}"#, "backup file").is_err());
        assert!(decode(br#"{"videos":[{"id":"x"}]}"#, "backup file").is_err());
    }

    #[test]
    fn decode_rejects_ids_without_room_for_counter() {
        let err = decode(br#"{"photos":[{"id":18446744073709551615}]}"#, "backup file")
            .unwrap_err();
        assert!(err.to_string().contains("id space exhausted"));
    }
}
