//! Non-streaming structured extraction: summary and mind map.
//!
//! The model is told to answer with bare JSON, but answers still arrive
//! wrapped in a markdown fence or in prose now and then. [`recover_json`]
//! peels off the first fence and then keeps only the span from the first
//! `{` to the last `}` before the text is handed to serde.

use mirror_prompt::ArtifactKind;
use mirror_types::{ChatError, Message, MindMapRecord, SummaryRecord};
use serde_json::Value;

use crate::client::MirrorClient;
use crate::error::{map_extraction_status, map_reqwest_error};
use crate::mode::ProviderMode;

const FENCE: &str = "```";

/// Best-effort isolation of a JSON object inside a model answer.
pub fn recover_json(text: &str) -> &str {
    let mut candidate = text.trim();

    if let Some(open) = candidate.find(FENCE) {
        let after = &candidate[open + FENCE.len()..];
        let after = after
            .strip_prefix("json")
            .or_else(|| after.strip_prefix("JSON"))
            .unwrap_or(after);
        let inner = match after.find(FENCE) {
            Some(close) => &after[..close],
            None => after,
        };
        candidate = inner.trim();
    }

    match (candidate.find('{'), candidate.rfind('}')) {
        (Some(start), Some(end)) if start < end => &candidate[start..=end],
        _ => candidate,
    }
}

/// Parse a summary answer.
pub fn parse_summary(text: &str) -> Result<SummaryRecord, ChatError> {
    let record: SummaryRecord = serde_json::from_str(recover_json(text))
        .map_err(|e| ChatError::ExtractionFormat(e.to_string()))?;
    if record.starting_point.trim().is_empty() {
        return Err(ChatError::ExtractionFormat("startingPoint is empty".into()));
    }
    if record.end_result.trim().is_empty() {
        return Err(ChatError::ExtractionFormat("endResult is empty".into()));
    }
    Ok(record)
}

/// Parse a mind-map answer.
///
/// Broken parent links are logged, not rejected; the layout engine builds
/// edges from nesting and does not depend on them.
pub fn parse_mind_map(text: &str) -> Result<MindMapRecord, ChatError> {
    let record: MindMapRecord = serde_json::from_str(recover_json(text))
        .map_err(|e| ChatError::ExtractionFormat(e.to_string()))?;
    let violations = record.validate();
    if !violations.is_empty() {
        tracing::warn!(count = violations.len(), ?violations, "mind map has inconsistent parent links");
    }
    Ok(record)
}

impl MirrorClient {
    /// Derive a [`SummaryRecord`] from a transcript.
    pub async fn generate_summary(&self, messages: &[Message]) -> Result<SummaryRecord, ChatError> {
        let answer = self.extract(ArtifactKind::Summary, messages).await?;
        parse_summary(&answer)
    }

    /// Derive a [`MindMapRecord`] from a transcript.
    pub async fn generate_mind_map(&self, messages: &[Message]) -> Result<MindMapRecord, ChatError> {
        let answer = self.extract(ArtifactKind::MindMap, messages).await?;
        parse_mind_map(&answer)
    }

    /// One non-streaming call; returns the raw answer text.
    async fn extract(&self, kind: ArtifactKind, messages: &[Message]) -> Result<String, ChatError> {
        let api_key = self.credential()?;
        let mode = ProviderMode::for_credential(api_key);

        tracing::debug!(artifact = kind.name(), messages = messages.len(), "requesting extraction");

        let response = self
            .send(api_key, mode, kind.instruction(), messages, false)
            .await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(artifact = kind.name(), status = status.as_u16(), "extraction request failed");
            let body = response.text().await.unwrap_or_default();
            return Err(map_extraction_status(status, &body));
        }

        let text = response.text().await.map_err(map_reqwest_error)?;

        let json: Value = serde_json::from_str(&text)
            .map_err(|e| ChatError::Unknown(format!("invalid JSON response: {e}")))?;

        match mode.extract_answer(&json) {
            Some(answer) if !answer.trim().is_empty() => Ok(answer.to_string()),
            _ => Err(ChatError::NoContent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_from_fence() {
        let text = "```json\n{\"a\":1}\n```";
        assert_eq!(recover_json(text), "{\"a\":1}");
    }

    #[test]
    fn recovers_from_untagged_fence_with_prose() {
        let text = "Sure!\n```\n{\"a\":{\"b\":2}}\n```\nHope that helps.";
        assert_eq!(recover_json(text), "{\"a\":{\"b\":2}}");
    }

    #[test]
    fn recovers_from_prose_wrapping() {
        let text = "Here is the map: {\"a\":1} -- enjoy";
        assert_eq!(recover_json(text), "{\"a\":1}");
    }

    #[test]
    fn bare_json_is_untouched() {
        assert_eq!(recover_json("  {\"a\":1}\n"), "{\"a\":1}");
    }

    #[test]
    fn no_braces_returns_trimmed_text() {
        assert_eq!(recover_json(" nothing here "), "nothing here");
    }

    #[test]
    fn summary_parses() {
        let record = parse_summary(
            r#"{"startingPoint":"A stalled essay","assumptions":["x","y"],"endResult":"A new outline"}"#,
        )
        .unwrap();
        assert_eq!(record.assumptions, vec!["x", "y"]);
    }

    #[test]
    fn summary_missing_field_is_format_error() {
        let err = parse_summary(r#"{"startingPoint":"a","assumptions":[]}"#).unwrap_err();
        assert!(matches!(err, ChatError::ExtractionFormat(msg) if msg.contains("endResult")));
    }

    #[test]
    fn summary_blank_field_is_format_error() {
        let err = parse_summary(r#"{"startingPoint":" ","assumptions":[],"endResult":"b"}"#)
            .unwrap_err();
        assert!(matches!(err, ChatError::ExtractionFormat(_)));
    }

    #[test]
    fn mind_map_without_children_key_parses() {
        let record = parse_mind_map(
            r#"{"rootNode":{"id":"root","label":"Novel"},"branches":[{"id":"b1","label":"Theme","parentId":"root"}]}"#,
        )
        .unwrap();
        assert_eq!(record.node_count(), 2);
        assert!(record.branches[0].children.is_empty());
    }

    #[test]
    fn mind_map_without_parent_ids_parses() {
        let record = parse_mind_map(
            r#"{"rootNode":{"id":"root","label":"Novel"},"branches":[{"id":"b1","label":"Theme","type":"theme","children":[{"id":"l1","label":"Loss","type":"insight"}]}]}"#,
        )
        .unwrap();
        assert_eq!(record.node_count(), 3);
        assert_eq!(record.branches[0].children[0].label, "Loss");
    }

    #[test]
    fn garbage_is_format_error() {
        assert!(matches!(
            parse_mind_map("I could not do that."),
            Err(ChatError::ExtractionFormat(_))
        ));
    }
}
