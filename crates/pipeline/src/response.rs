//! Plain-text extraction from a provider response envelope.
//!
//! Providers hand back either a single string or an ordered list of content
//! blocks. A block is a bare string or a JSON object that may carry a `text`
//! field (optionally tagged `"type": "text"`). Extraction keeps the text of
//! every block that has some, in order, joined by newlines. When no block
//! carries text, the whole payload is rendered as JSON instead so the caller
//! still sees *something* in the output panel.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One element of a block-list payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentBlock {
    Plain(String),
    Structured(Map<String, Value>),
}

impl ContentBlock {
    /// Convenience constructor for a `{"type": "text", "text": ...}` block.
    pub fn text(text: impl Into<String>) -> Self {
        let mut map = Map::new();
        map.insert("type".to_string(), Value::String("text".to_string()));
        map.insert("text".to_string(), Value::String(text.into()));
        Self::Structured(map)
    }

    /// The text this block carries, if any.
    ///
    /// A `type` discriminator other than `"text"` does not hide a `text`
    /// field; only the presence of a string `text` value matters.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Plain(s) => Some(s),
            Self::Structured(map) => map.get("text").and_then(Value::as_str),
        }
    }
}

/// The payload of a successful completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponsePayload {
    Text(String),
    Blocks(Vec<ContentBlock>),
}

impl ResponsePayload {
    /// Returns the plain text of this payload.
    ///
    /// A [`ResponsePayload::Text`] comes back unchanged.
    pub fn extract_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Blocks(blocks) => {
                let parts: Vec<&str> = blocks.iter().filter_map(ContentBlock::as_text).collect();
                if parts.is_empty() {
                    serde_json::to_string(blocks).unwrap_or_default()
                } else {
                    parts.join("\n")
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn blocks(value: Value) -> ResponsePayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn plain_text_is_returned_unchanged() {
        let payload = ResponsePayload::Text("line one\nline two".to_string());
        assert_eq!(payload.extract_text(), "line one\nline two");
        assert_eq!(
            ResponsePayload::Text(payload.extract_text()).extract_text(),
            payload.extract_text()
        );
    }

    #[test]
    fn only_text_bearing_blocks_are_joined_in_order() {
        let payload = blocks(json!([{"text": "A"}, {"type": "note"}, {"text": "B"}]));
        assert_eq!(payload.extract_text(), "A\nB");
    }

    #[test]
    fn bare_string_blocks_count_as_text() {
        let payload = blocks(json!(["first", {"type": "text", "text": "second"}]));
        assert_eq!(payload.extract_text(), "first\nsecond");
    }

    #[test]
    fn falls_back_to_whole_payload_when_no_block_has_text() {
        let payload = blocks(json!([{"type": "image"}, {"thought_signature": "x"}]));
        assert_eq!(
            payload.extract_text(),
            r#"[{"type":"image"},{"thought_signature":"x"}]"#
        );
    }

    #[test]
    fn non_string_text_fields_are_ignored() {
        let payload = blocks(json!([{"text": 42}, {"text": "kept"}]));
        assert_eq!(payload.extract_text(), "kept");
    }

    #[test]
    fn deserialises_plain_string_payload() {
        let payload: ResponsePayload = serde_json::from_value(json!("hello")).unwrap();
        assert_eq!(payload, ResponsePayload::Text("hello".to_string()));
    }
}
