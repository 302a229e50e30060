use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Persisted, location-independent description of a text range.
///
/// Serialized as a JSON object discriminated by its `type` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Selector {
    /// The selected text plus a little context on each side.
    #[serde(rename = "TextQuoteSelector")]
    TextQuote {
        exact: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        prefix: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        suffix: Option<String>,
    },

    /// Character offsets into the root's flattened text.
    #[serde(rename = "TextPositionSelector")]
    TextPosition { start: usize, end: usize },

    /// Container paths relative to the root plus character offsets within
    /// each container.
    #[serde(rename = "RangeSelector", rename_all = "camelCase")]
    Range {
        start_container: String,
        start_offset: usize,
        end_container: String,
        end_offset: usize,
    },
}

impl Selector {
    /// Parse a single selector object.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Selector::TextQuote { .. } => "TextQuoteSelector",
            Selector::TextPosition { .. } => "TextPositionSelector",
            Selector::Range { .. } => "RangeSelector",
        }
    }
}

/// Parse a JSON array of selectors. Any malformed entry fails the whole list.
pub fn selectors_from_json(json: &str) -> Result<Vec<Selector>> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnchorError;
    use pretty_assertions::assert_eq;

    #[test]
    fn quote_selector_omits_missing_context() {
        let selector = Selector::TextQuote {
            exact: "brown fox".to_string(),
            prefix: Some("quick ".to_string()),
            suffix: None,
        };
        insta::assert_snapshot!(
            selector.to_json().unwrap(),
            @r#"{"type":"TextQuoteSelector","exact":"brown fox","prefix":"quick "}"#
        );
    }

    #[test]
    fn range_selector_uses_camel_case_fields() {
        let selector = Selector::Range {
            start_container: "/p[1]".to_string(),
            start_offset: 2,
            end_container: "/p[2]".to_string(),
            end_offset: 0,
        };
        insta::assert_snapshot!(
            selector.to_json().unwrap(),
            @r#"{"type":"RangeSelector","startContainer":"/p[1]","startOffset":2,"endContainer":"/p[2]","endOffset":0}"#
        );
    }

    #[test]
    fn parses_a_selector_list() {
        let json = r#"[
            {"type": "TextPositionSelector", "start": 4, "end": 9},
            {"type": "TextQuoteSelector", "exact": "quick"}
        ]"#;
        let selectors = selectors_from_json(json).unwrap();
        assert_eq!(
            selectors,
            vec![
                Selector::TextPosition { start: 4, end: 9 },
                Selector::TextQuote {
                    exact: "quick".to_string(),
                    prefix: None,
                    suffix: None
                },
            ]
        );
        assert_eq!(selectors[0].kind(), "TextPositionSelector");
    }

    #[test]
    fn unknown_type_is_malformed() {
        let err = Selector::from_json(r#"{"type": "CssSelector", "value": "p"}"#).unwrap_err();
        assert!(matches!(err, AnchorError::MalformedSelector(_)));
    }

    #[test]
    fn missing_field_is_malformed() {
        let err = Selector::from_json(r#"{"type": "TextPositionSelector", "start": 1}"#).unwrap_err();
        assert!(matches!(err, AnchorError::MalformedSelector(_)));
    }
}
