//! Inline prose runs.

use serde_json::{Map, Value};

use super::identifier::Identifier;
use crate::codec::{self, At, DecodeError};

/// One styled run inside prose content, selected by a `"type"` tag.
///
/// Recursive: `emphasis`, `strong` and an overriding reference title nest
/// further runs. Distinct from [`Fragment`](super::fragment::Fragment), which
/// covers declaration runs under a `"kind"` tag with a different vocabulary.
#[derive(Debug, Clone, PartialEq)]
pub enum InlineContent {
    Text(String),
    /// A link into the document's reference table.
    Reference {
        identifier: Identifier,
        /// Defaults to `true` when the producer omits it.
        is_active: bool,
        overriding_title: Option<String>,
        overriding_title_inline_content: Option<Vec<InlineContent>>,
    },
    /// An image, by reference-table identifier.
    Image { identifier: String },
    Emphasis(Vec<InlineContent>),
    Strong(Vec<InlineContent>),
    CodeVoice(String),
}

impl InlineContent {
    pub(crate) fn decode(v: &Value, at: At<'_>) -> Result<Self, DecodeError> {
        let map = codec::obj(v, at)?;
        let ty = codec::req_str(map, "type", at)?;

        Ok(match ty.as_str() {
            "text" => InlineContent::Text(codec::req_str(map, "text", at)?),
            "codeVoice" => InlineContent::CodeVoice(codec::req_str(map, "code", at)?),
            "image" => InlineContent::Image {
                identifier: codec::req_str(map, "identifier", at)?,
            },
            "emphasis" => InlineContent::Emphasis(codec::req_seq(
                map,
                "inlineContent",
                at,
                InlineContent::decode,
            )?),
            "strong" => InlineContent::Strong(codec::req_seq(
                map,
                "inlineContent",
                at,
                InlineContent::decode,
            )?),
            "reference" => InlineContent::Reference {
                identifier: Identifier::decode(
                    codec::req(map, "identifier", at)?,
                    at.key("identifier"),
                )?,
                is_active: codec::opt_bool(map, "isActive", at)?.unwrap_or(true),
                overriding_title: codec::opt_str(map, "overridingTitle", at)?,
                overriding_title_inline_content: codec::opt_seq(
                    map,
                    "overridingTitleInlineContent",
                    at,
                    InlineContent::decode,
                )?,
            },
            other => return Err(codec::unsupported("InlineContent.type", other, at)),
        })
    }

    pub(crate) fn encode(&self) -> Value {
        let mut map = Map::new();
        match self {
            InlineContent::Text(text) => {
                map.insert("type".into(), codec::str_value("text"));
                map.insert("text".into(), codec::str_value(text));
            }
            InlineContent::CodeVoice(code) => {
                map.insert("type".into(), codec::str_value("codeVoice"));
                map.insert("code".into(), codec::str_value(code));
            }
            InlineContent::Image { identifier } => {
                map.insert("type".into(), codec::str_value("image"));
                map.insert("identifier".into(), codec::str_value(identifier));
            }
            InlineContent::Emphasis(content) => {
                map.insert("type".into(), codec::str_value("emphasis"));
                map.insert(
                    "inlineContent".into(),
                    codec::encode_seq(content, InlineContent::encode),
                );
            }
            InlineContent::Strong(content) => {
                map.insert("type".into(), codec::str_value("strong"));
                map.insert(
                    "inlineContent".into(),
                    codec::encode_seq(content, InlineContent::encode),
                );
            }
            InlineContent::Reference {
                identifier,
                is_active,
                overriding_title,
                overriding_title_inline_content,
            } => {
                map.insert("type".into(), codec::str_value("reference"));
                map.insert("identifier".into(), identifier.encode());
                // isActive is written even when true; producers emit it
                // explicitly and the decode default only covers the ones
                // that do not.
                map.insert("isActive".into(), Value::Bool(*is_active));
                if let Some(title) = overriding_title {
                    map.insert("overridingTitle".into(), codec::str_value(title));
                }
                if let Some(content) = overriding_title_inline_content {
                    map.insert(
                        "overridingTitleInlineContent".into(),
                        codec::encode_seq(content, InlineContent::encode),
                    );
                }
            }
        }
        Value::Object(map)
    }
}

pub(crate) fn decode_inline_seq(v: &Value, at: At<'_>) -> Result<Vec<InlineContent>, DecodeError> {
    codec::seq(v, at, InlineContent::decode)
}

pub(crate) fn encode_inline_seq(content: &[InlineContent]) -> Value {
    codec::encode_seq(content, InlineContent::encode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::InterfaceLanguage;
    use serde_json::json;

    #[test]
    fn text_round_trips() {
        let v = json!({ "type": "text", "text": "Hello." });
        let c = InlineContent::decode(&v, At::Root).unwrap();
        assert_eq!(c, InlineContent::Text("Hello.".into()));
        assert_eq!(c.encode(), v);
    }

    #[test]
    fn reference_is_active_defaults_to_true() {
        let v = json!({ "type": "reference", "identifier": "doc://A/B" });
        match InlineContent::decode(&v, At::Root).unwrap() {
            InlineContent::Reference { is_active, .. } => assert!(is_active),
            other => panic!("expected reference, got {other:?}"),
        }
    }

    #[test]
    fn reference_with_overriding_title_round_trips() {
        let v = json!({
            "type": "reference",
            "identifier": "https://github.com/3Qax",
            "isActive": true,
            "overridingTitle": "@3Qax",
            "overridingTitleInlineContent": [
                { "type": "text", "text": "@3Qax" }
            ]
        });
        let c = InlineContent::decode(&v, At::Root).unwrap();
        match &c {
            InlineContent::Reference {
                identifier,
                overriding_title,
                overriding_title_inline_content,
                ..
            } => {
                assert_eq!(identifier, &Identifier::new("https://github.com/3Qax"));
                assert_eq!(overriding_title.as_deref(), Some("@3Qax"));
                assert_eq!(
                    overriding_title_inline_content.as_ref().map(Vec::len),
                    Some(1)
                );
            }
            other => panic!("expected reference, got {other:?}"),
        }
        assert_eq!(c.encode(), v);
    }

    #[test]
    fn reference_identifier_accepts_object_form() {
        let v = json!({
            "type": "reference",
            "identifier": { "url": "doc://A/B", "interfaceLanguage": "swift" }
        });
        match InlineContent::decode(&v, At::Root).unwrap() {
            InlineContent::Reference { identifier, .. } => {
                assert_eq!(
                    identifier,
                    Identifier::with_language("doc://A/B", InterfaceLanguage::Swift)
                );
            }
            other => panic!("expected reference, got {other:?}"),
        }
    }

    #[test]
    fn emphasis_and_strong_nest() {
        let v = json!({
            "type": "strong",
            "inlineContent": [
                { "type": "emphasis", "inlineContent": [
                    { "type": "text", "text": "deep" }
                ]}
            ]
        });
        let c = InlineContent::decode(&v, At::Root).unwrap();
        assert_eq!(c.encode(), v);
    }

    #[test]
    fn unknown_type_is_unsupported_variant() {
        let v = json!({ "type": "superscript", "text": "2" });
        let err = InlineContent::decode(&v, At::Root).unwrap_err();
        match err {
            DecodeError::UnsupportedVariant { union, value, .. } => {
                assert_eq!(union, "InlineContent.type");
                assert_eq!(value, "superscript");
            }
            other => panic!("expected UnsupportedVariant, got {other:?}"),
        }
    }

    #[test]
    fn fragment_kind_does_not_decode_as_inline_content() {
        // `keyword` is a Fragment kind; the vocabularies must not bleed.
        let v = json!({ "type": "keyword", "text": "struct" });
        assert!(matches!(
            InlineContent::decode(&v, At::Root),
            Err(DecodeError::UnsupportedVariant { .. })
        ));
    }
}
