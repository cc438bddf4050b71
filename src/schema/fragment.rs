//! Declaration and navigator-title runs.
//!
//! A [`Fragment`] is one styled run inside a declaration or a navigator
//! title. It looks a lot like [`InlineContent`](super::inline::InlineContent)
//! but is a different union over a different tag vocabulary, selected by
//! `"kind"` where inline content uses `"type"`. The two must stay separate
//! types: merging them would let a fragment decode where inline content is
//! expected (and vice versa), silently widening both vocabularies.

use serde_json::{Map, Value};

use super::identifier::{Identifier, TypeIdentifier};
use crate::codec::{self, At, DecodeError};

/// A sequence of fragments, as carried by declarations and navigator titles.
pub type Block = Vec<Fragment>;

/// One styled run of a declaration or navigator title.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    Text(String),
    Keyword(String),
    Identifier(String),
    ExternalParam(String),
    InternalParam(String),
    /// The `T` in `Array<T>`, without the angle brackets.
    GenericParameter(String),
    /// An attribute such as `@IBInspectable`.
    Attribute(String),
    /// A type reference. The identifier pair is present inside declarations
    /// but absent when the fragment appears in reference records.
    TypeIdentifier {
        text: String,
        identifier: Option<Identifier>,
        precise_identifier: Option<TypeIdentifier>,
    },
}

impl Fragment {
    /// The display text of the run, whatever its kind.
    pub fn text(&self) -> &str {
        match self {
            Fragment::Text(s)
            | Fragment::Keyword(s)
            | Fragment::Identifier(s)
            | Fragment::ExternalParam(s)
            | Fragment::InternalParam(s)
            | Fragment::GenericParameter(s)
            | Fragment::Attribute(s) => s,
            Fragment::TypeIdentifier { text, .. } => text,
        }
    }

    fn kind_tag(&self) -> &'static str {
        match self {
            Fragment::Text(_) => "text",
            Fragment::Keyword(_) => "keyword",
            Fragment::Identifier(_) => "identifier",
            Fragment::ExternalParam(_) => "externalParam",
            Fragment::InternalParam(_) => "internalParam",
            Fragment::GenericParameter(_) => "genericParameter",
            Fragment::Attribute(_) => "attribute",
            Fragment::TypeIdentifier { .. } => "typeIdentifier",
        }
    }

    pub(crate) fn decode(v: &Value, at: At<'_>) -> Result<Self, DecodeError> {
        let map = codec::obj(v, at)?;
        let kind = codec::req_str(map, "kind", at)?;
        let text = || codec::req_str(map, "text", at);

        Ok(match kind.as_str() {
            "text" => Fragment::Text(text()?),
            "keyword" => Fragment::Keyword(text()?),
            "identifier" => Fragment::Identifier(text()?),
            "externalParam" => Fragment::ExternalParam(text()?),
            "internalParam" => Fragment::InternalParam(text()?),
            "genericParameter" => Fragment::GenericParameter(text()?),
            "attribute" => Fragment::Attribute(text()?),
            "typeIdentifier" => Fragment::TypeIdentifier {
                text: text()?,
                identifier: codec::opt(map, "identifier")
                    .map(|v| Identifier::decode(v, at.key("identifier")))
                    .transpose()?,
                precise_identifier: codec::opt(map, "preciseIdentifier")
                    .map(|v| TypeIdentifier::decode(v, at.key("preciseIdentifier")))
                    .transpose()?,
            },
            other => return Err(codec::unsupported("Fragment.kind", other, at)),
        })
    }

    pub(crate) fn encode(&self) -> Value {
        let mut map = Map::new();
        map.insert("kind".into(), codec::str_value(self.kind_tag()));
        map.insert("text".into(), codec::str_value(self.text()));

        if let Fragment::TypeIdentifier {
            identifier,
            precise_identifier,
            ..
        } = self
        {
            if let Some(id) = identifier {
                map.insert("identifier".into(), id.encode());
            }
            if let Some(tid) = precise_identifier {
                map.insert("preciseIdentifier".into(), tid.encode());
            }
        }
        Value::Object(map)
    }
}

pub(crate) fn decode_block(v: &Value, at: At<'_>) -> Result<Block, DecodeError> {
    codec::seq(v, at, Fragment::decode)
}

pub(crate) fn encode_block(block: &Block) -> Value {
    codec::encode_seq(block, Fragment::encode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keyword_round_trips() {
        let v = json!({ "kind": "keyword", "text": "struct" });
        let f = Fragment::decode(&v, At::Root).unwrap();
        assert_eq!(f, Fragment::Keyword("struct".into()));
        assert_eq!(f.encode(), v);
    }

    #[test]
    fn type_identifier_carries_both_identifiers_in_declarations() {
        let v = json!({
            "kind": "typeIdentifier",
            "text": "Date",
            "identifier": "doc://Foundation/documentation/Foundation/Date",
            "preciseIdentifier": "s:10Foundation4DateV"
        });
        let f = Fragment::decode(&v, At::Root).unwrap();
        match &f {
            Fragment::TypeIdentifier {
                text,
                identifier,
                precise_identifier,
            } => {
                assert_eq!(text, "Date");
                assert!(identifier.is_some());
                assert_eq!(
                    precise_identifier.as_ref().unwrap().parts(),
                    vec!["Foundation", "Date"]
                );
            }
            other => panic!("expected typeIdentifier, got {other:?}"),
        }
        assert_eq!(f.encode(), v);
    }

    #[test]
    fn type_identifier_without_identifiers_omits_the_keys() {
        let v = json!({ "kind": "typeIdentifier", "text": "Int" });
        let f = Fragment::decode(&v, At::Root).unwrap();
        assert_eq!(f.encode(), v);
    }

    #[test]
    fn unknown_kind_is_unsupported_variant() {
        let v = json!({ "kind": "label", "text": "x" });
        let err = Fragment::decode(&v, At::Root).unwrap_err();
        match err {
            DecodeError::UnsupportedVariant { union, value, .. } => {
                assert_eq!(union, "Fragment.kind");
                assert_eq!(value, "label");
            }
            other => panic!("expected UnsupportedVariant, got {other:?}"),
        }
    }

    #[test]
    fn missing_kind_is_a_structural_error() {
        let v = json!({ "text": "x" });
        let err = Fragment::decode(&v, At::Root).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedField { ref path, .. } if path == "$.kind"));
    }

    #[test]
    fn text_accessor_spans_all_variants() {
        assert_eq!(Fragment::GenericParameter("T".into()).text(), "T");
        assert_eq!(Fragment::Attribute("@main".into()).text(), "@main");
    }
}
