//! JSON decode/encode plumbing shared by every schema type.
//!
//! The schema is a family of discriminated unions whose wire form selects a
//! variant through a `"type"` or `"kind"` string field. None of the shapes
//! are guaranteed by an external grammar — they were reverse-engineered from
//! real archives — so the decoder's job is to fail *precisely*: an unknown
//! discriminator must surface as [`DecodeError::UnsupportedVariant`] naming
//! the union and the observed string, while a missing or wrongly-typed field
//! is a structurally different [`DecodeError::MalformedField`] carrying the
//! exact JSON path.
//!
//! Decoding therefore works over [`serde_json::Value`] with explicit field
//! helpers instead of derived `Deserialize` impls: derives would collapse
//! both failure classes into one stringly error. Encoding builds
//! [`serde_json::Map`]s directly, which (with the `preserve_order` feature)
//! makes key order exactly the insertion order of each encoder — stable
//! across runs, as the round-trip contract requires.
//!
//! ## Error paths without allocation
//!
//! [`At`] is a parent-linked location tracker borrowed down the decode
//! recursion. Descending into `sections[2].content[0]` allocates nothing;
//! the path string is only rendered when an error is actually produced.

use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// Failure to decode a document from its JSON wire form.
///
/// One document decode produces at most one error; nothing is partially
/// constructed. Batch policy (skip, log, abort) is the caller's decision.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The input was not valid JSON at all.
    #[error("invalid JSON: {0}")]
    Syntax(#[from] serde_json::Error),

    /// A discriminator (or other closed-vocabulary string) held a value
    /// outside the known set. Never recovered into a placeholder variant:
    /// coercing unknown input to a known shape would corrupt data.
    #[error("unsupported {union} `{value}` at {path}")]
    UnsupportedVariant {
        union: &'static str,
        value: String,
        path: String,
    },

    /// A required field was absent, or a field held the wrong JSON type.
    #[error("missing or malformed field at {path}: expected {expected}")]
    MalformedField {
        path: String,
        expected: &'static str,
    },

    /// The document declares a schema version this model does not cover.
    #[error("unsupported schema version {found}, expected 0.1.x")]
    UnsupportedSchemaVersion { found: String },
}

/// Location in the JSON tree being decoded, as a parent-linked chain.
///
/// Copyable and allocation-free; renders as a JSONPath-like string
/// (`$.sections[2].kind`) via `Display` when an error needs it.
#[derive(Clone, Copy)]
pub enum At<'a> {
    Root,
    Key(&'a At<'a>, &'a str),
    Index(&'a At<'a>, usize),
}

impl<'a> At<'a> {
    pub(crate) fn key<'b>(&'b self, key: &'b str) -> At<'b> {
        At::Key(self, key)
    }

    pub(crate) fn index(&self, index: usize) -> At<'_> {
        At::Index(self, index)
    }
}

impl fmt::Display for At<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            At::Root => write!(f, "$"),
            At::Key(parent, key) => write!(f, "{parent}.{key}"),
            At::Index(parent, index) => write!(f, "{parent}[{index}]"),
        }
    }
}

pub(crate) fn malformed(at: At<'_>, expected: &'static str) -> DecodeError {
    DecodeError::MalformedField {
        path: at.to_string(),
        expected,
    }
}

pub(crate) fn unsupported(
    union: &'static str,
    value: impl Into<String>,
    at: At<'_>,
) -> DecodeError {
    DecodeError::UnsupportedVariant {
        union,
        value: value.into(),
        path: at.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Value-level accessors
// ---------------------------------------------------------------------------

pub(crate) fn obj<'v>(v: &'v Value, at: At<'_>) -> Result<&'v Map<String, Value>, DecodeError> {
    v.as_object().ok_or_else(|| malformed(at, "object"))
}

pub(crate) fn array<'v>(v: &'v Value, at: At<'_>) -> Result<&'v Vec<Value>, DecodeError> {
    v.as_array().ok_or_else(|| malformed(at, "array"))
}

pub(crate) fn string(v: &Value, at: At<'_>) -> Result<String, DecodeError> {
    v.as_str()
        .map(str::to_owned)
        .ok_or_else(|| malformed(at, "string"))
}

pub(crate) fn boolean(v: &Value, at: At<'_>) -> Result<bool, DecodeError> {
    v.as_bool().ok_or_else(|| malformed(at, "boolean"))
}

pub(crate) fn integer(v: &Value, at: At<'_>) -> Result<i64, DecodeError> {
    v.as_i64().ok_or_else(|| malformed(at, "integer"))
}

pub(crate) fn unsigned(v: &Value, at: At<'_>) -> Result<u32, DecodeError> {
    v.as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| malformed(at, "unsigned integer"))
}

/// Decode every element of a JSON array with `f`, tracking indices.
pub(crate) fn seq<T>(
    v: &Value,
    at: At<'_>,
    f: impl Fn(&Value, At<'_>) -> Result<T, DecodeError>,
) -> Result<Vec<T>, DecodeError> {
    let items = array(v, at)?;
    let mut out = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        out.push(f(item, at.index(i))?);
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Object-field accessors
// ---------------------------------------------------------------------------

/// Required field. Absence is a malformed-field error at `at.key`.
pub(crate) fn req<'v>(
    map: &'v Map<String, Value>,
    key: &'static str,
    at: At<'_>,
) -> Result<&'v Value, DecodeError> {
    map.get(key)
        .ok_or_else(|| malformed(at.key(key), "required field"))
}

/// Optional field. Explicit `null` counts as absent, matching how the
/// archives' own producers treat optionality.
pub(crate) fn opt<'v>(map: &'v Map<String, Value>, key: &str) -> Option<&'v Value> {
    match map.get(key) {
        None | Some(Value::Null) => None,
        Some(v) => Some(v),
    }
}

pub(crate) fn req_str(
    map: &Map<String, Value>,
    key: &'static str,
    at: At<'_>,
) -> Result<String, DecodeError> {
    string(req(map, key, at)?, at.key(key))
}

pub(crate) fn opt_str(
    map: &Map<String, Value>,
    key: &'static str,
    at: At<'_>,
) -> Result<Option<String>, DecodeError> {
    opt(map, key).map(|v| string(v, at.key(key))).transpose()
}

pub(crate) fn opt_bool(
    map: &Map<String, Value>,
    key: &'static str,
    at: At<'_>,
) -> Result<Option<bool>, DecodeError> {
    opt(map, key).map(|v| boolean(v, at.key(key))).transpose()
}

pub(crate) fn opt_u32(
    map: &Map<String, Value>,
    key: &'static str,
    at: At<'_>,
) -> Result<Option<u32>, DecodeError> {
    opt(map, key).map(|v| unsigned(v, at.key(key))).transpose()
}

/// Required array field decoded element-wise.
pub(crate) fn req_seq<T>(
    map: &Map<String, Value>,
    key: &'static str,
    at: At<'_>,
    f: impl Fn(&Value, At<'_>) -> Result<T, DecodeError>,
) -> Result<Vec<T>, DecodeError> {
    seq(req(map, key, at)?, at.key(key), f)
}

/// Optional array field; `None` when absent.
pub(crate) fn opt_seq<T>(
    map: &Map<String, Value>,
    key: &'static str,
    at: At<'_>,
    f: impl Fn(&Value, At<'_>) -> Result<T, DecodeError>,
) -> Result<Option<Vec<T>>, DecodeError> {
    opt(map, key).map(|v| seq(v, at.key(key), f)).transpose()
}

/// Optional array field defaulting to empty, for the wire fields whose
/// absence means "no entries" (`metadata.fragments`, `section.identifiers`).
pub(crate) fn seq_or_empty<T>(
    map: &Map<String, Value>,
    key: &'static str,
    at: At<'_>,
    f: impl Fn(&Value, At<'_>) -> Result<T, DecodeError>,
) -> Result<Vec<T>, DecodeError> {
    Ok(opt_seq(map, key, at, f)?.unwrap_or_default())
}

/// Array of plain strings (code listing lines, hierarchy path components).
pub(crate) fn str_seq(v: &Value, at: At<'_>) -> Result<Vec<String>, DecodeError> {
    seq(v, at, string)
}

// ---------------------------------------------------------------------------
// Encode helpers
// ---------------------------------------------------------------------------

pub(crate) fn str_value(s: &str) -> Value {
    Value::String(s.to_owned())
}

pub(crate) fn encode_seq<T>(items: &[T], f: impl Fn(&T) -> Value) -> Value {
    Value::Array(items.iter().map(f).collect())
}

/// Defines a closed string vocabulary: an enum, its wire tags, and
/// decode/encode against the [`DecodeError`] taxonomy. The tag table is the
/// single site to touch when a new value shows up in an archive.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident as $union:literal {
            $($(#[$vmeta:meta])* $variant:ident = $tag:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Wire tag of this value.
            pub fn tag(self) -> &'static str {
                match self {
                    $(Self::$variant => $tag),+
                }
            }

            /// Parse a wire tag; `None` for anything outside the vocabulary.
            pub fn from_tag(tag: &str) -> Option<Self> {
                match tag {
                    $($tag => Some(Self::$variant),)+
                    _ => None,
                }
            }

            pub(crate) fn decode(
                value: &serde_json::Value,
                at: $crate::codec::At<'_>,
            ) -> Result<Self, $crate::codec::DecodeError> {
                let s = $crate::codec::string(value, at)?;
                Self::from_tag(&s).ok_or_else(|| $crate::codec::unsupported($union, s, at))
            }

            pub(crate) fn encode(self) -> serde_json::Value {
                serde_json::Value::String(self.tag().to_owned())
            }
        }
    };
}

pub(crate) use string_enum;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn path_renders_keys_and_indices() {
        let root = At::Root;
        let sections = root.key("sections");
        let second = sections.index(1);
        let kind = second.key("kind");
        assert_eq!(kind.to_string(), "$.sections[1].kind");
    }

    #[test]
    fn required_field_error_names_the_field() {
        let map = Map::new();
        let err = req(&map, "title", At::Root).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedField { ref path, .. } if path == "$.title"));
    }

    #[test]
    fn explicit_null_counts_as_absent() {
        let v = json!({ "syntax": null });
        let map = v.as_object().unwrap();
        assert!(opt(map, "syntax").is_none());
        assert!(opt(map, "missing").is_none());
    }

    #[test]
    fn seq_reports_failing_index() {
        let v = json!(["ok", 3]);
        let err = str_seq(&v, At::Root).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedField { ref path, .. } if path == "$[1]"));
    }

    string_enum! {
        enum Sample as "Sample" {
            One = "one",
            Two = "two",
        }
    }

    #[test]
    fn string_enum_rejects_unknown_tags_as_unsupported() {
        let err = Sample::decode(&json!("three"), At::Root).unwrap_err();
        match err {
            DecodeError::UnsupportedVariant { union, value, .. } => {
                assert_eq!(union, "Sample");
                assert_eq!(value, "three");
            }
            other => panic!("expected UnsupportedVariant, got {other:?}"),
        }
    }

    #[test]
    fn string_enum_round_trips_tags() {
        assert_eq!(Sample::from_tag("two"), Some(Sample::Two));
        assert_eq!(Sample::Two.encode(), json!("two"));
    }
}
