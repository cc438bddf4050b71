//! Identifiers: the URL-based document identifier and the mangled symbol name.

use serde_json::{Map, Value};

use super::{InterfaceLanguage, SymbolKind};
use crate::codec::{self, At, DecodeError};

/// A URL-based identifier with an optional interface language.
///
/// Two wire shapes are valid: a bare string (`"doc://A/B"`) or an object
/// (`{"url": "doc://A/B", "interfaceLanguage": "swift"}`). Decode accepts
/// both; encode reproduces the shape implied by the value — bare string when
/// no language is attached, object otherwise — so re-encoding never flips a
/// document between the two forms.
///
/// The URL is kept verbatim as a string. Identifiers are opaque lookup keys
/// into the document's reference table; parsing them into a URL type would
/// normalize and break byte-stable re-encoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    pub url: String,
    pub interface_language: Option<InterfaceLanguage>,
}

impl Identifier {
    pub fn new(url: impl Into<String>) -> Self {
        Identifier {
            url: url.into(),
            interface_language: None,
        }
    }

    pub fn with_language(url: impl Into<String>, language: InterfaceLanguage) -> Self {
        Identifier {
            url: url.into(),
            interface_language: Some(language),
        }
    }

    pub(crate) fn decode(v: &Value, at: At<'_>) -> Result<Self, DecodeError> {
        match v {
            Value::String(url) => Ok(Identifier::new(url.clone())),
            Value::Object(map) => Ok(Identifier {
                url: codec::req_str(map, "url", at)?,
                interface_language: codec::opt(map, "interfaceLanguage")
                    .map(|v| InterfaceLanguage::decode(v, at.key("interfaceLanguage")))
                    .transpose()?,
            }),
            _ => Err(codec::malformed(at, "identifier string or object")),
        }
    }

    pub(crate) fn encode(&self) -> Value {
        match self.interface_language {
            None => codec::str_value(&self.url),
            Some(language) => {
                let mut map = Map::new();
                map.insert("url".into(), codec::str_value(&self.url));
                map.insert("interfaceLanguage".into(), language.encode());
                Value::Object(map)
            }
        }
    }
}

/// A mangled symbol name, e.g. `s:10Foundation4DateV`.
///
/// Wire form is a bare string. The decomposition into name segments and the
/// symbol-kind guess are derived on demand; nothing is precomputed or cached,
/// keeping the value a plain string on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeIdentifier {
    pub mangled_name: String,
}

impl TypeIdentifier {
    pub fn new(mangled_name: impl Into<String>) -> Self {
        TypeIdentifier {
            mangled_name: mangled_name.into(),
        }
    }

    /// Guess the symbol kind from the mangling prefix character.
    ///
    /// `s` is a struct, `c` a class. Any other prefix is merely
    /// unrecognized — `None`, not an error — since the full mangling
    /// grammar is not modeled here.
    pub fn symbol_kind(&self) -> Option<SymbolKind> {
        match self.mangled_name.chars().next() {
            Some('s') => Some(SymbolKind::Struct),
            Some('c') => Some(SymbolKind::Class),
            _ => None,
        }
    }

    /// The length-prefixed name segments after the kind prefix.
    ///
    /// `s:10Foundation4DateV` yields `["Foundation", "Date"]`. Everything
    /// after the last complete segment (here `V`) is discarded; see
    /// [`split_length_prefixed`] for the exact stopping rule.
    pub fn parts(&self) -> Vec<&str> {
        match self.mangled_name.split_once(':') {
            Some((_, rest)) => split_length_prefixed(rest).0,
            None => Vec::new(),
        }
    }

    pub(crate) fn decode(v: &Value, at: At<'_>) -> Result<Self, DecodeError> {
        Ok(TypeIdentifier::new(codec::string(v, at)?))
    }

    pub(crate) fn encode(&self) -> Value {
        codec::str_value(&self.mangled_name)
    }
}

/// Splits a run of length-prefixed segments, returning the segments and the
/// unparsed suffix.
///
/// Repeatedly reads a decimal digit run as a length N and takes the next N
/// characters as one segment. Stops when there is no digit run, N is zero,
/// or fewer than N characters remain. The suffix is whatever is left at that
/// point; `parts()` drops it. Whether discarding the suffix loses real
/// information is unresolved (mangled names carry trailing type markers),
/// so the behavior is kept as observed rather than extended.
fn split_length_prefixed(input: &str) -> (Vec<&str>, &str) {
    let mut parts = Vec::new();
    let mut rest = input;

    loop {
        let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
        if digits == 0 {
            break;
        }
        let len: usize = match rest[..digits].parse() {
            Ok(n) if n > 0 => n,
            _ => break,
        };
        let body = &rest[digits..];
        let end = match body.char_indices().nth(len - 1) {
            Some((i, c)) => i + c.len_utf8(),
            None => break, // announced length runs past the end
        };
        parts.push(&body[..end]);
        rest = &body[end..];
    }

    (parts, rest)
}
