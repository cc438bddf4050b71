//! The version 0.1 document schema.
//!
//! Everything under this module mirrors one wire shape of the archive's JSON
//! page format. The unions (`Content`, `InlineContent`, `Fragment`,
//! `Reference`, `Section::Kind`, `TaskContent`) each keep their discriminator
//! dispatch next to the variant definitions, so supporting a newly observed
//! variant is a single-site change.
//!
//! Only one schema version exists; [`Document::from_slice`] rejects anything
//! that does not declare 0.1.x.
//!
//! [`Document::from_slice`]: document::Document::from_slice

pub mod content;
pub mod document;
pub mod fragment;
pub mod identifier;
pub mod inline;
pub mod metadata;
pub mod reference;
pub mod section;

use serde_json::{Map, Value};

use crate::codec::{self, At, DecodeError};

codec::string_enum! {
    /// Source language of a symbol or document.
    pub enum InterfaceLanguage as "InterfaceLanguage" {
        Swift = "swift",
    }
}

codec::string_enum! {
    /// Platform a declaration applies to.
    pub enum Platform as "Platform" {
        MacOS = "macOS",
        Ios = "iOS",
        TvOs = "tvOS",
        WatchOs = "watchOS",
        Linux = "linux",
    }
}

codec::string_enum! {
    /// Kind of a symbol, as used by metadata roles and mangled-name guesses.
    pub enum SymbolKind as "SymbolKind" {
        Struct = "struct",
        Module = "module",
        Method = "method",
        Init = "init",
        Property = "property",
        Enum = "enum",
        Case = "case",
        Op = "op",
        Protocol = "protocol",
        Class = "class",
    }
}

/// Version triple declared by every page file. This crate models 0.1 only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl SchemaVersion {
    /// The schema version this crate implements.
    pub const CURRENT: SchemaVersion = SchemaVersion {
        major: 0,
        minor: 1,
        patch: 0,
    };

    /// Whether this crate's model applies to a document with this version.
    pub fn is_supported(self) -> bool {
        self.major == 0 && self.minor == 1
    }

    pub(crate) fn decode(v: &Value, at: At<'_>) -> Result<Self, DecodeError> {
        let map = codec::obj(v, at)?;
        Ok(SchemaVersion {
            major: codec::unsigned(codec::req(map, "major", at)?, at.key("major"))?,
            minor: codec::unsigned(codec::req(map, "minor", at)?, at.key("minor"))?,
            patch: codec::unsigned(codec::req(map, "patch", at)?, at.key("patch"))?,
        })
    }

    pub(crate) fn encode(self) -> Value {
        let mut map = Map::new();
        map.insert("major".into(), self.major.into());
        map.insert("minor".into(), self.minor.into());
        map.insert("patch".into(), self.patch.into());
        Value::Object(map)
    }
}

impl std::fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn schema_version_round_trips() {
        let v = json!({ "major": 0, "minor": 1, "patch": 0 });
        let version = SchemaVersion::decode(&v, At::Root).unwrap();
        assert_eq!(version, SchemaVersion::CURRENT);
        assert_eq!(version.encode(), v);
    }

    #[test]
    fn patch_level_changes_are_supported() {
        let version = SchemaVersion {
            major: 0,
            minor: 1,
            patch: 7,
        };
        assert!(version.is_supported());
        assert!(
            !SchemaVersion {
                major: 0,
                minor: 2,
                patch: 0
            }
            .is_supported()
        );
    }

    #[test]
    fn platform_vocabulary_is_closed() {
        assert_eq!(Platform::from_tag("macOS"), Some(Platform::MacOS));
        let err = Platform::decode(&json!("freebsd"), At::Root).unwrap_err();
        assert!(matches!(err, DecodeError::UnsupportedVariant { .. }));
    }
}
