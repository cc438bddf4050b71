//! The document: one page file's complete decoded form.

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use super::SchemaVersion;
use super::identifier::Identifier;
use super::inline::{self, InlineContent};
use super::metadata::Metadata;
use super::reference::Reference;
use super::section::{self, Section};
use crate::codec::{self, At, DecodeError};

codec::string_enum! {
    /// What kind of page a document is.
    pub enum Kind as "Document.kind" {
        Overview = "overview",
        Symbol = "symbol",
        Article = "article",
        Project = "project",
    }
}

/// A module entry in the hierarchy, by reference.
#[derive(Debug, Clone, PartialEq)]
pub struct HierarchyModule {
    pub reference: Identifier,
}

/// Where a page sits in the archive's navigation tree.
///
/// `paths` holds one breadcrumb trail per route leading to the page, each as
/// a list of reference-table identifiers from the root down.
#[derive(Debug, Clone, PartialEq)]
pub struct Hierarchy {
    pub paths: Vec<Vec<String>>,
    pub reference: Option<String>,
    pub modules: Option<Vec<HierarchyModule>>,
}

impl Hierarchy {
    fn decode(v: &Value, at: At<'_>) -> Result<Self, DecodeError> {
        let map = codec::obj(v, at)?;
        Ok(Hierarchy {
            paths: codec::req_seq(map, "paths", at, codec::str_seq)?,
            reference: codec::opt_str(map, "reference", at)?,
            modules: codec::opt_seq(map, "modules", at, decode_hierarchy_module)?,
        })
    }

    fn encode(&self) -> Value {
        let mut map = Map::new();
        map.insert(
            "paths".into(),
            codec::encode_seq(&self.paths, |path| {
                codec::encode_seq(path, |p| codec::str_value(p))
            }),
        );
        if let Some(reference) = &self.reference {
            map.insert("reference".into(), codec::str_value(reference));
        }
        if let Some(modules) = &self.modules {
            map.insert(
                "modules".into(),
                codec::encode_seq(modules, encode_hierarchy_module),
            );
        }
        Value::Object(map)
    }
}

fn decode_hierarchy_module(v: &Value, at: At<'_>) -> Result<HierarchyModule, DecodeError> {
    let map = codec::obj(v, at)?;
    Ok(HierarchyModule {
        reference: Identifier::decode(codec::req(map, "reference", at)?, at.key("reference"))?,
    })
}

fn encode_hierarchy_module(module: &HierarchyModule) -> Value {
    let mut map = Map::new();
    map.insert("reference".into(), module.reference.encode());
    Value::Object(map)
}

/// One rendition of a page (per interface language, typically).
#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
    pub paths: Vec<String>,
    pub traits: Vec<BTreeMap<String, String>>,
}

impl Variant {
    fn decode(v: &Value, at: At<'_>) -> Result<Self, DecodeError> {
        let map = codec::obj(v, at)?;
        Ok(Variant {
            paths: codec::str_seq(codec::req(map, "paths", at)?, at.key("paths"))?,
            traits: codec::req_seq(map, "traits", at, decode_trait)?,
        })
    }

    fn encode(&self) -> Value {
        let mut map = Map::new();
        map.insert(
            "paths".into(),
            codec::encode_seq(&self.paths, |p| codec::str_value(p)),
        );
        map.insert(
            "traits".into(),
            codec::encode_seq(&self.traits, encode_trait),
        );
        Value::Object(map)
    }
}

fn decode_trait(v: &Value, at: At<'_>) -> Result<BTreeMap<String, String>, DecodeError> {
    let map = codec::obj(v, at)?;
    let mut out = BTreeMap::new();
    for (key, value) in map {
        out.insert(key.clone(), codec::string(value, at.key(key))?);
    }
    Ok(out)
}

fn encode_trait(t: &BTreeMap<String, String>) -> Value {
    let mut map = Map::new();
    for (key, value) in t {
        map.insert(key.clone(), codec::str_value(value));
    }
    Value::Object(map)
}

/// A fully decoded page file.
///
/// Every field corresponds one-to-one to a wire key; [`Document::to_value`]
/// reproduces the shape [`Document::from_value`] accepted, including which
/// optional keys exist.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub schema_version: SchemaVersion,
    pub identifier: Identifier,
    pub document_version: Option<i64>,
    pub kind: Kind,
    pub metadata: Metadata,
    pub hierarchy: Hierarchy,
    pub variants: Option<Vec<Variant>>,
    pub abstract_: Option<Vec<InlineContent>>,
    pub sections: Vec<Section>,
    pub topic_sections: Option<Vec<Section>>,
    pub see_also_sections: Option<Vec<Section>>,
    pub primary_content_sections: Option<Vec<Section>>,
    /// Everything the page links to, keyed by identifier URL. A `BTreeMap`
    /// so the encoded table is always in sorted key order.
    pub references: BTreeMap<String, Reference>,
}

impl Document {
    /// Decode a page file from raw bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DecodeError> {
        let value: Value = serde_json::from_slice(bytes)?;
        Self::from_value(&value)
    }

    /// Decode a page file from an already-parsed JSON value.
    pub fn from_value(v: &Value) -> Result<Self, DecodeError> {
        let at = At::Root;
        let map = codec::obj(v, at)?;

        let schema_version = SchemaVersion::decode(
            codec::req(map, "schemaVersion", at)?,
            at.key("schemaVersion"),
        )?;
        if !schema_version.is_supported() {
            return Err(DecodeError::UnsupportedSchemaVersion {
                found: schema_version.to_string(),
            });
        }

        let references_at = at.key("references");
        let mut references = BTreeMap::new();
        for (key, value) in codec::obj(codec::req(map, "references", at)?, references_at)? {
            references.insert(
                key.clone(),
                Reference::decode(value, references_at.key(key))?,
            );
        }

        Ok(Document {
            schema_version,
            identifier: Identifier::decode(
                codec::req(map, "identifier", at)?,
                at.key("identifier"),
            )?,
            document_version: codec::opt(map, "documentVersion")
                .map(|v| codec::integer(v, at.key("documentVersion")))
                .transpose()?,
            kind: Kind::decode(codec::req(map, "kind", at)?, at.key("kind"))?,
            metadata: Metadata::decode(codec::req(map, "metadata", at)?, at.key("metadata"))?,
            hierarchy: Hierarchy::decode(codec::req(map, "hierarchy", at)?, at.key("hierarchy"))?,
            variants: codec::opt_seq(map, "variants", at, Variant::decode)?,
            abstract_: codec::opt(map, "abstract")
                .map(|v| inline::decode_inline_seq(v, at.key("abstract")))
                .transpose()?,
            sections: section::decode_section_seq(
                codec::req(map, "sections", at)?,
                at.key("sections"),
            )?,
            topic_sections: decode_opt_sections(map, "topicSections", at)?,
            see_also_sections: decode_opt_sections(map, "seeAlsoSections", at)?,
            primary_content_sections: decode_opt_sections(map, "primaryContentSections", at)?,
            references,
        })
    }

    /// Encode back to the wire shape.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("schemaVersion".into(), self.schema_version.encode());
        map.insert("identifier".into(), self.identifier.encode());
        if let Some(version) = self.document_version {
            map.insert("documentVersion".into(), version.into());
        }
        map.insert("kind".into(), self.kind.encode());
        map.insert("metadata".into(), self.metadata.encode());
        map.insert("hierarchy".into(), self.hierarchy.encode());
        if let Some(variants) = &self.variants {
            map.insert(
                "variants".into(),
                codec::encode_seq(variants, Variant::encode),
            );
        }
        if let Some(abstract_) = &self.abstract_ {
            map.insert("abstract".into(), inline::encode_inline_seq(abstract_));
        }
        map.insert("sections".into(), section::encode_section_seq(&self.sections));
        if let Some(sections) = &self.topic_sections {
            map.insert("topicSections".into(), section::encode_section_seq(sections));
        }
        if let Some(sections) = &self.see_also_sections {
            map.insert(
                "seeAlsoSections".into(),
                section::encode_section_seq(sections),
            );
        }
        if let Some(sections) = &self.primary_content_sections {
            map.insert(
                "primaryContentSections".into(),
                section::encode_section_seq(sections),
            );
        }
        let mut refs = Map::new();
        for (key, reference) in &self.references {
            refs.insert(key.clone(), reference.encode());
        }
        map.insert("references".into(), Value::Object(refs));
        Value::Object(map)
    }

    /// Encode to bytes, as compact JSON.
    pub fn to_vec(&self) -> Vec<u8> {
        self.to_value().to_string().into_bytes()
    }
}

fn decode_opt_sections(
    map: &Map<String, Value>,
    key: &'static str,
    at: At<'_>,
) -> Result<Option<Vec<Section>>, DecodeError> {
    codec::opt(map, key)
        .map(|v| section::decode_section_seq(v, at.key(key)))
        .transpose()
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Document::from_value(&value).map_err(D::Error::custom)
    }
}
