//! Document metadata: role, title, declaration fragments, modules.

use serde_json::{Map, Value};

use super::SymbolKind;
use super::fragment::{self, Block};
use crate::codec::{self, At, DecodeError};

/// The role a document or reference plays.
///
/// `symbol` optionally carries a [`SymbolKind`]: document metadata stores it
/// in a sibling `symbolKind` key, while reference records use the bare role
/// string with no kind. Both contexts share this one type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Symbol(Option<SymbolKind>),
    PseudoSymbol,
    Overview,
    Collection,
    CollectionGroup,
    Article,
    Project,
}

impl Role {
    pub fn tag(self) -> &'static str {
        match self {
            Role::Symbol(_) => "symbol",
            Role::PseudoSymbol => "pseudoSymbol",
            Role::Overview => "overview",
            Role::Collection => "collection",
            Role::CollectionGroup => "collectionGroup",
            Role::Article => "article",
            Role::Project => "project",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Some(match tag {
            "symbol" => Role::Symbol(None),
            "pseudoSymbol" => Role::PseudoSymbol,
            "overview" => Role::Overview,
            "collection" => Role::Collection,
            "collectionGroup" => Role::CollectionGroup,
            "article" => Role::Article,
            "project" => Role::Project,
            _ => return None,
        })
    }

    /// Decode the bare string form used inside reference records.
    pub(crate) fn decode(v: &Value, at: At<'_>) -> Result<Self, DecodeError> {
        let s = codec::string(v, at)?;
        Role::from_tag(&s).ok_or_else(|| codec::unsupported("Role", s, at))
    }

    /// Encode the bare string form. The `symbolKind` sibling, when any, is
    /// the metadata encoder's business.
    pub(crate) fn encode(self) -> Value {
        codec::str_value(self.tag())
    }
}

codec::string_enum! {
    /// The heading displayed above a page title ("Instance Method", …).
    pub enum RoleHeading as "RoleHeading" {
        Structure = "Structure",
        Framework = "Framework",
        InstanceMethod = "Instance Method",
        Initializer = "Initializer",
        InstanceProperty = "Instance Property",
        Enumeration = "Enumeration",
        Case = "Case",
        Operator = "Operator",
        Article = "Article",
        Protocol = "Protocol",
        TypeProperty = "Type Property",
        Alias = "Alias",
        Class = "Class",
    }
}

/// A module a document belongs to, by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    pub name: String,
}

/// Per-document metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Metadata {
    pub role: Role,
    /// Absent in tutorials.
    pub role_heading: Option<RoleHeading>,
    pub title: String,
    pub external_id: Option<String>,
    pub navigator_title: Option<Block>,
    /// Defaults to empty when absent; omitted again on encode when empty.
    pub fragments: Block,
    /// Same default/omission policy as `fragments`.
    pub modules: Vec<Module>,
    pub estimated_time: Option<String>,
    pub category: Option<String>,
    pub category_path_component: Option<String>,
}

impl Metadata {
    pub(crate) fn decode(v: &Value, at: At<'_>) -> Result<Self, DecodeError> {
        let map = codec::obj(v, at)?;

        let role_tag = codec::req_str(map, "role", at)?;
        let role = match role_tag.as_str() {
            "symbol" => Role::Symbol(
                codec::opt(map, "symbolKind")
                    .map(|v| SymbolKind::decode(v, at.key("symbolKind")))
                    .transpose()?,
            ),
            other => Role::from_tag(other)
                .ok_or_else(|| codec::unsupported("Metadata.role", other, at.key("role")))?,
        };

        Ok(Metadata {
            role,
            role_heading: codec::opt(map, "roleHeading")
                .map(|v| RoleHeading::decode(v, at.key("roleHeading")))
                .transpose()?,
            title: codec::req_str(map, "title", at)?,
            external_id: codec::opt_str(map, "externalID", at)?,
            navigator_title: codec::opt(map, "navigatorTitle")
                .map(|v| fragment::decode_block(v, at.key("navigatorTitle")))
                .transpose()?,
            fragments: codec::seq_or_empty(
                map,
                "fragments",
                at,
                super::fragment::Fragment::decode,
            )?,
            modules: codec::seq_or_empty(map, "modules", at, decode_module)?,
            estimated_time: codec::opt_str(map, "estimatedTime", at)?,
            category: codec::opt_str(map, "category", at)?,
            category_path_component: codec::opt_str(map, "categoryPathComponent", at)?,
        })
    }

    pub(crate) fn encode(&self) -> Value {
        let mut map = Map::new();
        map.insert("title".into(), codec::str_value(&self.title));
        map.insert("role".into(), self.role.encode());
        if let Role::Symbol(Some(kind)) = self.role {
            map.insert("symbolKind".into(), kind.encode());
        }
        if let Some(heading) = self.role_heading {
            map.insert("roleHeading".into(), heading.encode());
        }
        if let Some(id) = &self.external_id {
            map.insert("externalID".into(), codec::str_value(id));
        }
        if !self.fragments.is_empty() {
            map.insert("fragments".into(), fragment::encode_block(&self.fragments));
        }
        if !self.modules.is_empty() {
            map.insert(
                "modules".into(),
                codec::encode_seq(&self.modules, encode_module),
            );
        }
        if let Some(title) = &self.navigator_title {
            map.insert("navigatorTitle".into(), fragment::encode_block(title));
        }
        if let Some(time) = &self.estimated_time {
            map.insert("estimatedTime".into(), codec::str_value(time));
        }
        if let Some(category) = &self.category {
            map.insert("category".into(), codec::str_value(category));
        }
        if let Some(component) = &self.category_path_component {
            map.insert("categoryPathComponent".into(), codec::str_value(component));
        }
        Value::Object(map)
    }
}

fn decode_module(v: &Value, at: At<'_>) -> Result<Module, DecodeError> {
    let map = codec::obj(v, at)?;
    Ok(Module {
        name: codec::req_str(map, "name", at)?,
    })
}

fn encode_module(module: &Module) -> Value {
    let mut map = Map::new();
    map.insert("name".into(), codec::str_value(&module.name));
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn symbol_role_reads_the_symbol_kind_sibling() {
        let v = json!({
            "title": "Sloth",
            "role": "symbol",
            "symbolKind": "struct",
            "roleHeading": "Structure",
            "fragments": [{ "kind": "keyword", "text": "struct" }],
            "modules": [{ "name": "SlothCreator" }]
        });
        let meta = Metadata::decode(&v, At::Root).unwrap();
        assert_eq!(meta.role, Role::Symbol(Some(SymbolKind::Struct)));
        assert_eq!(meta.role_heading, Some(RoleHeading::Structure));
        assert_eq!(meta.encode(), v);
    }

    #[test]
    fn symbol_role_without_kind_decodes_and_omits_the_sibling() {
        let v = json!({ "title": "X", "role": "symbol" });
        let meta = Metadata::decode(&v, At::Root).unwrap();
        assert_eq!(meta.role, Role::Symbol(None));
        assert!(meta.encode().get("symbolKind").is_none());
    }

    #[test]
    fn unknown_role_is_unsupported_variant() {
        let v = json!({ "title": "X", "role": "sampleCode" });
        let err = Metadata::decode(&v, At::Root).unwrap_err();
        match err {
            DecodeError::UnsupportedVariant { union, value, path } => {
                assert_eq!(union, "Metadata.role");
                assert_eq!(value, "sampleCode");
                assert_eq!(path, "$.role");
            }
            other => panic!("expected UnsupportedVariant, got {other:?}"),
        }
    }

    #[test]
    fn empty_fragments_and_modules_are_omitted() {
        let v = json!({ "title": "Doing Things", "role": "article" });
        let meta = Metadata::decode(&v, At::Root).unwrap();
        assert!(meta.fragments.is_empty());
        assert!(meta.modules.is_empty());
        let encoded = meta.encode();
        assert!(encoded.get("fragments").is_none());
        assert!(encoded.get("modules").is_none());
        assert_eq!(encoded, v);
    }

    #[test]
    fn tutorial_metadata_round_trips() {
        let v = json!({
            "title": "Dummy Tutorial",
            "role": "project",
            "estimatedTime": "40min",
            "category": "Dummies",
            "categoryPathComponent": "dummies"
        });
        let meta = Metadata::decode(&v, At::Root).unwrap();
        assert_eq!(meta.role, Role::Project);
        assert_eq!(meta.encode(), v);
    }
}
