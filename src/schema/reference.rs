//! Reference records: the document-wide lookup table of link targets.
//!
//! Every document carries a `references` map from identifier string to one of
//! these records. Inline references, step media and section identifier lists
//! point into the map by key; resolving them is the consumer's job, never the
//! codec's. A target the producer could not resolve is preserved as
//! [`Reference::Unresolvable`], not repaired.

use std::collections::HashSet;

use serde_json::{Map, Value};

use super::fragment::{self, Block};
use super::inline::{self, InlineContent};
use super::metadata::Role;
use crate::codec::{self, At, DecodeError};

codec::string_enum! {
    /// What a topic reference points at.
    pub enum TopicKind as "TopicReference.kind" {
        Symbol = "symbol",
        Article = "article",
        Overview = "overview",
        Project = "project",
        Section = "section",
    }
}

codec::string_enum! {
    /// Display trait of an image variant.
    pub enum ImageTrait as "ImageReference.trait" {
        NonRetina = "1x",
        Retina = "2x",
        Light = "light",
        Dark = "dark",
    }
}

codec::string_enum! {
    /// Language of a file reference's source listing.
    pub enum FileType as "FileReference.fileType" {
        Swift = "swift",
    }
}

/// Pixel dimensions of an image variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

/// One resolution/appearance rendition of an image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageVariant {
    /// A path within the archive, not a full URL.
    pub url: String,
    /// Absent in newer producer versions.
    pub size: Option<Size>,
    pub traits: Vec<ImageTrait>,
}

impl ImageVariant {
    fn matches(&self, requested: &HashSet<ImageTrait>) -> usize {
        requested.iter().filter(|t| self.traits.contains(t)).count()
    }
}

/// A link to another documentation page.
#[derive(Debug, Clone, PartialEq)]
pub struct TopicReference {
    pub identifier: String,
    pub title: String,
    pub url: Option<String>,
    pub kind: Option<TopicKind>,
    pub role: Option<Role>,
    pub abstract_: Vec<InlineContent>,
    pub fragments: Option<Block>,
    pub navigator_title: Option<Block>,
    pub estimated_time: Option<String>,
    pub deprecated: Option<bool>,
}

/// An image with responsive variants.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageReference {
    pub identifier: String,
    pub alt: String,
    pub variants: Vec<ImageVariant>,
}

impl ImageReference {
    /// The variant matching the most of the requested traits.
    ///
    /// A variant matching every requested trait wins immediately; otherwise
    /// the first variant with the highest match count is returned.
    pub fn best_variant(&self, requested: &HashSet<ImageTrait>) -> Option<&ImageVariant> {
        if self.variants.len() <= 1 {
            return self.variants.first();
        }
        let mut best: Option<&ImageVariant> = None;
        let mut best_count = 0;
        for variant in &self.variants {
            let count = variant.matches(requested);
            if count == requested.len() {
                return Some(variant);
            }
            if best.is_none() || count > best_count {
                best_count = count;
                best = Some(variant);
            }
        }
        best
    }
}

/// A highlighted line of a file reference's source listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
    pub line: u32,
}

/// A source file shown alongside tutorial steps.
#[derive(Debug, Clone, PartialEq)]
pub struct FileReference {
    pub identifier: String,
    /// Display name, e.g. `CustomizedSlothView.swift`.
    pub file_name: String,
    pub file_type: FileType,
    /// The file, one line per entry.
    pub content: Vec<String>,
    pub highlights: Vec<Highlight>,
}

/// A link to a section within a page.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionReference {
    pub identifier: String,
    pub title: String,
    pub abstract_: Vec<InlineContent>,
    pub role: Role,
    /// Relative URL.
    pub url: String,
    pub kind: String,
}

/// An external link.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkReference {
    pub identifier: String,
    pub title: String,
    pub title_inline_content: Vec<InlineContent>,
    pub url: String,
}

/// One record of the document's reference table, selected by a `"type"` tag.
#[derive(Debug, Clone, PartialEq)]
pub enum Reference {
    Topic(TopicReference),
    Image(ImageReference),
    File(FileReference),
    Section(SectionReference),
    Link(LinkReference),
    /// A dead link the producer could not resolve.
    Unresolvable { identifier: String, title: String },
}

impl Reference {
    /// The identifier this record is keyed by in the reference table.
    pub fn identifier(&self) -> &str {
        match self {
            Reference::Topic(r) => &r.identifier,
            Reference::Image(r) => &r.identifier,
            Reference::File(r) => &r.identifier,
            Reference::Section(r) => &r.identifier,
            Reference::Link(r) => &r.identifier,
            Reference::Unresolvable { identifier, .. } => identifier,
        }
    }

    pub(crate) fn decode(v: &Value, at: At<'_>) -> Result<Self, DecodeError> {
        let map = codec::obj(v, at)?;
        let ty = codec::req_str(map, "type", at)?;

        Ok(match ty.as_str() {
            "topic" => Reference::Topic(TopicReference {
                identifier: codec::req_str(map, "identifier", at)?,
                title: codec::req_str(map, "title", at)?,
                url: codec::opt_str(map, "url", at)?,
                kind: codec::opt(map, "kind")
                    .map(|v| TopicKind::decode(v, at.key("kind")))
                    .transpose()?,
                role: codec::opt(map, "role")
                    .map(|v| Role::decode(v, at.key("role")))
                    .transpose()?,
                abstract_: codec::seq_or_empty(map, "abstract", at, InlineContent::decode)?,
                fragments: codec::opt(map, "fragments")
                    .map(|v| fragment::decode_block(v, at.key("fragments")))
                    .transpose()?,
                navigator_title: codec::opt(map, "navigatorTitle")
                    .map(|v| fragment::decode_block(v, at.key("navigatorTitle")))
                    .transpose()?,
                estimated_time: codec::opt_str(map, "estimatedTime", at)?,
                deprecated: codec::opt_bool(map, "deprecated", at)?,
            }),
            "image" => Reference::Image(ImageReference {
                identifier: codec::req_str(map, "identifier", at)?,
                alt: codec::req_str(map, "alt", at)?,
                variants: codec::req_seq(map, "variants", at, decode_variant)?,
            }),
            "file" => Reference::File(FileReference {
                identifier: codec::req_str(map, "identifier", at)?,
                file_name: codec::req_str(map, "fileName", at)?,
                file_type: FileType::decode(codec::req(map, "fileType", at)?, at.key("fileType"))?,
                content: codec::str_seq(codec::req(map, "content", at)?, at.key("content"))?,
                highlights: codec::req_seq(map, "highlights", at, decode_highlight)?,
            }),
            "section" => Reference::Section(SectionReference {
                identifier: codec::req_str(map, "identifier", at)?,
                title: codec::req_str(map, "title", at)?,
                abstract_: codec::seq_or_empty(map, "abstract", at, InlineContent::decode)?,
                role: Role::decode(codec::req(map, "role", at)?, at.key("role"))?,
                url: codec::req_str(map, "url", at)?,
                kind: codec::req_str(map, "kind", at)?,
            }),
            "link" => Reference::Link(LinkReference {
                identifier: codec::req_str(map, "identifier", at)?,
                title: codec::req_str(map, "title", at)?,
                title_inline_content: codec::req_seq(
                    map,
                    "titleInlineContent",
                    at,
                    InlineContent::decode,
                )?,
                url: codec::req_str(map, "url", at)?,
            }),
            "unresolvable" => Reference::Unresolvable {
                identifier: codec::req_str(map, "identifier", at)?,
                title: codec::req_str(map, "title", at)?,
            },
            other => return Err(codec::unsupported("Reference.type", other, at)),
        })
    }

    pub(crate) fn encode(&self) -> Value {
        let mut map = Map::new();
        match self {
            Reference::Topic(r) => {
                map.insert("type".into(), codec::str_value("topic"));
                map.insert("identifier".into(), codec::str_value(&r.identifier));
                map.insert("title".into(), codec::str_value(&r.title));
                if let Some(url) = &r.url {
                    map.insert("url".into(), codec::str_value(url));
                }
                if let Some(kind) = r.kind {
                    map.insert("kind".into(), kind.encode());
                }
                if let Some(role) = r.role {
                    map.insert("role".into(), role.encode());
                }
                if !r.abstract_.is_empty() {
                    map.insert("abstract".into(), inline::encode_inline_seq(&r.abstract_));
                }
                if let Some(fragments) = &r.fragments {
                    map.insert("fragments".into(), fragment::encode_block(fragments));
                }
                if let Some(title) = &r.navigator_title {
                    map.insert("navigatorTitle".into(), fragment::encode_block(title));
                }
                if let Some(time) = &r.estimated_time {
                    map.insert("estimatedTime".into(), codec::str_value(time));
                }
                if let Some(deprecated) = r.deprecated {
                    map.insert("deprecated".into(), Value::Bool(deprecated));
                }
            }
            Reference::Image(r) => {
                map.insert("type".into(), codec::str_value("image"));
                map.insert("identifier".into(), codec::str_value(&r.identifier));
                map.insert("alt".into(), codec::str_value(&r.alt));
                map.insert(
                    "variants".into(),
                    codec::encode_seq(&r.variants, encode_variant),
                );
            }
            Reference::File(r) => {
                map.insert("type".into(), codec::str_value("file"));
                map.insert("identifier".into(), codec::str_value(&r.identifier));
                map.insert("fileName".into(), codec::str_value(&r.file_name));
                map.insert("fileType".into(), r.file_type.encode());
                map.insert(
                    "content".into(),
                    codec::encode_seq(&r.content, |line| codec::str_value(line)),
                );
                map.insert(
                    "highlights".into(),
                    codec::encode_seq(&r.highlights, |h| {
                        let mut m = Map::new();
                        m.insert("line".into(), h.line.into());
                        Value::Object(m)
                    }),
                );
            }
            Reference::Section(r) => {
                map.insert("type".into(), codec::str_value("section"));
                map.insert("identifier".into(), codec::str_value(&r.identifier));
                map.insert("title".into(), codec::str_value(&r.title));
                if !r.abstract_.is_empty() {
                    map.insert("abstract".into(), inline::encode_inline_seq(&r.abstract_));
                }
                map.insert("role".into(), r.role.encode());
                map.insert("url".into(), codec::str_value(&r.url));
                map.insert("kind".into(), codec::str_value(&r.kind));
            }
            Reference::Link(r) => {
                map.insert("type".into(), codec::str_value("link"));
                map.insert("identifier".into(), codec::str_value(&r.identifier));
                map.insert("title".into(), codec::str_value(&r.title));
                map.insert(
                    "titleInlineContent".into(),
                    inline::encode_inline_seq(&r.title_inline_content),
                );
                map.insert("url".into(), codec::str_value(&r.url));
            }
            Reference::Unresolvable { identifier, title } => {
                map.insert("type".into(), codec::str_value("unresolvable"));
                map.insert("identifier".into(), codec::str_value(identifier));
                map.insert("title".into(), codec::str_value(title));
            }
        }
        Value::Object(map)
    }
}

fn decode_variant(v: &Value, at: At<'_>) -> Result<ImageVariant, DecodeError> {
    let map = codec::obj(v, at)?;
    Ok(ImageVariant {
        url: codec::req_str(map, "url", at)?,
        size: codec::opt(map, "size")
            .map(|v| decode_size(v, at.key("size")))
            .transpose()?,
        traits: codec::req_seq(map, "traits", at, ImageTrait::decode)?,
    })
}

fn encode_variant(variant: &ImageVariant) -> Value {
    let mut map = Map::new();
    map.insert("url".into(), codec::str_value(&variant.url));
    if let Some(size) = variant.size {
        let mut m = Map::new();
        m.insert("width".into(), size.width.into());
        m.insert("height".into(), size.height.into());
        map.insert("size".into(), Value::Object(m));
    }
    map.insert(
        "traits".into(),
        codec::encode_seq(&variant.traits, |t| t.encode()),
    );
    Value::Object(map)
}

fn decode_size(v: &Value, at: At<'_>) -> Result<Size, DecodeError> {
    let map = codec::obj(v, at)?;
    Ok(Size {
        width: codec::unsigned(codec::req(map, "width", at)?, at.key("width"))?,
        height: codec::unsigned(codec::req(map, "height", at)?, at.key("height"))?,
    })
}

fn decode_highlight(v: &Value, at: At<'_>) -> Result<Highlight, DecodeError> {
    let map = codec::obj(v, at)?;
    Ok(Highlight {
        line: codec::unsigned(codec::req(map, "line", at)?, at.key("line"))?,
    })
}
