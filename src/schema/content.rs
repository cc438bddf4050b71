//! Block-level content: the recursive heart of the schema.
//!
//! [`Content`] is mutually recursive with itself through asides, list items,
//! table cells and tutorial steps. Recursion depth is bounded by realistic
//! document nesting (tens of levels), and every indirection goes through a
//! `Vec`, so the variants need no extra boxing.

use serde_json::{Map, Value};

use super::inline::{self, InlineContent};
use crate::codec::{self, At, DecodeError};

codec::string_enum! {
    /// Callout style of an `aside` block.
    pub enum AsideStyle as "Content.aside.style" {
        Note = "note",
        Warning = "warning",
        Important = "important",
        Tip = "tip",
        Experiment = "experiment",
    }
}

codec::string_enum! {
    /// Which part of a table acts as its header. Only `row` has been
    /// observed in archives so far; anything else fails decode loudly
    /// rather than being guessed at.
    pub enum TableHeaderKind as "Content.table.header" {
        Row = "row",
    }
}

/// A code listing. `syntax` is absent in some producer versions and must
/// stay absent on re-encode.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeListing {
    pub syntax: Option<String>,
    /// The listing, one line per entry.
    pub code: Vec<String>,
}

/// One instructional step of a tutorial.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// Often empty.
    pub caption: Vec<Content>,
    pub content: Vec<Content>,
    /// Reference-table identifier of the step's code file.
    pub code: Option<String>,
    /// Reference-table identifier of the step's image or video.
    pub media: Option<String>,
    /// Reference-table identifier of an image showing the result at runtime.
    pub runtime_preview: Option<String>,
}

/// One entry of an ordered or unordered list.
#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    pub content: Vec<Content>,
}

/// A table of cells, each cell holding nested block content.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub header: TableHeaderKind,
    /// `rows[row][column]` is one cell's content.
    pub rows: Vec<Vec<Vec<Content>>>,
}

/// Block content in a section, chapter, list item, table cell or step.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Heading {
        text: String,
        anchor: String,
        level: u32,
    },
    Aside {
        style: AsideStyle,
        content: Vec<Content>,
    },
    Paragraph {
        inline_content: Vec<InlineContent>,
    },
    CodeListing(CodeListing),
    Step(Step),
    OrderedList(Vec<ListItem>),
    UnorderedList(Vec<ListItem>),
    Table(Table),
}

impl Content {
    pub(crate) fn decode(v: &Value, at: At<'_>) -> Result<Self, DecodeError> {
        let map = codec::obj(v, at)?;
        let ty = codec::req_str(map, "type", at)?;

        Ok(match ty.as_str() {
            "heading" => Content::Heading {
                text: codec::req_str(map, "text", at)?,
                anchor: codec::req_str(map, "anchor", at)?,
                level: codec::unsigned(codec::req(map, "level", at)?, at.key("level"))?,
            },
            "aside" => Content::Aside {
                style: AsideStyle::decode(codec::req(map, "style", at)?, at.key("style"))?,
                content: codec::req_seq(map, "content", at, Content::decode)?,
            },
            "paragraph" => Content::Paragraph {
                inline_content: codec::req_seq(map, "inlineContent", at, InlineContent::decode)?,
            },
            "codeListing" => Content::CodeListing(CodeListing {
                syntax: codec::opt_str(map, "syntax", at)?,
                code: codec::str_seq(codec::req(map, "code", at)?, at.key("code"))?,
            }),
            "step" => Content::Step(Step {
                caption: codec::req_seq(map, "caption", at, Content::decode)?,
                content: codec::req_seq(map, "content", at, Content::decode)?,
                code: codec::opt_str(map, "code", at)?,
                media: codec::opt_str(map, "media", at)?,
                runtime_preview: codec::opt_str(map, "runtimePreview", at)?,
            }),
            "orderedList" => Content::OrderedList(codec::req_seq(map, "items", at, decode_item)?),
            "unorderedList" => {
                Content::UnorderedList(codec::req_seq(map, "items", at, decode_item)?)
            }
            "table" => Content::Table(Table {
                header: TableHeaderKind::decode(
                    codec::req(map, "header", at)?,
                    at.key("header"),
                )?,
                rows: codec::req_seq(map, "rows", at, |row: &Value, at: At<'_>| {
                    codec::seq(row, at, decode_content_seq)
                })?,
            }),
            other => return Err(codec::unsupported("Content.type", other, at)),
        })
    }

    pub(crate) fn encode(&self) -> Value {
        let mut map = Map::new();
        match self {
            Content::Heading {
                text,
                anchor,
                level,
            } => {
                map.insert("type".into(), codec::str_value("heading"));
                map.insert("text".into(), codec::str_value(text));
                map.insert("anchor".into(), codec::str_value(anchor));
                map.insert("level".into(), (*level).into());
            }
            Content::Aside { style, content } => {
                map.insert("type".into(), codec::str_value("aside"));
                map.insert("style".into(), style.encode());
                map.insert("content".into(), encode_content_seq(content));
            }
            Content::Paragraph { inline_content } => {
                map.insert("type".into(), codec::str_value("paragraph"));
                map.insert(
                    "inlineContent".into(),
                    inline::encode_inline_seq(inline_content),
                );
            }
            Content::CodeListing(listing) => {
                map.insert("type".into(), codec::str_value("codeListing"));
                if let Some(syntax) = &listing.syntax {
                    map.insert("syntax".into(), codec::str_value(syntax));
                }
                map.insert(
                    "code".into(),
                    codec::encode_seq(&listing.code, |line| codec::str_value(line)),
                );
            }
            Content::Step(step) => {
                map.insert("type".into(), codec::str_value("step"));
                map.insert("caption".into(), encode_content_seq(&step.caption));
                map.insert("content".into(), encode_content_seq(&step.content));
                if let Some(code) = &step.code {
                    map.insert("code".into(), codec::str_value(code));
                }
                if let Some(media) = &step.media {
                    map.insert("media".into(), codec::str_value(media));
                }
                if let Some(preview) = &step.runtime_preview {
                    map.insert("runtimePreview".into(), codec::str_value(preview));
                }
            }
            Content::OrderedList(items) => {
                map.insert("type".into(), codec::str_value("orderedList"));
                map.insert("items".into(), codec::encode_seq(items, encode_item));
            }
            Content::UnorderedList(items) => {
                map.insert("type".into(), codec::str_value("unorderedList"));
                map.insert("items".into(), codec::encode_seq(items, encode_item));
            }
            Content::Table(table) => {
                map.insert("type".into(), codec::str_value("table"));
                map.insert("header".into(), table.header.encode());
                map.insert(
                    "rows".into(),
                    codec::encode_seq(&table.rows, |row| {
                        codec::encode_seq(row, |cell| encode_content_seq(cell))
                    }),
                );
            }
        }
        Value::Object(map)
    }
}

fn decode_item(v: &Value, at: At<'_>) -> Result<ListItem, DecodeError> {
    let map = codec::obj(v, at)?;
    Ok(ListItem {
        content: codec::req_seq(map, "content", at, Content::decode)?,
    })
}

fn encode_item(item: &ListItem) -> Value {
    let mut map = Map::new();
    map.insert("content".into(), encode_content_seq(&item.content));
    Value::Object(map)
}

pub(crate) fn decode_content_seq(v: &Value, at: At<'_>) -> Result<Vec<Content>, DecodeError> {
    codec::seq(v, at, Content::decode)
}

pub(crate) fn encode_content_seq(content: &[Content]) -> Value {
    codec::encode_seq(content, Content::encode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn heading_round_trips() {
        let v = json!({ "type": "heading", "text": "Overview", "anchor": "overview", "level": 2 });
        let c = Content::decode(&v, At::Root).unwrap();
        assert_eq!(
            c,
            Content::Heading {
                text: "Overview".into(),
                anchor: "overview".into(),
                level: 2
            }
        );
        assert_eq!(c.encode(), v);
    }

    #[test]
    fn aside_nests_content_and_checks_style() {
        let v = json!({
            "type": "aside",
            "style": "warning",
            "content": [
                { "type": "paragraph", "inlineContent": [
                    { "type": "text", "text": "Careful." }
                ]}
            ]
        });
        let c = Content::decode(&v, At::Root).unwrap();
        match &c {
            Content::Aside { style, content } => {
                assert_eq!(*style, AsideStyle::Warning);
                assert_eq!(content.len(), 1);
            }
            other => panic!("expected aside, got {other:?}"),
        }
        assert_eq!(c.encode(), v);
    }

    #[test]
    fn unknown_aside_style_is_rejected() {
        let v = json!({ "type": "aside", "style": "danger", "content": [] });
        let err = Content::decode(&v, At::Root).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::UnsupportedVariant { union: "Content.aside.style", .. }
        ));
    }

    #[test]
    fn code_listing_without_syntax_stays_without_syntax() {
        let v = json!({ "type": "codeListing", "code": ["let x = 1"] });
        let c = Content::decode(&v, At::Root).unwrap();
        match &c {
            Content::CodeListing(listing) => assert!(listing.syntax.is_none()),
            other => panic!("expected codeListing, got {other:?}"),
        }
        let encoded = c.encode();
        assert!(encoded.get("syntax").is_none());
        assert_eq!(encoded, v);
    }

    #[test]
    fn code_listing_with_syntax_round_trips() {
        let v = json!({ "type": "codeListing", "syntax": "swift", "code": ["import Foundation"] });
        let c = Content::decode(&v, At::Root).unwrap();
        assert_eq!(c.encode(), v);
    }

    #[test]
    fn lists_nest_arbitrary_content() {
        let v = json!({
            "type": "unorderedList",
            "items": [
                { "content": [
                    { "type": "orderedList", "items": [
                        { "content": [
                            { "type": "paragraph", "inlineContent": [
                                { "type": "text", "text": "nested" }
                            ]}
                        ]}
                    ]}
                ]}
            ]
        });
        let c = Content::decode(&v, At::Root).unwrap();
        assert_eq!(c.encode(), v);
    }

    #[test]
    fn table_decodes_rows_of_cells() {
        let v = json!({
            "type": "table",
            "header": "row",
            "rows": [
                [[{ "type": "paragraph", "inlineContent": [{ "type": "text", "text": "a" }] }]],
                [[{ "type": "paragraph", "inlineContent": [{ "type": "text", "text": "b" }] }]],
                [[{ "type": "paragraph", "inlineContent": [{ "type": "text", "text": "c" }] }]]
            ]
        });
        let c = Content::decode(&v, At::Root).unwrap();
        match &c {
            Content::Table(table) => {
                assert_eq!(table.header, TableHeaderKind::Row);
                assert_eq!(table.rows.len(), 3);
            }
            other => panic!("expected table, got {other:?}"),
        }
        assert_eq!(c.encode(), v);
    }

    #[test]
    fn unknown_table_header_kind_is_rejected() {
        let v = json!({ "type": "table", "header": "column", "rows": [] });
        assert!(matches!(
            Content::decode(&v, At::Root),
            Err(DecodeError::UnsupportedVariant { union: "Content.table.header", .. })
        ));
    }

    #[test]
    fn step_optionals_stay_absent() {
        let v = json!({
            "type": "step",
            "caption": [],
            "content": [
                { "type": "paragraph", "inlineContent": [{ "type": "text", "text": "Do it." }] }
            ],
            "media": "dummy.png"
        });
        let c = Content::decode(&v, At::Root).unwrap();
        match &c {
            Content::Step(step) => {
                assert!(step.code.is_none());
                assert!(step.runtime_preview.is_none());
                assert_eq!(step.media.as_deref(), Some("dummy.png"));
            }
            other => panic!("expected step, got {other:?}"),
        }
        assert_eq!(c.encode(), v);
    }

    #[test]
    fn unknown_type_is_unsupported_variant_with_path() {
        let v = json!({
            "type": "aside",
            "style": "note",
            "content": [{ "type": "blockquote" }]
        });
        let err = Content::decode(&v, At::Root).unwrap_err();
        match err {
            DecodeError::UnsupportedVariant { union, value, path } => {
                assert_eq!(union, "Content.type");
                assert_eq!(value, "blockquote");
                assert_eq!(path, "$.content[0]");
            }
            other => panic!("expected UnsupportedVariant, got {other:?}"),
        }
    }

    #[test]
    fn missing_type_is_a_structural_error() {
        let v = json!({ "text": "Overview" });
        assert!(matches!(
            Content::decode(&v, At::Root),
            Err(DecodeError::MalformedField { .. })
        ));
    }
}
