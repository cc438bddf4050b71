//! Sections: the top-level building blocks of a document body.
//!
//! A [`Section`] couples common fields (title, associated identifiers, a
//! `generated` flag) with a [`SectionKind`] selected by the `"kind"` field.
//! An object without a `kind` is the generic section. `hero` and `volume`
//! keep their payload fields flattened into the section object itself; the
//! other kinds nest their payload under a dedicated key.

use serde_json::{Map, Value};

use super::content::{self, Content};
use super::fragment::{self, Block};
use super::identifier::Identifier;
use super::inline::{self, InlineContent};
use super::{InterfaceLanguage, Platform};
use crate::codec::{self, At, DecodeError};

codec::string_enum! {
    /// Relationship a relationships-section describes.
    pub enum RelationshipType as "Section.relationships.type" {
        ConformsTo = "conformsTo",
    }
}

codec::string_enum! {
    /// Action type of a hero call-to-action. Only references are known.
    pub enum HeroActionType as "Hero.action.type" {
        Reference = "reference",
    }
}

codec::string_enum! {
    /// Arrangement of a `contentAndMedia` block.
    pub enum TaskLayout as "TaskContent.layout" {
        Horizontal = "horizontal",
        Vertical = "vertical",
    }
}

codec::string_enum! {
    /// Which side the media sits on in a `contentAndMedia` block.
    pub enum MediaPosition as "TaskContent.mediaPosition" {
        Leading = "leading",
        Trailing = "trailing",
    }
}

/// One declaration rendition, with the languages and platforms it covers.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub tokens: Block,
    pub languages: Vec<InterfaceLanguage>,
    pub platforms: Vec<Platform>,
}

/// A documented parameter of a symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub content: Vec<Content>,
}

/// Call-to-action of a hero section.
#[derive(Debug, Clone, PartialEq)]
pub struct HeroAction {
    pub is_active: bool,
    pub action_type: HeroActionType,
    pub identifier: String,
    pub overriding_title: String,
    pub overriding_title_inline_content: Vec<InlineContent>,
}

/// The banner of a tutorial page.
#[derive(Debug, Clone, PartialEq)]
pub struct Hero {
    pub image: String,
    pub background_image: String,
    pub content: Vec<Content>,
    pub action: Option<HeroAction>,
    pub estimated_time_in_minutes: Option<u32>,
    pub chapter: Option<String>,
}

/// A chapter of a tutorial volume.
#[derive(Debug, Clone, PartialEq)]
pub struct Chapter {
    pub name: String,
    pub image: Option<String>,
    pub content: Vec<Content>,
    pub tutorials: Vec<Identifier>,
}

/// The volume of a tutorial overview, grouping chapters.
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    pub name: Option<String>,
    pub image: Option<String>,
    pub content: Vec<Content>,
    pub chapters: Vec<Chapter>,
}

/// One introduction block of a task, selected by a `"kind"` tag.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskContent {
    ContentAndMedia {
        content: Vec<Content>,
        layout: Option<TaskLayout>,
        /// Reference-table identifier of the accompanying media.
        media: Option<String>,
        media_position: Option<MediaPosition>,
    },
    FullWidth { content: Vec<Content> },
}

impl TaskContent {
    pub(crate) fn decode(v: &Value, at: At<'_>) -> Result<Self, DecodeError> {
        let map = codec::obj(v, at)?;
        let kind = codec::req_str(map, "kind", at)?;

        Ok(match kind.as_str() {
            "contentAndMedia" => TaskContent::ContentAndMedia {
                content: codec::req_seq(map, "content", at, Content::decode)?,
                layout: codec::opt(map, "layout")
                    .map(|v| TaskLayout::decode(v, at.key("layout")))
                    .transpose()?,
                media: codec::opt_str(map, "media", at)?,
                media_position: codec::opt(map, "mediaPosition")
                    .map(|v| MediaPosition::decode(v, at.key("mediaPosition")))
                    .transpose()?,
            },
            "fullWidth" => TaskContent::FullWidth {
                content: codec::req_seq(map, "content", at, Content::decode)?,
            },
            other => return Err(codec::unsupported("TaskContent.kind", other, at)),
        })
    }

    pub(crate) fn encode(&self) -> Value {
        let mut map = Map::new();
        match self {
            TaskContent::ContentAndMedia {
                content,
                layout,
                media,
                media_position,
            } => {
                map.insert("kind".into(), codec::str_value("contentAndMedia"));
                if let Some(layout) = layout {
                    map.insert("layout".into(), layout.encode());
                }
                map.insert("content".into(), content::encode_content_seq(content));
                if let Some(media) = media {
                    map.insert("media".into(), codec::str_value(media));
                }
                if let Some(position) = media_position {
                    map.insert("mediaPosition".into(), position.encode());
                }
            }
            TaskContent::FullWidth { content } => {
                map.insert("kind".into(), codec::str_value("fullWidth"));
                map.insert("content".into(), content::encode_content_seq(content));
            }
        }
        Value::Object(map)
    }
}

/// One task of a tutorial: an anchor-addressable section with introduction
/// blocks and instructional steps.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub title: String,
    pub anchor: String,
    pub content_section: Vec<TaskContent>,
    pub steps_section: Vec<Content>,
}

impl Task {
    fn decode(v: &Value, at: At<'_>) -> Result<Self, DecodeError> {
        let map = codec::obj(v, at)?;
        Ok(Task {
            title: codec::req_str(map, "title", at)?,
            anchor: codec::req_str(map, "anchor", at)?,
            content_section: codec::req_seq(map, "contentSection", at, TaskContent::decode)?,
            steps_section: codec::req_seq(map, "stepsSection", at, Content::decode)?,
        })
    }

    fn encode(&self) -> Value {
        let mut map = Map::new();
        map.insert("title".into(), codec::str_value(&self.title));
        map.insert("anchor".into(), codec::str_value(&self.anchor));
        map.insert(
            "contentSection".into(),
            codec::encode_seq(&self.content_section, TaskContent::encode),
        );
        map.insert(
            "stepsSection".into(),
            content::encode_content_seq(&self.steps_section),
        );
        Value::Object(map)
    }
}

/// The payload of a section, selected by the optional `"kind"` field.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionKind {
    /// No `kind` on the wire: a bare grouping of identifiers.
    Generic,
    Relationships(RelationshipType),
    Declarations(Vec<Declaration>),
    Content(Vec<Content>),
    Hero(Hero),
    Volume(Volume),
    Parameters(Vec<Parameter>),
    Tasks(Vec<Task>),
}

/// A section of a document body, topic list or see-also list.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub kind: SectionKind,
    pub title: Option<String>,
    /// Reference-table keys of the members this section lists.
    pub identifiers: Vec<Identifier>,
    /// Defaults to `false`; written on the wire only when `true`.
    pub generated: bool,
}

impl Section {
    pub(crate) fn decode(v: &Value, at: At<'_>) -> Result<Self, DecodeError> {
        let map = codec::obj(v, at)?;

        let kind = match codec::opt(map, "kind") {
            None => SectionKind::Generic,
            Some(tag_value) => {
                let tag = codec::string(tag_value, at.key("kind"))?;
                match tag.as_str() {
                    "relationships" => SectionKind::Relationships(RelationshipType::decode(
                        codec::req(map, "type", at)?,
                        at.key("type"),
                    )?),
                    "declarations" => SectionKind::Declarations(codec::req_seq(
                        map,
                        "declarations",
                        at,
                        decode_declaration,
                    )?),
                    "content" => {
                        SectionKind::Content(codec::req_seq(map, "content", at, Content::decode)?)
                    }
                    "parameters" => SectionKind::Parameters(codec::req_seq(
                        map,
                        "parameters",
                        at,
                        decode_parameter,
                    )?),
                    "tasks" => SectionKind::Tasks(codec::req_seq(map, "tasks", at, Task::decode)?),
                    "hero" => SectionKind::Hero(decode_hero(map, at)?),
                    "volume" => SectionKind::Volume(decode_volume(map, at)?),
                    other => return Err(codec::unsupported("Section.kind", other, at.key("kind"))),
                }
            }
        };

        Ok(Section {
            kind,
            title: codec::opt_str(map, "title", at)?,
            identifiers: codec::seq_or_empty(map, "identifiers", at, Identifier::decode)?,
            generated: codec::opt_bool(map, "generated", at)?.unwrap_or(false),
        })
    }

    pub(crate) fn encode(&self) -> Value {
        let mut map = Map::new();

        match &self.kind {
            SectionKind::Generic => {}
            SectionKind::Relationships(ty) => {
                map.insert("kind".into(), codec::str_value("relationships"));
                map.insert("type".into(), ty.encode());
            }
            SectionKind::Declarations(declarations) => {
                map.insert("kind".into(), codec::str_value("declarations"));
                map.insert(
                    "declarations".into(),
                    codec::encode_seq(declarations, encode_declaration),
                );
            }
            SectionKind::Content(content) => {
                map.insert("kind".into(), codec::str_value("content"));
                map.insert("content".into(), content::encode_content_seq(content));
            }
            SectionKind::Parameters(parameters) => {
                map.insert("kind".into(), codec::str_value("parameters"));
                map.insert(
                    "parameters".into(),
                    codec::encode_seq(parameters, encode_parameter),
                );
            }
            SectionKind::Tasks(tasks) => {
                map.insert("kind".into(), codec::str_value("tasks"));
                map.insert("tasks".into(), codec::encode_seq(tasks, Task::encode));
            }
            SectionKind::Hero(hero) => {
                map.insert("kind".into(), codec::str_value("hero"));
                encode_hero(hero, &mut map);
            }
            SectionKind::Volume(volume) => {
                map.insert("kind".into(), codec::str_value("volume"));
                encode_volume(volume, &mut map);
            }
        }

        if let Some(title) = &self.title {
            map.insert("title".into(), codec::str_value(title));
        }
        if !self.identifiers.is_empty() {
            map.insert(
                "identifiers".into(),
                codec::encode_seq(&self.identifiers, Identifier::encode),
            );
        }
        if self.generated {
            map.insert("generated".into(), Value::Bool(true));
        }
        Value::Object(map)
    }
}

pub(crate) fn decode_section_seq(v: &Value, at: At<'_>) -> Result<Vec<Section>, DecodeError> {
    codec::seq(v, at, Section::decode)
}

pub(crate) fn encode_section_seq(sections: &[Section]) -> Value {
    codec::encode_seq(sections, Section::encode)
}

fn decode_declaration(v: &Value, at: At<'_>) -> Result<Declaration, DecodeError> {
    let map = codec::obj(v, at)?;
    Ok(Declaration {
        tokens: fragment::decode_block(codec::req(map, "tokens", at)?, at.key("tokens"))?,
        languages: codec::req_seq(map, "languages", at, InterfaceLanguage::decode)?,
        platforms: codec::req_seq(map, "platforms", at, Platform::decode)?,
    })
}

fn encode_declaration(declaration: &Declaration) -> Value {
    let mut map = Map::new();
    map.insert("tokens".into(), fragment::encode_block(&declaration.tokens));
    map.insert(
        "languages".into(),
        codec::encode_seq(&declaration.languages, |l| l.encode()),
    );
    map.insert(
        "platforms".into(),
        codec::encode_seq(&declaration.platforms, |p| p.encode()),
    );
    Value::Object(map)
}

fn decode_parameter(v: &Value, at: At<'_>) -> Result<Parameter, DecodeError> {
    let map = codec::obj(v, at)?;
    Ok(Parameter {
        name: codec::req_str(map, "name", at)?,
        content: codec::req_seq(map, "content", at, Content::decode)?,
    })
}

fn encode_parameter(parameter: &Parameter) -> Value {
    let mut map = Map::new();
    map.insert("name".into(), codec::str_value(&parameter.name));
    map.insert(
        "content".into(),
        content::encode_content_seq(&parameter.content),
    );
    Value::Object(map)
}

// Hero and volume payloads live flattened in the section object.

fn decode_hero(map: &Map<String, Value>, at: At<'_>) -> Result<Hero, DecodeError> {
    Ok(Hero {
        image: codec::req_str(map, "image", at)?,
        background_image: codec::req_str(map, "backgroundImage", at)?,
        content: codec::req_seq(map, "content", at, Content::decode)?,
        action: codec::opt(map, "action")
            .map(|v| decode_hero_action(v, at.key("action")))
            .transpose()?,
        estimated_time_in_minutes: codec::opt_u32(map, "estimatedTimeInMinutes", at)?,
        chapter: codec::opt_str(map, "chapter", at)?,
    })
}

fn encode_hero(hero: &Hero, map: &mut Map<String, Value>) {
    map.insert("image".into(), codec::str_value(&hero.image));
    map.insert(
        "backgroundImage".into(),
        codec::str_value(&hero.background_image),
    );
    map.insert("content".into(), content::encode_content_seq(&hero.content));
    if let Some(action) = &hero.action {
        map.insert("action".into(), encode_hero_action(action));
    }
    if let Some(minutes) = hero.estimated_time_in_minutes {
        map.insert("estimatedTimeInMinutes".into(), minutes.into());
    }
    if let Some(chapter) = &hero.chapter {
        map.insert("chapter".into(), codec::str_value(chapter));
    }
}

fn decode_hero_action(v: &Value, at: At<'_>) -> Result<HeroAction, DecodeError> {
    let map = codec::obj(v, at)?;
    Ok(HeroAction {
        is_active: codec::opt_bool(map, "isActive", at)?.unwrap_or(true),
        action_type: HeroActionType::decode(codec::req(map, "type", at)?, at.key("type"))?,
        identifier: codec::req_str(map, "identifier", at)?,
        overriding_title: codec::req_str(map, "overridingTitle", at)?,
        overriding_title_inline_content: codec::req_seq(
            map,
            "overridingTitleInlineContent",
            at,
            InlineContent::decode,
        )?,
    })
}

fn encode_hero_action(action: &HeroAction) -> Value {
    let mut map = Map::new();
    map.insert("isActive".into(), Value::Bool(action.is_active));
    map.insert("type".into(), action.action_type.encode());
    map.insert("identifier".into(), codec::str_value(&action.identifier));
    map.insert(
        "overridingTitle".into(),
        codec::str_value(&action.overriding_title),
    );
    map.insert(
        "overridingTitleInlineContent".into(),
        inline::encode_inline_seq(&action.overriding_title_inline_content),
    );
    Value::Object(map)
}

fn decode_volume(map: &Map<String, Value>, at: At<'_>) -> Result<Volume, DecodeError> {
    Ok(Volume {
        name: codec::opt_str(map, "name", at)?,
        image: codec::opt_str(map, "image", at)?,
        content: codec::req_seq(map, "content", at, Content::decode)?,
        chapters: codec::req_seq(map, "chapters", at, decode_chapter)?,
    })
}

fn encode_volume(volume: &Volume, map: &mut Map<String, Value>) {
    if let Some(name) = &volume.name {
        map.insert("name".into(), codec::str_value(name));
    }
    if let Some(image) = &volume.image {
        map.insert("image".into(), codec::str_value(image));
    }
    map.insert(
        "content".into(),
        content::encode_content_seq(&volume.content),
    );
    map.insert(
        "chapters".into(),
        codec::encode_seq(&volume.chapters, encode_chapter),
    );
}

fn decode_chapter(v: &Value, at: At<'_>) -> Result<Chapter, DecodeError> {
    let map = codec::obj(v, at)?;
    Ok(Chapter {
        name: codec::req_str(map, "name", at)?,
        image: codec::opt_str(map, "image", at)?,
        content: codec::req_seq(map, "content", at, Content::decode)?,
        tutorials: codec::req_seq(map, "tutorials", at, Identifier::decode)?,
    })
}

fn encode_chapter(chapter: &Chapter) -> Value {
    let mut map = Map::new();
    map.insert("name".into(), codec::str_value(&chapter.name));
    if let Some(image) = &chapter.image {
        map.insert("image".into(), codec::str_value(image));
    }
    map.insert(
        "content".into(),
        content::encode_content_seq(&chapter.content),
    );
    map.insert(
        "tutorials".into(),
        codec::encode_seq(&chapter.tutorials, Identifier::encode),
    );
    Value::Object(map)
}
