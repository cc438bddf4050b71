//! # docc-archive
//!
//! A reader and writer for directory-based documentation archives: trees of
//! JSON page files plus static assets, as produced by documentation
//! generators. The crate decodes page files into a strongly-typed document
//! model, encodes that model back to the exact wire shape it came from, and
//! addresses the surrounding directory layout.
//!
//! # Architecture: Address, Decode, Encode
//!
//! ```text
//! 1. Address   Archive/Folder  →  page-file paths     (filesystem layer)
//! 2. Decode    JSON bytes      →  Document            (typed model)
//! 3. Encode    Document        →  JSON bytes          (exact inverse of 2)
//! ```
//!
//! The layers are independent: the model never touches the filesystem, and
//! the archive layer never interprets JSON beyond handing bytes to the
//! decoder. Tests can exercise the whole schema from in-memory values.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`archive`] | Archive and folder addressing, asset listings, page-file traversal |
//! | [`schema`] | The version 0.1 document model: one type per wire shape |
//! | [`schema::document`] | The top-level [`Document`] and its entry points |
//! | [`codec`] | Decode plumbing: error taxonomy, JSON path tracking, field helpers |
//! | [`naming`] | Asset filename utilities: content-hash stripping, stylesheet scrubbing |
//!
//! # Design Decisions
//!
//! ## Explicit Codec Over Derived Serde
//!
//! The page format is a family of discriminated unions (`"type"` and
//! `"kind"` string fields select variants) with no published grammar. The
//! decoder is written by hand against [`serde_json::Value`] so that failures
//! are precise: an unknown discriminator is
//! [`DecodeError::UnsupportedVariant`] naming the union, the value, and the
//! JSON path; a missing or mistyped field is a structurally different
//! [`DecodeError::MalformedField`]. Derived `Deserialize` impls collapse
//! both into one opaque string. `Document` still implements `Serialize` and
//! `Deserialize` in terms of its own codec, so it composes with any serde
//! pipeline.
//!
//! ## Encode Is the Exact Inverse of Decode
//!
//! Re-encoding a decoded document reproduces the input shape: optional keys
//! that were absent stay absent, defaults that were implicit stay implicit,
//! and (`preserve_order` plus sorted reference tables) key order is
//! deterministic. Decode-encode-decode is identity, which makes the model
//! safe for read-modify-write tooling.
//!
//! ## Unknown Input Fails, Never Coerces
//!
//! A discriminator value outside the known vocabulary is an error, not an
//! `Other(String)` variant. Archives are consumed, not authored, here; a
//! page this model cannot represent faithfully must be reported, not
//! silently reshaped.
//!
//! [`Document`]: schema::document::Document
//! [`DecodeError::UnsupportedVariant`]: codec::DecodeError::UnsupportedVariant
//! [`DecodeError::MalformedField`]: codec::DecodeError::MalformedField

pub mod archive;
pub mod codec;
pub mod naming;
pub mod schema;

pub use archive::{Archive, ArchiveError, Folder};
pub use codec::DecodeError;
pub use schema::document::{Document, Kind};
pub use schema::{InterfaceLanguage, Platform, SchemaVersion, SymbolKind};
