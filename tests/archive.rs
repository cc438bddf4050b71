//! Archive addressing against real directory trees.

use std::fs;
use std::path::{Path, PathBuf};

use docc_archive::schema::document::Kind;
use docc_archive::{Archive, ArchiveError, DecodeError};
use tempfile::TempDir;

fn fixture_bytes(name: &str) -> Vec<u8> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    fs::read(path).unwrap()
}

/// Lay out a small but complete archive:
///
/// ```text
/// root/
/// ├── favicon.ico
/// ├── css/  (two hashed stylesheets)
/// ├── images/
/// └── data/
///     ├── documentation/slothcreator/{slothcreator.json, sloth/eat.json}
///     └── tutorials/dummy/dummy-tutorial.json
/// ```
fn build_archive() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    fs::create_dir_all(root.join("data/documentation/slothcreator/sloth")).unwrap();
    fs::create_dir_all(root.join("data/tutorials/dummy")).unwrap();
    fs::create_dir_all(root.join("css")).unwrap();
    fs::create_dir_all(root.join("images")).unwrap();

    fs::write(
        root.join("data/documentation/slothcreator/slothcreator.json"),
        fixture_bytes("symbol_page.json"),
    )
    .unwrap();
    fs::write(
        root.join("data/documentation/slothcreator/sloth/eat.json"),
        fixture_bytes("symbol_page.json"),
    )
    .unwrap();
    fs::write(
        root.join("data/tutorials/dummy/dummy-tutorial.json"),
        fixture_bytes("simple_tutorial.json"),
    )
    .unwrap();

    fs::write(root.join("favicon.ico"), "icon").unwrap();
    fs::write(root.join("css/topic.4a21f17c.css"), "h1 {}").unwrap();
    fs::write(root.join("css/index.0fae3fd6.css"), "body {}").unwrap();
    fs::write(root.join("images/dummy.png"), "png").unwrap();

    tmp
}

fn file_names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn open_detects_both_page_trees() {
    let tmp = build_archive();
    let archive = Archive::open(tmp.path()).unwrap();
    assert!(archive.documentation_folder().is_some());
    assert!(archive.tutorials_folder().is_some());
}

#[test]
fn asset_listings_are_sorted_by_name() {
    let tmp = build_archive();
    let archive = Archive::open(tmp.path()).unwrap();
    assert_eq!(
        file_names(&archive.stylesheets().unwrap()),
        ["index.0fae3fd6.css", "topic.4a21f17c.css"]
    );
    assert_eq!(file_names(&archive.user_images().unwrap()), ["dummy.png"]);
    assert!(archive.videos().unwrap().is_empty());
    assert_eq!(file_names(&archive.favicons().unwrap()), ["favicon.ico"]);
}

#[test]
fn walk_yields_every_page_file_in_order() {
    let tmp = build_archive();
    let archive = Archive::open(tmp.path()).unwrap();
    let folder = archive.documentation_folder().unwrap();

    let pages: Vec<PathBuf> = folder.walk().collect::<Result<_, _>>().unwrap();
    // depth-first in file-name order: `sloth/` sorts before `slothcreator.json`
    assert_eq!(file_names(&pages), ["eat.json", "slothcreator.json"]);
}

#[test]
fn walk_skips_non_json_files() {
    let tmp = build_archive();
    fs::write(
        tmp.path().join("data/documentation/slothcreator/notes.txt"),
        "scratch",
    )
    .unwrap();

    let archive = Archive::open(tmp.path()).unwrap();
    let pages: Vec<PathBuf> = archive
        .documentation_folder()
        .unwrap()
        .walk()
        .collect::<Result<_, _>>()
        .unwrap();
    assert!(file_names(&pages).iter().all(|n| n.ends_with(".json")));
}

#[test]
fn every_page_in_the_archive_decodes() {
    let tmp = build_archive();
    let archive = Archive::open(tmp.path()).unwrap();

    for folder in [
        archive.documentation_folder().unwrap(),
        archive.tutorials_folder().unwrap(),
    ] {
        for page in folder.walk() {
            let page = page.unwrap();
            let doc = archive.document_at(&page).unwrap();
            assert!(matches!(doc.kind, Kind::Symbol | Kind::Project));
        }
    }
}

#[test]
fn document_errors_carry_the_file_path() {
    let tmp = build_archive();
    let bad = tmp.path().join("data/documentation/slothcreator/bad.json");
    fs::write(&bad, "{ \"schemaVersion\": { \"major\": 9 } }").unwrap();

    let archive = Archive::open(tmp.path()).unwrap();
    match archive.document_at(&bad).unwrap_err() {
        ArchiveError::Document { path, source } => {
            assert_eq!(path, bad);
            assert!(matches!(source, DecodeError::MalformedField { .. }));
        }
        other => panic!("expected Document error, got {other:?}"),
    }
}

#[test]
fn missing_page_file_is_an_io_error_with_path() {
    let tmp = build_archive();
    let archive = Archive::open(tmp.path()).unwrap();
    let missing = tmp.path().join("data/documentation/missing.json");
    match archive.document_at(&missing).unwrap_err() {
        ArchiveError::Io { path, .. } => assert_eq!(path, missing),
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn subfolders_and_page_files_partition_a_directory() {
    let tmp = build_archive();
    let archive = Archive::open(tmp.path()).unwrap();
    let docs = archive.documentation_folder().unwrap();

    let top = docs.subfolders().unwrap();
    assert_eq!(top.len(), 1);
    assert!(docs.page_files().unwrap().is_empty());

    let slothcreator = &top[0];
    assert_eq!(
        file_names(&slothcreator.page_files().unwrap()),
        ["slothcreator.json"]
    );
    assert_eq!(slothcreator.subfolders().unwrap().len(), 1);
    assert_eq!(slothcreator.level(), 1);
}
