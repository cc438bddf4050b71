//! Archive addressing: finding page files and static assets on disk.
//!
//! An archive is a plain directory tree. Pages live as JSON files under
//! `data/documentation/` and `data/tutorials/`; everything else is static
//! assets in well-known folders at the root:
//!
//! ```text
//! Example.doccarchive/
//! ├── favicon.ico
//! ├── favicon.svg
//! ├── css/                 # stylesheets()
//! ├── img/                 # system_images()
//! ├── images/              # user_images()
//! ├── videos/              # videos()
//! ├── downloads/           # downloads()
//! └── data/
//!     ├── documentation/   # one .json per symbol/article page
//!     │   └── example/
//!     │       ├── example.json
//!     │       └── sloth/
//!     └── tutorials/       # one .json per tutorial page
//! ```
//!
//! This module only addresses files; decoding is [`Document`]'s job. Listing
//! functions return paths in file-name order so output is reproducible
//! across platforms.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

use crate::codec::DecodeError;
use crate::schema::document::Document;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("archive does not exist: {0}")]
    NotFound(PathBuf),
    #[error("archive is not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("no data/documentation or data/tutorials under: {0}")]
    NoContent(PathBuf),
    #[error("IO error at {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to decode document {path}")]
    Document {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },
}

/// An archive rooted at some directory.
#[derive(Debug)]
pub struct Archive {
    root: PathBuf,
    documentation: Option<PathBuf>,
    tutorials: Option<PathBuf>,
}

impl Archive {
    /// Open an archive. The root must be an existing directory holding at
    /// least one of `data/documentation` and `data/tutorials`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, ArchiveError> {
        let root = root.into();
        if !root.exists() {
            return Err(ArchiveError::NotFound(root));
        }
        if !root.is_dir() {
            return Err(ArchiveError::NotADirectory(root));
        }

        let documentation = existing_dir(root.join("data/documentation"));
        let tutorials = existing_dir(root.join("data/tutorials"));
        if documentation.is_none() && tutorials.is_none() {
            return Err(ArchiveError::NoContent(root));
        }

        Ok(Archive {
            root,
            documentation,
            tutorials,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The symbol/article page tree, when the archive has one.
    pub fn documentation_folder(&self) -> Option<Folder> {
        self.documentation.clone().map(Folder::new)
    }

    /// The tutorial page tree, when the archive has one.
    pub fn tutorials_folder(&self) -> Option<Folder> {
        self.tutorials.clone().map(Folder::new)
    }

    /// Files under `css/`, name-sorted. Empty when the folder is absent.
    pub fn stylesheets(&self) -> Result<Vec<PathBuf>, ArchiveError> {
        sorted_files(&self.root.join("css"))
    }

    /// Author-provided images under `images/`.
    pub fn user_images(&self) -> Result<Vec<PathBuf>, ArchiveError> {
        sorted_files(&self.root.join("images"))
    }

    /// Renderer chrome images under `img/`.
    pub fn system_images(&self) -> Result<Vec<PathBuf>, ArchiveError> {
        sorted_files(&self.root.join("img"))
    }

    pub fn videos(&self) -> Result<Vec<PathBuf>, ArchiveError> {
        sorted_files(&self.root.join("videos"))
    }

    pub fn downloads(&self) -> Result<Vec<PathBuf>, ArchiveError> {
        sorted_files(&self.root.join("downloads"))
    }

    /// Root-level `favicon.*` files.
    pub fn favicons(&self) -> Result<Vec<PathBuf>, ArchiveError> {
        Ok(sorted_files(&self.root)?
            .into_iter()
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with("favicon."))
            })
            .collect())
    }

    /// Read and decode one page file. Errors carry the offending path.
    pub fn document_at(&self, path: &Path) -> Result<Document, ArchiveError> {
        let bytes = fs::read(path).map_err(|source| ArchiveError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Document::from_slice(&bytes).map_err(|source| ArchiveError::Document {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// A directory inside one of the archive's page trees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folder {
    path: PathBuf,
    level: usize,
}

impl Folder {
    fn new(path: PathBuf) -> Self {
        Folder { path, level: 0 }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Depth below the page-tree root (`data/documentation` is level 0).
    pub fn level(&self) -> usize {
        self.level
    }

    /// Page files directly in this folder, name-sorted.
    pub fn page_files(&self) -> Result<Vec<PathBuf>, ArchiveError> {
        Ok(sorted_files(&self.path)?
            .into_iter()
            .filter(|p| is_page_file(p))
            .collect())
    }

    /// Child folders, name-sorted.
    pub fn subfolders(&self) -> Result<Vec<Folder>, ArchiveError> {
        Ok(sorted_entries(&self.path)?
            .into_iter()
            .filter(|p| p.is_dir())
            .map(|path| Folder {
                path,
                level: self.level + 1,
            })
            .collect())
    }

    /// All page files below this folder, lazily, in file-name order at each
    /// directory level.
    pub fn walk(&self) -> impl Iterator<Item = Result<PathBuf, ArchiveError>> {
        let root = self.path.clone();
        WalkDir::new(&self.path)
            .sort_by_file_name()
            .into_iter()
            .filter_map(move |entry| match entry {
                Ok(entry) => {
                    let is_file = entry.file_type().is_file();
                    let path = entry.into_path();
                    (is_file && is_page_file(&path)).then_some(Ok(path))
                }
                Err(err) => {
                    let path = err
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| root.clone());
                    Some(Err(ArchiveError::Io {
                        path,
                        source: err.into(),
                    }))
                }
            })
    }
}

fn is_page_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

fn existing_dir(path: PathBuf) -> Option<PathBuf> {
    path.is_dir().then_some(path)
}

/// Entries of a directory in file-name order; empty when the directory does
/// not exist. Archives legitimately ship without some asset folders.
fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, ArchiveError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let read = fs::read_dir(dir).map_err(|source| ArchiveError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut entries = Vec::new();
    for entry in read {
        let entry = entry.map_err(|source| ArchiveError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        entries.push(entry.path());
    }
    entries.sort();
    Ok(entries)
}

fn sorted_files(dir: &Path) -> Result<Vec<PathBuf>, ArchiveError> {
    Ok(sorted_entries(dir)?
        .into_iter()
        .filter(|p| p.is_file())
        .collect())
}
