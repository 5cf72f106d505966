//! On-disk docset layout
//!
//! A docset is a directory `<Name>.docset` with the following structure:
//!
//! ```text
//! Contents/
//!   Info.plist
//!   Resources/
//!     docSet.dsidx
//!     Documents/
//!       index.html
//!       Category/ Constant/ Enum/ Struct/ Function/
//! ```

use crate::output::escape_text;
use crate::storage::EntryKind;
use crate::{DocsetError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the docset root page, relative to the documents directory
pub const ROOT_PAGE: &str = "index.html";

/// Paths of a docset bundle
#[derive(Debug, Clone)]
pub struct DocsetLayout {
    root: PathBuf,
}

impl DocsetLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn contents_dir(&self) -> PathBuf {
        self.root.join("Contents")
    }

    pub fn info_plist_path(&self) -> PathBuf {
        self.contents_dir().join("Info.plist")
    }

    pub fn resources_dir(&self) -> PathBuf {
        self.contents_dir().join("Resources")
    }

    pub fn index_db_path(&self) -> PathBuf {
        self.resources_dir().join("docSet.dsidx")
    }

    /// Directory every relative page path is resolved against
    pub fn documents_dir(&self) -> PathBuf {
        self.resources_dir().join("Documents")
    }

    pub fn kind_dir(&self, kind: EntryKind) -> PathBuf {
        self.documents_dir().join(kind.dir_name())
    }

    pub fn root_page_path(&self) -> PathBuf {
        self.documents_dir().join(ROOT_PAGE)
    }

    /// Creates the bundle directories and empties the page directories
    ///
    /// The page directories themselves are kept; everything inside them is
    /// removed so a build never mixes in pages of a previous run.
    pub fn prepare(&self) -> Result<()> {
        for kind in EntryKind::ALL {
            let dir = self.kind_dir(kind);
            fs::create_dir_all(&dir).map_err(|e| DocsetError::filesystem(&dir, e))?;
            remove_contents(&dir)?;
        }
        Ok(())
    }

    /// Writes a page wrapped in the document shell
    ///
    /// # Arguments
    ///
    /// * `relative_path` - Path relative to the documents directory
    /// * `title` - Document title
    /// * `body` - HTML fragment placed in the body
    pub fn write_page(&self, relative_path: &str, title: &str, body: &str) -> Result<PathBuf> {
        let path = self.documents_dir().join(relative_path);
        fs::write(&path, document_shell(title, body))
            .map_err(|e| DocsetError::filesystem(&path, e))?;
        Ok(path)
    }

    /// Lists the saved pages of every page directory
    ///
    /// Directories come in `EntryKind::ALL` order, files sorted by name.
    pub fn saved_pages(&self) -> Result<Vec<PathBuf>> {
        let mut pages = Vec::new();

        for kind in EntryKind::ALL {
            let dir = self.kind_dir(kind);
            let mut files = Vec::new();

            for entry in fs::read_dir(&dir).map_err(|e| DocsetError::filesystem(&dir, e))? {
                let path = entry.map_err(|e| DocsetError::filesystem(&dir, e))?.path();
                if path.is_file() && path.extension().is_some_and(|ext| ext == "html") {
                    files.push(path);
                }
            }

            files.sort();
            pages.extend(files);
        }

        Ok(pages)
    }
}

/// Removes every entry inside `dir`, keeping the directory itself
fn remove_contents(dir: &Path) -> Result<()> {
    for entry in fs::read_dir(dir).map_err(|e| DocsetError::filesystem(dir, e))? {
        let path = entry.map_err(|e| DocsetError::filesystem(dir, e))?.path();
        let removed = if path.is_dir() {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };
        removed.map_err(|e| DocsetError::filesystem(&path, e))?;
    }
    Ok(())
}

/// Wraps a fragment in a minimal HTML document
pub fn document_shell(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html><html>\n<head><title>{}</title></head>\n<body>{}</body>\n</html>",
        escape_text(title),
        body
    )
}
