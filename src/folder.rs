use crate::error::{Result, SilhouetteError};
use log::debug;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.iter().any(|s| ext.eq_ignore_ascii_case(s)))
}

/// Sorted list of the images found under a folder, with index-based
/// navigation. Holds no cursor; callers keep their own index.
#[derive(Debug, Clone)]
pub struct ImageFolder {
    root: PathBuf,
    images: Vec<PathBuf>,
}

impl ImageFolder {
    /// Collect every JPG/JPEG/PNG under `root`. An empty folder is not an error.
    pub fn scan(root: &Path, recursive: bool) -> Result<Self> {
        let max_depth = if recursive { usize::MAX } else { 1 };
        let mut images = Vec::new();
        for entry in WalkDir::new(root).min_depth(1).max_depth(max_depth) {
            let entry = entry.map_err(|e| walk_error(root, e))?;
            if !entry.file_type().is_dir() && is_supported_image(entry.path()) {
                images.push(entry.into_path());
            }
        }
        images.sort();
        debug!("found {} images under {}", images.len(), root.display());
        Ok(Self {
            root: root.to_path_buf(),
            images,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Path> {
        self.images.get(index).map(PathBuf::as_path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.images.iter().map(PathBuf::as_path)
    }

    /// Index before `index`, `None` on the first image.
    pub fn previous(&self, index: usize) -> Option<usize> {
        if index > 0 && index < self.len() {
            Some(index - 1)
        } else {
            None
        }
    }

    /// Index after `index`, `None` on the last image.
    pub fn next(&self, index: usize) -> Option<usize> {
        if index + 1 < self.len() {
            Some(index + 1)
        } else {
            None
        }
    }

    /// `"3 / 10 - moon.png"`
    pub fn position_label(&self, index: usize) -> Option<String> {
        let path = self.get(index)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        Some(format!("{} / {} - {}", index + 1, self.len(), name))
    }
}

fn walk_error(root: &Path, err: walkdir::Error) -> SilhouetteError {
    let path = err.path().unwrap_or(root).to_path_buf();
    SilhouetteError::Io {
        path,
        source: io::Error::from(err),
    }
}
