use std::path::{Path, PathBuf};
use thiserror::Error;

pub type Result<T, E = SilhouetteError> = std::result::Result<T, E>;

/// Failures of the I/O layer around the transform. The transform itself
/// never fails.
#[derive(Debug, Error)]
pub enum SilhouetteError {
    #[error("I/O failure on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unreadable image{}: {source}", origin(.path.as_deref()))]
    UnreadableImage {
        path: Option<PathBuf>,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to encode PNG: {0}")]
    Encode(#[source] image::ImageError),

    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("{} has no valid file stem", .0.display())]
    InvalidPath(PathBuf),
}

impl SilhouetteError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

fn origin(path: Option<&Path>) -> String {
    match path {
        Some(p) => format!(" {}", p.display()),
        None => String::new(),
    }
}
