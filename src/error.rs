use std::path::{Path, PathBuf};

/// Errors from reading and writing project files, CSV and settings.
///
/// The layout engine itself never fails; only the file boundary does.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV is missing a milestone column (found headers: {found:?})")]
    MissingColumns { found: Vec<String> },

    #[error("no importable rows ({skipped} skipped)")]
    Empty { skipped: usize },
}

impl Error {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Error::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
