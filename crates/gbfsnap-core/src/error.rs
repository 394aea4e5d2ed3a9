use std::path::PathBuf;

use thiserror::Error;

/// A read that the page script would have thrown on.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Property access on `null`/`undefined`.
    #[error("cannot read `{key}` of {path} (null or undefined)")]
    Undefined { path: String, key: String },
    /// A string method called on something that is not a string.
    #[error("{path} is not a string")]
    NotAString { path: String },
    /// `Object.values` / `for..in` over `null`/`undefined`.
    #[error("cannot enumerate {path} (null or undefined)")]
    NotEnumerable { path: String },
    #[error("no element matches {0}")]
    MissingElement(String),
}

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error(transparent)]
    Extract(#[from] ExtractError),
    #[error("cannot serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("export is outdated (ver {0}), update the bookmarklet")]
    Outdated(f64),
    #[error("`{0}` cannot be used as a character id")]
    BadId(String),
    #[error("invalid {kind} data: missing `{field}`")]
    Invalid { kind: &'static str, field: &'static str },
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}
