use std::path::PathBuf;

use crate::Hash;

/// error type for cairn operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("repository not found at {0}")]
    NoRepo(PathBuf),

    #[error("repository already exists at {0}")]
    RepoExists(PathBuf),

    #[error("object not found: {0}")]
    ObjectNotFound(Hash),

    #[error("corrupt object: digest mismatch for {0}")]
    CorruptObject(Hash),

    #[error("broken history: missing commit object {0}")]
    BrokenHistory(Hash),

    #[error("staging index unavailable at {path}: {source}")]
    IndexUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("commit failed: {0}")]
    CommitFailed(#[source] Box<Error>),

    #[error("lock contention on repository")]
    LockContention,

    #[error("invalid digest hex: {0}")]
    InvalidHashHex(String),

    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cbor serialization error: {0}")]
    CborEncode(#[from] ciborium::ser::Error<std::io::Error>),

    #[error("cbor deserialization error: {0}")]
    CborDecode(#[from] ciborium::de::Error<std::io::Error>),
}

pub type Result<T> = std::result::Result<T, Error>;

/// helper to wrap io errors with path context
pub trait IoResultExt<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|source| Error::Io {
            path: path.into(),
            source,
        })
    }
}
