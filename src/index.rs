use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use crate::error::{Error, IoResultExt, Result};
use crate::hash::Hash;
use crate::repo::Repo;

/// zstd level for staged content (matches the object record codec)
const COMPRESSION_LEVEL: i32 = 3;

/// append one staging entry to the index
///
/// the entry is a single text line: the content digest, a space, and the
/// hex encoding of the zstd-compressed content. the index stays
/// human-inspectable and grows one line per `stage` call; repeated adds of
/// identical content append duplicate entries by design (the object store
/// still holds the bytes only once).
///
/// failure to open or append the index surfaces as `IndexUnavailable` and
/// the entry is considered not staged.
pub fn stage(repo: &Repo, hash: &Hash, content: &[u8]) -> Result<()> {
    let compressed = zstd::encode_all(content, COMPRESSION_LEVEL).map_err(|e| Error::Io {
        path: PathBuf::from("<zstd>"),
        source: e,
    })?;

    let index_path = repo.index_path();
    let mut file = OpenOptions::new()
        .append(true)
        .open(&index_path)
        .map_err(|source| Error::IndexUnavailable {
            path: index_path.clone(),
            source,
        })?;

    writeln!(file, "{} {}", hash.to_hex(), hex::encode(&compressed)).map_err(|source| {
        Error::IndexUnavailable {
            path: index_path,
            source,
        }
    })?;

    Ok(())
}

/// read the full current index content
///
/// commits snapshot this text wholesale; entries are never parsed
/// individually on the commit path.
pub fn read_all(repo: &Repo) -> Result<String> {
    let index_path = repo.index_path();
    fs::read_to_string(&index_path).map_err(|source| Error::IndexUnavailable {
        path: index_path,
        source,
    })
}

/// truncate the index to empty
pub fn clear(repo: &Repo) -> Result<()> {
    let index_path = repo.index_path();
    fs::write(&index_path, b"").with_path(&index_path)
}
