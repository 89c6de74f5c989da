use std::fs;
use std::path::Path;

use crate::error::{IoResultExt, Result};
use crate::hash::Hash;
use crate::index;
use crate::object::write_blob;
use crate::repo::Repo;

/// stage a file for the next commit
///
/// reads `path` from the working directory (not the repository), stores the
/// content as a blob at its sharded location, and appends one entry to the
/// staging index. the blob write happens first: if staging then fails, the
/// entry is not recorded and the add is reported as not-staged (the orphan
/// blob is harmless in a store without GC).
///
/// holds the repository lock so concurrent adds cannot interleave index
/// writes.
pub fn add(repo: &Repo, path: &Path) -> Result<Hash> {
    let _lock = repo.lock()?;

    let content = fs::read(path).with_path(path)?;
    let hash = write_blob(repo, &content)?;
    index::stage(repo, &hash, &content)?;

    Ok(hash)
}
