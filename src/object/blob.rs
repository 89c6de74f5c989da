use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Error, IoResultExt, Result};
use crate::hash::{digest, Hash};
use crate::repo::Repo;

/// write a blob to the object store
///
/// the blob lands at `objects/<2 hex>/<62 hex>`, derived from its content
/// digest. the write is unconditional: re-adding identical content renames
/// identical bytes over the same path, which is an effective no-op. blobs
/// and commit records share this one sharded namespace.
///
/// returns the blob digest, which is the only handle to the content.
pub fn write_blob(repo: &Repo, content: &[u8]) -> Result<Hash> {
    let hash = digest(content);

    let (dir, file) = hash.to_path_components();
    let blob_dir = repo.objects_path().join(&dir);
    let blob_path = blob_dir.join(&file);

    // ensure prefix directory exists (idempotent)
    fs::create_dir_all(&blob_dir).with_path(&blob_dir)?;

    // atomic write: temp file -> fsync -> rename
    let tmp_path = repo.tmp_path().join(uuid::Uuid::new_v4().to_string());
    {
        let mut tmp_file = File::create(&tmp_path).with_path(&tmp_path)?;
        tmp_file.write_all(content).with_path(&tmp_path)?;
        tmp_file.sync_all().with_path(&tmp_path)?;
    }

    // rename to final location
    fs::rename(&tmp_path, &blob_path).with_path(&blob_path)?;

    // fsync parent directory
    fsync_dir(&blob_dir)?;

    Ok(hash)
}

/// get the filesystem path to a blob
pub fn blob_path(repo: &Repo, hash: &Hash) -> PathBuf {
    let (dir, file) = hash.to_path_components();
    repo.objects_path().join(dir).join(file)
}

/// check if a blob exists in the object store
pub fn blob_exists(repo: &Repo, hash: &Hash) -> bool {
    blob_path(repo, hash).exists()
}

/// read blob content
pub fn read_blob(repo: &Repo, hash: &Hash) -> Result<Vec<u8>> {
    let path = blob_path(repo, hash);
    fs::read(&path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::ObjectNotFound(*hash)
        } else {
            Error::Io { path, source: e }
        }
    })
}

/// fsync a directory
pub(crate) fn fsync_dir(path: &Path) -> Result<()> {
    let dir = File::open(path).with_path(path)?;
    dir.sync_all().with_path(path)?;
    Ok(())
}
