use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;

use crate::error::{Error, IoResultExt, Result};
use crate::hash::Hash;
use crate::object::blob::fsync_dir;
use crate::repo::Repo;
use crate::types::CommitRecord;

/// write a commit record to the object store
///
/// records are serialized as CBOR, then zstd compressed, and stored in the
/// same sharded namespace as blobs. the key is the record's canonical field
/// digest, NOT a hash of the serialized bytes, so commit identities survive
/// any change of codec or compression framing.
pub fn write_record(repo: &Repo, record: &CommitRecord) -> Result<Hash> {
    let hash = record.digest();

    // serialize to cbor
    let mut cbor_bytes = Vec::new();
    ciborium::into_writer(record, &mut cbor_bytes)?;

    // compress with zstd (level 3)
    let compressed = zstd::encode_all(&cbor_bytes[..], 3).map_err(|e| Error::Io {
        path: PathBuf::from("<zstd>"),
        source: e,
    })?;

    let (dir, file) = hash.to_path_components();
    let record_dir = repo.objects_path().join(&dir);
    let record_path = record_dir.join(&file);

    // dedup: identical records share one digest, one file
    if record_path.exists() {
        return Ok(hash);
    }

    // ensure directory exists
    fs::create_dir_all(&record_dir).with_path(&record_dir)?;

    // atomic write: temp -> fsync -> rename
    let tmp_path = repo.tmp_path().join(uuid::Uuid::new_v4().to_string());
    {
        let mut tmp_file = File::create(&tmp_path).with_path(&tmp_path)?;
        tmp_file.write_all(&compressed).with_path(&tmp_path)?;
        tmp_file.sync_all().with_path(&tmp_path)?;
    }

    // rename to final location
    fs::rename(&tmp_path, &record_path).with_path(&record_path)?;

    // fsync parent directory
    fsync_dir(&record_dir)?;

    Ok(hash)
}

/// read a commit record from the object store
pub fn read_record(repo: &Repo, hash: &Hash) -> Result<CommitRecord> {
    let path = record_path(repo, hash);

    let compressed = fs::read(&path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::ObjectNotFound(*hash)
        } else {
            Error::Io {
                path: path.clone(),
                source: e,
            }
        }
    })?;

    // decompress
    let cbor_bytes = zstd::decode_all(&compressed[..]).map_err(|e| Error::Io {
        path: path.clone(),
        source: e,
    })?;

    // deserialize
    let record: CommitRecord = ciborium::from_reader(&cbor_bytes[..])?;

    // verify the decoded record re-hashes to the requested digest
    if record.digest() != *hash {
        return Err(Error::CorruptObject(*hash));
    }

    Ok(record)
}

/// get the filesystem path to a commit record
pub fn record_path(repo: &Repo, hash: &Hash) -> PathBuf {
    let (dir, file) = hash.to_path_components();
    repo.objects_path().join(dir).join(file)
}

/// check if a commit record exists in the object store
pub fn record_exists(repo: &Repo, hash: &Hash) -> bool {
    record_path(repo, hash).exists()
}
