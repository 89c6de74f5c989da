use std::fs::{self, File};
use std::io::Write;

use crate::error::{IoResultExt, Result};
use crate::hash::Hash;
use crate::repo::Repo;

/// read the HEAD pointer
///
/// an empty (or whitespace-only) HEAD means no commits exist yet.
pub fn read_head(repo: &Repo) -> Result<Option<Hash>> {
    let head_path = repo.head_path();
    let content = fs::read_to_string(&head_path).with_path(&head_path)?;

    let hex = content.trim();
    if hex.is_empty() {
        return Ok(None);
    }
    Ok(Some(Hash::from_hex(hex)?))
}

/// update HEAD to point at the given commit digest
///
/// the update is atomic: write to a temp file, fsync, rename over HEAD.
/// a crash never leaves HEAD half-written.
pub fn write_head(repo: &Repo, hash: &Hash) -> Result<()> {
    let head_path = repo.head_path();

    let tmp_path = repo.tmp_path().join(uuid::Uuid::new_v4().to_string());
    {
        let mut tmp_file = File::create(&tmp_path).with_path(&tmp_path)?;
        writeln!(tmp_file, "{}", hash.to_hex()).with_path(&tmp_path)?;
        tmp_file.sync_all().with_path(&tmp_path)?;
    }

    // rename to final location
    fs::rename(&tmp_path, &head_path).with_path(&head_path)?;

    // fsync parent directory
    let dir = File::open(repo.path()).with_path(repo.path())?;
    dir.sync_all().with_path(repo.path())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::tempdir;

    fn test_repo() -> (tempfile::TempDir, Repo) {
        let dir = tempdir().unwrap();
        let repo_path = dir.path().join("repo");
        let repo = Repo::init(&repo_path).unwrap();
        (dir, repo)
    }

    #[test]
    fn test_empty_head_means_no_commits() {
        let (_dir, repo) = test_repo();
        assert_eq!(read_head(&repo).unwrap(), None);
    }

    #[test]
    fn test_write_and_read_head() {
        let (_dir, repo) = test_repo();

        let hash =
            Hash::from_hex("abcdef0123456789abcdef0123456789abcdef0123456789abcdef0123456789")
                .unwrap();

        write_head(&repo, &hash).unwrap();
        assert_eq!(read_head(&repo).unwrap(), Some(hash));
    }

    #[test]
    fn test_overwrite_head() {
        let (_dir, repo) = test_repo();

        let h1 =
            Hash::from_hex("1111111111111111111111111111111111111111111111111111111111111111")
                .unwrap();
        let h2 =
            Hash::from_hex("2222222222222222222222222222222222222222222222222222222222222222")
                .unwrap();

        write_head(&repo, &h1).unwrap();
        write_head(&repo, &h2).unwrap();

        assert_eq!(read_head(&repo).unwrap(), Some(h2));
    }

    #[test]
    fn test_head_is_plain_text() {
        let (_dir, repo) = test_repo();

        let hash = Hash::ZERO;
        write_head(&repo, &hash).unwrap();

        let raw = std::fs::read_to_string(repo.head_path()).unwrap();
        assert_eq!(raw.trim(), hash.to_hex());
    }

    #[test]
    fn test_garbage_head_rejected() {
        let (_dir, repo) = test_repo();

        std::fs::write(repo.head_path(), "not a digest\n").unwrap();
        assert!(matches!(read_head(&repo), Err(Error::InvalidHashHex(_))));
    }
}
