use crate::error::{Error, Result};
use crate::hash::Hash;
use crate::head::{read_head, write_head};
use crate::index;
use crate::object::write_record;
use crate::repo::Repo;
use crate::types::CommitRecord;

/// create a commit from the current staging index
///
/// snapshots the whole index text into a new record whose parent is the
/// current HEAD (absent for the root commit), then writes in crash-safe
/// order: record object fully persisted, HEAD atomically renamed to the new
/// digest, index truncated. an empty index still commits; the record is
/// valid, just pointless.
///
/// a failed record or HEAD write surfaces as `CommitFailed` with HEAD not
/// advanced and the staged entries intact.
pub fn commit(repo: &Repo, message: &str) -> Result<Hash> {
    let _lock = repo.lock()?;

    let files = index::read_all(repo)?;
    let parent = read_head(repo)?;

    let record = CommitRecord::new(message, files, parent);

    let hash = write_record(repo, &record).map_err(commit_failed)?;
    write_head(repo, &hash).map_err(commit_failed)?;
    index::clear(repo)?;

    Ok(hash)
}

fn commit_failed(e: Error) -> Error {
    Error::CommitFailed(Box::new(e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::read_record;
    use crate::ops::add;
    use std::fs;
    use tempfile::tempdir;

    fn test_repo() -> (tempfile::TempDir, Repo) {
        let dir = tempdir().unwrap();
        let repo_path = dir.path().join("repo");
        let repo = Repo::init(&repo_path).unwrap();
        (dir, repo)
    }

    fn stage_file(dir: &tempfile::TempDir, repo: &Repo, name: &str, content: &str) -> Hash {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        add(repo, &path).unwrap()
    }

    #[test]
    fn test_commit_snapshots_index() {
        let (dir, repo) = test_repo();

        let blob = stage_file(&dir, &repo, "a.txt", "content");
        let staged = index::read_all(&repo).unwrap();

        let hash = commit(&repo, "first").unwrap();
        let record = read_record(&repo, &hash).unwrap();

        assert_eq!(record.message, "first");
        assert_eq!(record.files, staged);
        assert!(record.files.contains(&blob.to_hex()));
        assert!(record.is_root());
    }

    #[test]
    fn test_commit_advances_head_and_clears_index() {
        let (dir, repo) = test_repo();

        stage_file(&dir, &repo, "a.txt", "content");
        let hash = commit(&repo, "first").unwrap();

        assert_eq!(read_head(&repo).unwrap(), Some(hash));
        assert_eq!(index::read_all(&repo).unwrap(), "");
    }

    #[test]
    fn test_second_commit_links_to_first() {
        let (dir, repo) = test_repo();

        stage_file(&dir, &repo, "a.txt", "v1");
        let first = commit(&repo, "first").unwrap();

        stage_file(&dir, &repo, "a.txt", "v2");
        let second = commit(&repo, "second").unwrap();

        assert_ne!(first, second);
        let record = read_record(&repo, &second).unwrap();
        assert_eq!(record.parent, Some(first));
        assert_eq!(read_head(&repo).unwrap(), Some(second));
    }

    #[test]
    fn test_commit_empty_index_is_permitted() {
        let (_dir, repo) = test_repo();

        let hash = commit(&repo, "nothing staged").unwrap();
        let record = read_record(&repo, &hash).unwrap();

        assert_eq!(record.files, "");
        assert_eq!(read_head(&repo).unwrap(), Some(hash));
    }

    #[test]
    fn test_commit_digest_matches_canonical_record() {
        let (dir, repo) = test_repo();

        stage_file(&dir, &repo, "a.txt", "content");
        let hash = commit(&repo, "canonical").unwrap();
        let record = read_record(&repo, &hash).unwrap();

        assert_eq!(record.digest(), hash);
    }

    #[test]
    fn test_failed_commit_leaves_state_untouched() {
        let (dir, repo) = test_repo();

        stage_file(&dir, &repo, "a.txt", "content");
        let staged = index::read_all(&repo).unwrap();

        // make the object namespace unwritable so the record write fails
        fs::remove_dir_all(repo.objects_path()).unwrap();
        fs::write(repo.objects_path(), b"not a directory").unwrap();

        let result = commit(&repo, "doomed");
        assert!(matches!(result, Err(Error::CommitFailed(_))));

        // HEAD not advanced, index not cleared
        assert_eq!(read_head(&repo).unwrap(), None);
        assert_eq!(index::read_all(&repo).unwrap(), staged);
    }

    #[test]
    fn test_commit_while_locked() {
        let (_dir, repo) = test_repo();

        let _held = repo.lock().unwrap();
        let result = commit(&repo, "blocked");
        assert!(matches!(result, Err(Error::LockContention)));
    }
}
