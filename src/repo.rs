use std::fs::File;
use std::path::{Path, PathBuf};

use nix::fcntl::{Flock, FlockArg};

use crate::error::{Error, IoResultExt, Result};

/// name of the repository directory created inside a working directory
pub const REPO_DIR: &str = ".cairn";

/// a cairn repository
///
/// on disk the repository is a directory holding `HEAD` (current commit
/// digest, empty until the first commit), `index` (the staging area),
/// `objects/` (blobs and commit records, sharded by digest prefix) and
/// `tmp/` (staging for atomic writes).
pub struct Repo {
    path: PathBuf,
}

impl Repo {
    /// initialize a new repository at the given path
    ///
    /// fails with `RepoExists` if the directory is already present; callers
    /// that want idempotent init catch that case and report it.
    pub fn init(path: &Path) -> Result<Self> {
        if path.exists() {
            return Err(Error::RepoExists(path.to_path_buf()));
        }

        // create directory structure
        std::fs::create_dir_all(path.join("objects")).with_path(path)?;
        std::fs::create_dir_all(path.join("tmp")).with_path(path)?;

        // HEAD and index start out empty
        let head = path.join("HEAD");
        File::create(&head).with_path(&head)?;
        let index = path.join("index");
        File::create(&index).with_path(&index)?;

        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// open an existing repository
    pub fn open(path: &Path) -> Result<Self> {
        if !path.join("HEAD").exists() {
            return Err(Error::NoRepo(path.to_path_buf()));
        }

        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// repository root path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// path to the HEAD pointer file
    pub fn head_path(&self) -> PathBuf {
        self.path.join("HEAD")
    }

    /// path to the staging index file
    pub fn index_path(&self) -> PathBuf {
        self.path.join("index")
    }

    /// path to objects directory
    pub fn objects_path(&self) -> PathBuf {
        self.path.join("objects")
    }

    /// path to tmp directory (for atomic writes)
    pub fn tmp_path(&self) -> PathBuf {
        self.path.join("tmp")
    }

    /// path to lock file
    pub fn lock_path(&self) -> PathBuf {
        self.path.join("lock")
    }

    /// acquire exclusive lock on the repository
    /// returns a guard that releases the lock on drop
    pub fn lock(&self) -> Result<RepoLock> {
        let lock_path = self.lock_path();
        let file = File::create(&lock_path).with_path(&lock_path)?;

        let flock = Flock::lock(file, FlockArg::LockExclusiveNonblock)
            .map_err(|_| Error::LockContention)?;

        Ok(RepoLock { flock })
    }

    /// try to acquire exclusive lock, returning None if already locked
    pub fn try_lock(&self) -> Result<Option<RepoLock>> {
        let lock_path = self.lock_path();
        let file = File::create(&lock_path).with_path(&lock_path)?;

        match Flock::lock(file, FlockArg::LockExclusiveNonblock) {
            Ok(flock) => Ok(Some(RepoLock { flock })),
            Err((_, nix::errno::Errno::EWOULDBLOCK)) => Ok(None),
            Err(_) => Err(Error::LockContention),
        }
    }
}

/// guard that holds the repository lock until dropped
pub struct RepoLock {
    #[allow(dead_code)]
    flock: Flock<File>,
}
// lock is released automatically when Flock is dropped
