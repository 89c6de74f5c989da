//! cairn - minimal content-addressed version control
//!
//! stores file snapshots keyed by content hash, accumulates staged changes,
//! and links snapshots into a linear commit history.
//!
//! # Core concepts
//!
//! - **Blob**: raw file bytes, addressed by SHA-256 digest, sharded on disk
//!   as `objects/<2 hex>/<62 hex>`
//! - **Staging index**: append-only text file of pending adds, one
//!   `<digest> <compressed content>` line per entry
//! - **Commit record**: immutable snapshot of the index with a parent link,
//!   stored in the same object namespace as blobs (CBOR + zstd)
//! - **HEAD**: pointer to the most recent commit, empty until the first one
//!
//! Commit identity is a canonical digest over the record's fields in fixed
//! order, independent of the on-disk serialization.
//!
//! # Example usage
//!
//! ```no_run
//! use cairn::{ops, Repo};
//! use std::path::Path;
//!
//! // initialize a repository
//! let repo = Repo::init(Path::new(".cairn")).unwrap();
//!
//! // stage a file and commit
//! ops::add(&repo, Path::new("notes.txt")).unwrap();
//! let hash = ops::commit(&repo, "initial commit").unwrap();
//!
//! // walk the history, newest first
//! for entry in ops::log(&repo).unwrap().entries {
//!     println!("{} {}", entry.hash, entry.record.message);
//! }
//! # let _ = hash;
//! ```

mod error;
mod hash;
mod head;
mod object;
mod repo;

pub mod index;
pub mod ops;
pub mod types;

pub use error::{Error, Result};
pub use hash::{digest, digest_record, Hash};
pub use head::{read_head, write_head};
pub use object::{
    blob_exists, blob_path, read_blob, read_record, record_exists, record_path, write_blob,
    write_record,
};
pub use repo::{Repo, RepoLock, REPO_DIR};
pub use types::CommitRecord;
