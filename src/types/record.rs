use serde::{Deserialize, Serialize};

use crate::hash::{digest_record, Hash};

/// a commit record: one snapshot in the linear chain
///
/// `files` is the staging index text captured wholesale at commit time; the
/// record never interprets individual entries. `parent` links to the
/// previous commit, forming an append-only singly linked list that
/// terminates at the root (parent absent). once written, a record's digest
/// and parent link never change, so the chain is tamper-evident.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// unix timestamp (seconds since epoch)
    #[serde(rename = "timeStamp")]
    pub timestamp: i64,
    /// free-form commit message
    pub message: String,
    /// staging index content captured by this commit
    pub files: String,
    /// digest of the parent commit, None for the root
    pub parent: Option<Hash>,
}

impl CommitRecord {
    /// create a new record stamped with the current time
    pub fn new(message: impl Into<String>, files: impl Into<String>, parent: Option<Hash>) -> Self {
        Self {
            timestamp: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs() as i64)
                .unwrap_or(0),
            message: message.into(),
            files: files.into(),
            parent,
        }
    }

    /// create a record with an explicit timestamp
    pub fn with_timestamp(
        timestamp: i64,
        message: impl Into<String>,
        files: impl Into<String>,
        parent: Option<Hash>,
    ) -> Self {
        Self {
            timestamp,
            message: message.into(),
            files: files.into(),
            parent,
        }
    }

    /// is this the root commit (no parent)
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// canonical digest identifying this record
    ///
    /// fields are hashed in a fixed order (timeStamp, message, files,
    /// parent) with the parent rendered as hex or the empty string. this
    /// identity is independent of the on-disk serialization, so a codec
    /// change can never silently alter commit identities.
    pub fn digest(&self) -> Hash {
        let timestamp = self.timestamp.to_string();
        let parent = self.parent.map(|h| h.to_hex()).unwrap_or_default();
        digest_record([
            ("timeStamp", timestamp.as_str()),
            ("message", self.message.as_str()),
            ("files", self.files.as_str()),
            ("parent", parent.as_str()),
        ])
    }
}
