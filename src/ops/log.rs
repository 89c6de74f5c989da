use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::hash::Hash;
use crate::head::read_head;
use crate::object::read_record;
use crate::repo::Repo;
use crate::types::CommitRecord;

/// commit record with its digest for log output
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub hash: Hash,
    pub record: CommitRecord,
}

/// result of walking the commit chain from HEAD
///
/// `entries` is newest-first. when a referenced parent has no stored
/// object, the walk stops and `missing` carries the dangling digest;
/// everything read up to that point is still surfaced.
#[derive(Debug)]
pub struct History {
    pub entries: Vec<LogEntry>,
    pub missing: Option<Hash>,
}

impl History {
    /// true when the walk reached the root commit without a broken link
    pub fn is_intact(&self) -> bool {
        self.missing.is_none()
    }
}

/// walk the commit chain backward from HEAD
///
/// follows parent links until the root (parent absent). an empty HEAD
/// yields an empty history. a visited set guards against cycles, so the
/// walk always terminates even on a corrupted chain.
pub fn log(repo: &Repo) -> Result<History> {
    let mut entries = Vec::new();
    let mut visited = HashSet::new();
    let mut cursor = read_head(repo)?;

    while let Some(hash) = cursor {
        if !visited.insert(hash) {
            break;
        }

        match read_record(repo, &hash) {
            Ok(record) => {
                cursor = record.parent;
                entries.push(LogEntry { hash, record });
            }
            Err(Error::ObjectNotFound(_)) => {
                return Ok(History {
                    entries,
                    missing: Some(hash),
                });
            }
            Err(e) => return Err(e),
        }
    }

    Ok(History {
        entries,
        missing: None,
    })
}

impl std::fmt::Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "commit {}", self.hash)?;
        writeln!(f, "Date: {}", format_timestamp(self.record.timestamp))?;
        writeln!(f)?;
        for line in self.record.message.lines() {
            writeln!(f, "{}", line)?;
        }
        writeln!(f)?;
        Ok(())
    }
}

/// render a unix timestamp as `YYYY-MM-DD HH:MM:SS UTC`
fn format_timestamp(timestamp: i64) -> String {
    let days = timestamp.div_euclid(86400);
    let secs = timestamp.rem_euclid(86400);
    let (year, month, day) = civil_from_days(days);

    format!(
        "{:04}-{:02}-{:02} {:02}:{:02}:{:02} UTC",
        year,
        month,
        day,
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60
    )
}

/// gregorian date from days since the unix epoch
fn civil_from_days(z: i64) -> (i64, u32, u32) {
    // shift epoch from 1970-01-01 to 0000-03-01 so leap days land at
    // year-of-era boundaries
    let z = z + 719468;
    let era = z.div_euclid(146097);
    let doe = z.rem_euclid(146097);
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = if mp < 10 { mp + 3 } else { mp - 9 } as u32;
    (if month <= 2 { y + 1 } else { y }, month, day)
}
