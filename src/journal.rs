//! Flat append-only journal for deletion and status-view records.
//!
//! Each record is one line, `[<local timestamp>] <message>`. The files are
//! write-once from this crate's point of view: nothing here reads them
//! back, there is no rotation and no size bound.

use crate::types::jid::Jid;
use chrono::Local;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub const DELETED_LOG_FILE: &str = "deleted_msgs.txt";
pub const VIEWED_LOG_FILE: &str = "viewed_status.txt";

#[derive(Debug, Clone)]
pub struct Journal {
    deleted_path: PathBuf,
    viewed_path: PathBuf,
}

impl Default for Journal {
    fn default() -> Self {
        Self {
            deleted_path: PathBuf::from(DELETED_LOG_FILE),
            viewed_path: PathBuf::from(VIEWED_LOG_FILE),
        }
    }
}

impl Journal {
    pub fn new(deleted_path: impl Into<PathBuf>, viewed_path: impl Into<PathBuf>) -> Self {
        Self {
            deleted_path: deleted_path.into(),
            viewed_path: viewed_path.into(),
        }
    }

    /// Both journal files under one directory, using the default names.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(DELETED_LOG_FILE), dir.join(VIEWED_LOG_FILE))
    }

    /// Appends a deletion record for `chat`. Returns the written line so
    /// the caller can echo it to the console log.
    pub fn record_deleted_message(&self, chat: &Jid) -> io::Result<String> {
        let line = format!("[{}] Deleted message in {}", Self::timestamp(), chat);
        Self::append(&self.deleted_path, &line)?;
        Ok(line)
    }

    /// Appends a viewed-status record for the status author `name`.
    pub fn record_viewed_status(&self, name: &str) -> io::Result<String> {
        let line = format!("[{}] Viewed status from {}", Self::timestamp(), name);
        Self::append(&self.viewed_path, &line)?;
        Ok(line)
    }

    fn timestamp() -> String {
        Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
    }

    fn append(path: &Path, line: &str) -> io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        // One buffer per record so each append lands as a single write.
        file.write_all(format!("{line}\n").as_bytes())
    }
}
