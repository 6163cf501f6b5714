//! Session Provider seam.
//!
//! The authentication material itself (noise keys, signed prekeys,
//! registration data) is produced and consumed by the protocol client;
//! this crate only loads it at startup and persists it again whenever the
//! client reports a change.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;
use thiserror::Error;

/// Serialized authentication material needed to resume a session without
/// re-pairing. Opaque to this crate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(flatten)]
    material: serde_json::Map<String, Value>,
}

impl Credentials {
    /// Fresh state for a device that has never paired.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_material(material: serde_json::Map<String, Value>) -> Self {
        Self { material }
    }

    /// Whether the material belongs to a paired device. The protocol
    /// client records the account handle under `me` on successful pairing.
    pub fn is_registered(&self) -> bool {
        self.material.contains_key("me")
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("credential serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Loads credential state at startup and persists it on change.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self) -> Result<Credentials, SessionError>;

    async fn save(&self, credentials: &Credentials) -> Result<(), SessionError>;
}

/// File-backed session store keeping `creds.json` under a session
/// directory, mirroring the multi-file auth-state layout used by WhatsApp
/// Web clients.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn creds_path(&self) -> PathBuf {
        self.dir.join("creds.json")
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Credentials, SessionError> {
        let path = self.creds_path();
        match tokio::fs::read_to_string(&path).await {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Credentials::empty()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, credentials: &Credentials) -> Result<(), SessionError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let raw = serde_json::to_string_pretty(credentials)?;
        tokio::fs::write(self.creds_path(), raw).await?;
        Ok(())
    }
}
