//! The consumed Protocol Client surface.
//!
//! The live connection, protocol framing and encryption all belong to an
//! external client implementation; this module defines the seam it is
//! consumed through. [`Connector`] establishes a connection and hands back
//! an operations handle plus the event stream; [`ProtocolClient`] is the
//! handle the reaction handlers call back into.

pub mod http;
pub mod memory;
pub mod version;

use crate::auth::Credentials;
use crate::types::events::Event;
use crate::types::jid::Jid;
use crate::types::message::MessageKey;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;

pub use version::{ProtocolVersion, VersionError, VersionResolver};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("send to {jid} failed: {reason}")]
    Send { jid: Jid, reason: String },

    #[error("mark-read failed: {0}")]
    MarkRead(String),

    #[error("connection failed: {0}")]
    Connect(String),
}

/// Identifier assigned to an outbound message by the protocol client.
pub type MessageId = String;

/// A text message to send, optionally mention-tagging participants.
#[derive(Debug, Clone, Default)]
pub struct OutgoingMessage {
    pub text: String,
    pub mentions: Vec<Jid>,
}

impl OutgoingMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            mentions: Vec::new(),
        }
    }

    pub fn mentioning(text: impl Into<String>, participant: Jid) -> Self {
        Self {
            text: text.into(),
            mentions: vec![participant],
        }
    }
}

/// Operations handle onto a live connection.
#[async_trait]
pub trait ProtocolClient: Send + Sync {
    async fn send_message(
        &self,
        to: &Jid,
        message: OutgoingMessage,
    ) -> Result<MessageId, ClientError>;

    async fn mark_read(&self, keys: &[MessageKey]) -> Result<(), ClientError>;
}

/// Options for establishing one connection.
#[derive(Debug, Clone)]
pub struct ConnectOptions {
    pub credentials: Credentials,
    pub version: ProtocolVersion,
    /// Silence the protocol client's own logging; the reaction layer does
    /// its own reporting.
    pub log_suppression: bool,
}

/// A live connection: the operations handle and the event stream. The
/// stream ends when the underlying transport closes.
pub struct Connection {
    pub client: Arc<dyn ProtocolClient>,
    pub events: mpsc::Receiver<Event>,
}

/// Establishes connections. Implemented by transport-backed protocol
/// clients; the in-process [`memory::MemoryConnector`] implements it for
/// tests and embedding.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self, options: ConnectOptions) -> Result<Connection, ClientError>;
}
