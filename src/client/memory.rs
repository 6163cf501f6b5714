//! In-process protocol client.
//!
//! Stands in for a transport-backed client: operations are recorded
//! instead of sent, and events are injected by the embedder. The test
//! suite drives the dispatcher through it, and the demo binary uses it as
//! the connector slot until a live transport is wired in.

use super::{
    ClientError, ConnectOptions, Connection, Connector, MessageId, OutgoingMessage, ProtocolClient,
};
use crate::types::events::Event;
use crate::types::jid::Jid;
use crate::types::message::MessageKey;
use async_trait::async_trait;
use log::{debug, info};
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::{Mutex, mpsc};

#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Send {
        to: Jid,
        text: String,
        mentions: Vec<Jid>,
    },
    MarkRead {
        keys: Vec<MessageKey>,
    },
}

/// Records every operation; failure injection is per-kind, plus
/// per-mention so one participant in a batch can be made to fail.
#[derive(Default)]
pub struct MemoryClient {
    calls: Mutex<Vec<RecordedCall>>,
    fail_sends: AtomicBool,
    fail_mark_read: AtomicBool,
    failing_mentions: Mutex<HashSet<Jid>>,
    next_id: AtomicU64,
}

impl MemoryClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().await.clone()
    }

    pub fn set_fail_sends(&self, fail: bool) {
        self.fail_sends.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_mark_read(&self, fail: bool) {
        self.fail_mark_read.store(fail, Ordering::SeqCst);
    }

    /// Makes any send whose mentions include `jid` fail.
    pub async fn fail_sends_mentioning(&self, jid: Jid) {
        self.failing_mentions.lock().await.insert(jid);
    }
}

#[async_trait]
impl ProtocolClient for MemoryClient {
    async fn send_message(
        &self,
        to: &Jid,
        message: OutgoingMessage,
    ) -> Result<MessageId, ClientError> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(ClientError::Send {
                jid: to.clone(),
                reason: "injected send failure".to_string(),
            });
        }
        {
            let failing = self.failing_mentions.lock().await;
            if message.mentions.iter().any(|m| failing.contains(m)) {
                return Err(ClientError::Send {
                    jid: to.clone(),
                    reason: "injected mention failure".to_string(),
                });
            }
        }

        self.calls.lock().await.push(RecordedCall::Send {
            to: to.clone(),
            text: message.text,
            mentions: message.mentions,
        });
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        Ok(format!("3EB0{id:012X}"))
    }

    async fn mark_read(&self, keys: &[MessageKey]) -> Result<(), ClientError> {
        if self.fail_mark_read.load(Ordering::SeqCst) {
            return Err(ClientError::MarkRead(
                "injected mark-read failure".to_string(),
            ));
        }
        self.calls.lock().await.push(RecordedCall::MarkRead {
            keys: keys.to_vec(),
        });
        Ok(())
    }
}

/// Connector handing out [`MemoryClient`]-backed connections. Each
/// `connect` opens a fresh event channel; `inject` feeds the most recent
/// one and `close_session` ends its stream.
#[derive(Default)]
pub struct MemoryConnector {
    client: Arc<MemoryClient>,
    current: Mutex<Option<mpsc::Sender<Event>>>,
    connect_count: AtomicU64,
    fail_connect: AtomicBool,
}

impl MemoryConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn client(&self) -> Arc<MemoryClient> {
        self.client.clone()
    }

    pub fn connect_count(&self) -> u64 {
        self.connect_count.load(Ordering::SeqCst)
    }

    pub fn set_fail_connect(&self, fail: bool) {
        self.fail_connect.store(fail, Ordering::SeqCst);
    }

    /// Delivers `event` into the current session. Returns false when no
    /// session is open or its receiver is gone.
    pub async fn inject(&self, event: Event) -> bool {
        match self.current.lock().await.as_ref() {
            Some(tx) => tx.send(event).await.is_ok(),
            None => false,
        }
    }

    /// Drops the current session's sender, ending its event stream the
    /// way a closing transport would.
    pub async fn close_session(&self) {
        self.current.lock().await.take();
    }
}

#[async_trait]
impl Connector for MemoryConnector {
    async fn connect(&self, options: ConnectOptions) -> Result<Connection, ClientError> {
        if self.fail_connect.load(Ordering::SeqCst) {
            return Err(ClientError::Connect(
                "injected connect failure".to_string(),
            ));
        }

        let (tx, rx) = mpsc::channel(64);
        *self.current.lock().await = Some(tx);
        let session = self.connect_count.fetch_add(1, Ordering::SeqCst) + 1;

        if options.log_suppression {
            debug!("Memory connector session #{session} established");
        } else {
            info!(
                "Memory connector session #{session} established (version {})",
                options.version
            );
        }

        Ok(Connection {
            client: self.client.clone(),
            events: rx,
        })
    }
}
