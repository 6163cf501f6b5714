//! Shared fixtures for the test suite.

use crate::app::context::BotContext;
use crate::auth::{Credentials, SessionError, SessionStore};
use crate::client::memory::{MemoryClient, RecordedCall};
use crate::config::BotConfig;
use crate::journal::{DELETED_LOG_FILE, Journal, VIEWED_LOG_FILE};
use crate::pairing::PairingRenderer;
use crate::reconnect::ReconnectSupervisor;
use crate::types::jid::Jid;
use crate::types::message::{IncomingMessage, MessageKey, MessagePayload, MessageUpdate};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

/// Pairing renderer that records payloads instead of drawing them.
#[derive(Default)]
pub struct RecordingRenderer {
    pub rendered: Mutex<Vec<String>>,
}

impl PairingRenderer for RecordingRenderer {
    fn render(&self, code: &str, _compact: bool) {
        self.rendered.lock().unwrap().push(code.to_string());
    }
}

/// Session store keeping everything in memory.
#[derive(Default)]
pub struct MemorySessionStore {
    pub saved: Mutex<Vec<Credentials>>,
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<Credentials, SessionError> {
        Ok(Credentials::empty())
    }

    async fn save(&self, credentials: &Credentials) -> Result<(), SessionError> {
        self.saved.lock().unwrap().push(credentials.clone());
        Ok(())
    }
}

/// A fully wired [`BotContext`] over in-memory collaborators, with the
/// journal in a temp directory that lives as long as the fixture.
pub struct TestContext {
    pub ctx: BotContext,
    pub client: Arc<MemoryClient>,
    pub renderer: Arc<RecordingRenderer>,
    pub session_store: Arc<MemorySessionStore>,
    pub restart_rx: mpsc::UnboundedReceiver<()>,
    journal_dir: tempfile::TempDir,
}

impl TestContext {
    pub fn deleted_log(&self) -> String {
        std::fs::read_to_string(self.journal_dir.path().join(DELETED_LOG_FILE))
            .unwrap_or_default()
    }

    pub fn viewed_log(&self) -> String {
        std::fs::read_to_string(self.journal_dir.path().join(VIEWED_LOG_FILE))
            .unwrap_or_default()
    }
}

pub fn test_context() -> TestContext {
    let client = Arc::new(MemoryClient::new());
    let renderer = Arc::new(RecordingRenderer::default());
    let session_store = Arc::new(MemorySessionStore::default());
    let (supervisor, restart_rx) = ReconnectSupervisor::new(Duration::from_secs(5));
    let journal_dir = tempfile::tempdir().expect("tempdir");

    let ctx = BotContext {
        client: client.clone(),
        config: Arc::new(BotConfig::default()),
        journal: Arc::new(Journal::in_dir(journal_dir.path())),
        supervisor: Arc::new(supervisor),
        pairing: renderer.clone(),
        session_store: session_store.clone(),
    };

    TestContext {
        ctx,
        client,
        renderer,
        session_store,
        restart_rx,
        journal_dir,
    }
}

pub fn jid(s: &str) -> Jid {
    s.parse().expect("valid jid")
}

/// An inbound message from someone else, with no display name set.
pub fn incoming(chat: &str, id: &str, payload: Option<MessagePayload>) -> IncomingMessage {
    IncomingMessage {
        key: MessageKey::new(jid(chat), id, false),
        push_name: None,
        payload,
    }
}

pub fn update(chat: &str, id: &str, from_me: bool, payload: Option<MessagePayload>) -> MessageUpdate {
    MessageUpdate {
        key: MessageKey::new(jid(chat), id, from_me),
        payload,
    }
}

/// Polls until the client has recorded at least `n` calls.
pub async fn wait_for_calls(client: &MemoryClient, n: usize) -> Vec<RecordedCall> {
    for _ in 0..500 {
        let calls = client.calls().await;
        if calls.len() >= n {
            return calls;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("timed out waiting for {n} recorded calls");
}

/// Polls until `condition` holds.
pub async fn wait_until(what: &str, mut condition: impl FnMut() -> bool) {
    for _ in 0..500 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("timed out waiting for {what}");
}
