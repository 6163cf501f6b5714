//! Bot assembly and run loop.

use crate::app::{self, context::BotContext};
use crate::auth::{FileSessionStore, SessionStore};
use crate::client::http::UreqHttpClient;
use crate::client::version::{FALLBACK_VERSION, VersionResolver, WebVersionResolver};
use crate::client::{ConnectOptions, Connector};
use crate::config::BotConfig;
use crate::journal::Journal;
use crate::pairing::{PairingRenderer, QrTerminalRenderer};
use crate::reconnect::ReconnectSupervisor;
use anyhow::{Context as _, Result, anyhow, bail};
use log::{info, warn};
use std::sync::Arc;

pub struct Bot {
    config: Arc<BotConfig>,
    connector: Arc<dyn Connector>,
    session_store: Arc<dyn SessionStore>,
    version_resolver: Arc<dyn VersionResolver>,
    pairing: Arc<dyn PairingRenderer>,
    journal: Arc<Journal>,
}

impl std::fmt::Debug for Bot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bot").finish_non_exhaustive()
    }
}

impl Bot {
    pub fn builder() -> BotBuilder {
        BotBuilder::default()
    }

    /// Runs the bot until the restart channel breaks. Each session drains
    /// its event stream to completion; the supervisor decides when the
    /// next connection attempt starts.
    pub async fn run(&self) -> Result<()> {
        let (supervisor, mut restart_rx) = ReconnectSupervisor::new(self.config.reconnect_delay);
        let supervisor = Arc::new(supervisor);

        loop {
            if let Err(e) = self.run_session(supervisor.clone()).await {
                warn!("Session ended with error: {e:#}");
                supervisor.schedule_restart().await;
            } else if !supervisor.restart_pending().await {
                // The stream ended without a disconnect event; treat it
                // the same as a reported close.
                warn!("Event stream closed without a disconnect event; scheduling restart");
                supervisor.schedule_restart().await;
            }

            if restart_rx.recv().await.is_none() {
                bail!("reconnect channel closed");
            }
            info!("Restarting connection...");
        }
    }

    async fn run_session(&self, supervisor: Arc<ReconnectSupervisor>) -> Result<()> {
        let credentials = self
            .session_store
            .load()
            .await
            .context("failed to load session state")?;
        if credentials.is_registered() {
            info!("Restoring existing session");
        } else {
            info!("No saved session; pairing will be required");
        }

        let version = match self.config.version_override {
            Some(version) => version,
            None => match self.version_resolver.fetch_latest_version().await {
                Ok(version) => {
                    info!("Using protocol version {version}");
                    version
                }
                Err(e) => {
                    warn!(
                        "Failed to fetch latest protocol version: {e}; falling back to {FALLBACK_VERSION}"
                    );
                    FALLBACK_VERSION
                }
            },
        };

        let connection = self
            .connector
            .connect(ConnectOptions {
                credentials,
                version,
                log_suppression: self.config.log_suppression,
            })
            .await
            .context("failed to establish connection")?;

        let ctx = BotContext {
            client: connection.client,
            config: self.config.clone(),
            journal: self.journal.clone(),
            supervisor,
            pairing: self.pairing.clone(),
            session_store: self.session_store.clone(),
        };

        info!("WhatsApp bot is now running with all features enabled!");

        // One event at a time, in delivery order.
        let mut events = connection.events;
        while let Some(event) = events.recv().await {
            app::handle_event(event, &ctx).await;
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct BotBuilder {
    config: Option<BotConfig>,
    connector: Option<Arc<dyn Connector>>,
    session_store: Option<Arc<dyn SessionStore>>,
    version_resolver: Option<Arc<dyn VersionResolver>>,
    pairing: Option<Arc<dyn PairingRenderer>>,
}

impl BotBuilder {
    pub fn with_config(mut self, config: BotConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_connector(mut self, connector: Arc<dyn Connector>) -> Self {
        self.connector = Some(connector);
        self
    }

    pub fn with_session_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.session_store = Some(store);
        self
    }

    pub fn with_version_resolver(mut self, resolver: impl VersionResolver + 'static) -> Self {
        self.version_resolver = Some(Arc::new(resolver));
        self
    }

    pub fn with_pairing_renderer(mut self, renderer: impl PairingRenderer + 'static) -> Self {
        self.pairing = Some(Arc::new(renderer));
        self
    }

    /// Builds the bot, filling unset seams with the file session store,
    /// the web version resolver and the terminal QR renderer.
    pub fn build(self) -> Result<Bot> {
        let config = self.config.unwrap_or_default();
        let connector = self.connector.ok_or_else(|| anyhow!("Connector is required"))?;
        let session_store = self
            .session_store
            .unwrap_or_else(|| Arc::new(FileSessionStore::new(&config.session_dir)));
        let version_resolver = self
            .version_resolver
            .unwrap_or_else(|| Arc::new(WebVersionResolver::new(Arc::new(UreqHttpClient))));
        let pairing = self.pairing.unwrap_or_else(|| Arc::new(QrTerminalRenderer));
        let journal = Arc::new(Journal::new(
            config.deleted_log.clone(),
            config.viewed_log.clone(),
        ));

        Ok(Bot {
            config: Arc::new(config),
            connector,
            session_store,
            version_resolver,
            pairing,
            journal,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::memory::{MemoryConnector, RecordedCall};
    use crate::client::version::StaticVersionResolver;
    use crate::test_utils::{MemorySessionStore, RecordingRenderer, wait_for_calls, wait_until};
    use crate::types::events::{DisconnectReason, Event};
    use crate::types::message::{IncomingMessage, MessageKey, MessagePayload};
    use std::time::Duration;

    #[test]
    fn test_builder_requires_connector() {
        let result = Bot::builder().build();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Connector is required"));
    }

    #[tokio::test]
    async fn test_run_loop_dispatches_and_reconnects() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = BotConfig {
            session_dir: dir.path().join("session"),
            deleted_log: dir.path().join("deleted_msgs.txt"),
            viewed_log: dir.path().join("viewed_status.txt"),
            reconnect_delay: Duration::from_millis(50),
            ..Default::default()
        };

        let connector = Arc::new(MemoryConnector::new());
        let client = connector.client();
        let bot = Bot::builder()
            .with_config(config)
            .with_connector(connector.clone())
            .with_session_store(Arc::new(MemorySessionStore::default()))
            .with_version_resolver(StaticVersionResolver::new((2, 3000, 1)))
            .with_pairing_renderer(RecordingRenderer::default())
            .build()
            .expect("build bot");

        let run = tokio::spawn(async move { bot.run().await });

        wait_until("first connection", || connector.connect_count() >= 1).await;

        // A greeting flows through dispatch to the client.
        let chat: crate::Jid = "1234567890@s.whatsapp.net".parse().unwrap();
        connector
            .inject(Event::MessagesUpsert(vec![IncomingMessage {
                key: MessageKey::new(chat.clone(), "MSG1", false),
                push_name: Some("Alice".to_string()),
                payload: Some(MessagePayload::text("hello")),
            }]))
            .await;
        let calls = wait_for_calls(&client, 1).await;
        assert!(matches!(&calls[0], RecordedCall::Send { to, .. } if *to == chat));

        // A disconnect followed by stream close triggers one reconnect.
        connector
            .inject(Event::Disconnected {
                reason: Some(DisconnectReason::ConnectionLost),
            })
            .await;
        connector.close_session().await;
        wait_until("reconnect", || connector.connect_count() >= 2).await;

        run.abort();
    }

    #[tokio::test]
    async fn test_connect_failure_is_retried() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = BotConfig {
            session_dir: dir.path().join("session"),
            deleted_log: dir.path().join("deleted_msgs.txt"),
            viewed_log: dir.path().join("viewed_status.txt"),
            reconnect_delay: Duration::from_millis(20),
            ..Default::default()
        };

        let connector = Arc::new(MemoryConnector::new());
        connector.set_fail_connect(true);
        let bot = Bot::builder()
            .with_config(config)
            .with_connector(connector.clone())
            .with_session_store(Arc::new(MemorySessionStore::default()))
            .with_version_resolver(StaticVersionResolver::new((2, 3000, 1)))
            .with_pairing_renderer(RecordingRenderer::default())
            .build()
            .expect("build bot");

        let run = tokio::spawn(async move { bot.run().await });

        // Let the first attempt fail, then allow the retry to succeed.
        tokio::time::sleep(Duration::from_millis(10)).await;
        connector.set_fail_connect(false);
        wait_until("retried connection", || connector.connect_count() >= 1).await;

        run.abort();
    }
}
