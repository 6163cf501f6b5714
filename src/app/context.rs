use crate::auth::SessionStore;
use crate::client::ProtocolClient;
use crate::config::BotConfig;
use crate::journal::Journal;
use crate::pairing::PairingRenderer;
use crate::reconnect::ReconnectSupervisor;
use std::sync::Arc;

/// Everything the dispatcher and handlers work against, passed explicitly.
/// The live client is an owned handle here, never ambient process state.
pub struct BotContext {
    pub client: Arc<dyn ProtocolClient>,
    pub config: Arc<BotConfig>,
    pub journal: Arc<Journal>,
    pub supervisor: Arc<ReconnectSupervisor>,
    pub pairing: Arc<dyn PairingRenderer>,
    pub session_store: Arc<dyn SessionStore>,
}
