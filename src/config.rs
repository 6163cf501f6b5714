use crate::client::version::ProtocolVersion;
use crate::journal::{DELETED_LOG_FILE, VIEWED_LOG_FILE};
use crate::reconnect::DEFAULT_RECONNECT_DELAY;
use std::path::PathBuf;
use std::time::Duration;

/// Greeting tokens that trigger an auto-reply.
pub const DEFAULT_GREETINGS: [&str; 5] = ["hello", "hi", "hey", "mambo", "sasa"];

/// Default directory for persisted authentication state.
pub const DEFAULT_SESSION_DIR: &str = "./session";

/// Static configuration. Everything the reaction handlers decide on, apart
/// from the event payload itself, lives here.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub session_dir: PathBuf,
    pub greetings: Vec<String>,
    pub reconnect_delay: Duration,
    pub deleted_log: PathBuf,
    pub viewed_log: PathBuf,
    /// Skip the version lookup and connect with this version instead.
    pub version_override: Option<ProtocolVersion>,
    /// Silence the protocol client's own logging.
    pub log_suppression: bool,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            session_dir: PathBuf::from(DEFAULT_SESSION_DIR),
            greetings: DEFAULT_GREETINGS.iter().map(|g| g.to_string()).collect(),
            reconnect_delay: DEFAULT_RECONNECT_DELAY,
            deleted_log: PathBuf::from(DELETED_LOG_FILE),
            viewed_log: PathBuf::from(VIEWED_LOG_FILE),
            version_override: None,
            log_suppression: true,
        }
    }
}

impl BotConfig {
    /// Exact-match greeting check on the trimmed, lower-cased text.
    /// Superset phrases ("hello there") do not match.
    pub fn is_greeting(&self, text: &str) -> bool {
        let normalized = text.trim().to_lowercase();
        self.greetings.iter().any(|g| *g == normalized)
    }
}
