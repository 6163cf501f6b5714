use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Server part of a regular user handle.
pub const DEFAULT_USER_SERVER: &str = "s.whatsapp.net";
/// Server part of a group handle.
pub const GROUP_SERVER: &str = "g.us";
/// Server part of broadcast handles, including the status feed.
pub const BROADCAST_SERVER: &str = "broadcast";
/// User part of the reserved status-broadcast handle.
pub const STATUS_BROADCAST_USER: &str = "status";

/// A WhatsApp conversation handle in `user@server` form.
///
/// Covers regular chats (`1234567890@s.whatsapp.net`), groups
/// (`123456789@g.us`) and the reserved status feed (`status@broadcast`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Jid {
    pub user: String,
    pub server: String,
}

impl Jid {
    pub fn new(user: impl Into<String>, server: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            server: server.into(),
        }
    }

    /// The reserved handle carrying ephemeral status updates.
    pub fn status_broadcast() -> Self {
        Self::new(STATUS_BROADCAST_USER, BROADCAST_SERVER)
    }

    pub fn is_group(&self) -> bool {
        self.server == GROUP_SERVER
    }

    pub fn is_status_broadcast(&self) -> bool {
        self.user == STATUS_BROADCAST_USER && self.server == BROADCAST_SERVER
    }

    /// The user part, used as the visible name in mention text.
    pub fn short_name(&self) -> &str {
        &self.user
    }
}

impl fmt::Display for Jid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.user, self.server)
    }
}

#[derive(Debug, Error)]
#[error("invalid jid: '{0}'")]
pub struct JidParseError(String);

impl FromStr for Jid {
    type Err = JidParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('@') {
            Some((user, server)) if !user.is_empty() && !server.is_empty() => {
                Ok(Self::new(user, server))
            }
            _ => Err(JidParseError(s.to_string())),
        }
    }
}
