use super::jid::Jid;
use super::message::{IncomingMessage, MessageUpdate};
use crate::auth::Credentials;
use std::fmt;

/// Events emitted by the protocol client for the reaction layer to consume.
#[derive(Debug, Clone)]
pub enum Event {
    /// A pairing payload to display for a companion device to scan.
    PairingQr { code: String },
    /// The connection reached the open state.
    Connected,
    /// The connection closed. `reason` carries the status code when the
    /// transport reported one.
    Disconnected { reason: Option<DisconnectReason> },
    /// The authentication material changed and should be persisted.
    CredentialsUpdate(Credentials),
    /// A batch of newly inserted messages.
    MessagesUpsert(Vec<IncomingMessage>),
    /// A batch of updates to already-delivered messages.
    MessagesUpdate(Vec<MessageUpdate>),
    /// A group-membership change.
    GroupParticipantsUpdate(ParticipantsUpdate),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipantAction {
    Add,
    Remove,
}

/// A membership change in one group. Participant order is preserved as
/// delivered and announcements are made in that order.
#[derive(Debug, Clone)]
pub struct ParticipantsUpdate {
    pub group: Jid,
    pub action: ParticipantAction,
    pub participants: Vec<Jid>,
}

/// Disconnect status codes as reported by the server on stream close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisconnectReason {
    LoggedOut,
    Forbidden,
    ConnectionLost,
    ConnectionClosed,
    ConnectionReplaced,
    BadSession,
    RestartRequired,
    Code(u16),
}

impl DisconnectReason {
    pub fn from_code(code: u16) -> Self {
        match code {
            401 => Self::LoggedOut,
            403 => Self::Forbidden,
            408 => Self::ConnectionLost,
            428 => Self::ConnectionClosed,
            440 => Self::ConnectionReplaced,
            500 => Self::BadSession,
            515 => Self::RestartRequired,
            other => Self::Code(other),
        }
    }

    /// Log text for an optional reason; an absent code reads `"unknown"`.
    pub fn describe(reason: Option<Self>) -> String {
        reason
            .map(|r| r.to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }

    pub fn code(&self) -> u16 {
        match self {
            Self::LoggedOut => 401,
            Self::Forbidden => 403,
            Self::ConnectionLost => 408,
            Self::ConnectionClosed => 428,
            Self::ConnectionReplaced => 440,
            Self::BadSession => 500,
            Self::RestartRequired => 515,
            Self::Code(code) => *code,
        }
    }
}

impl fmt::Display for DisconnectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoggedOut => write!(f, "logged out"),
            Self::Forbidden => write!(f, "forbidden"),
            Self::ConnectionLost => write!(f, "connection lost"),
            Self::ConnectionClosed => write!(f, "connection closed"),
            Self::ConnectionReplaced => write!(f, "connection replaced"),
            Self::BadSession => write!(f, "bad session"),
            Self::RestartRequired => write!(f, "restart required"),
            Self::Code(code) => write!(f, "status code {code}"),
        }
    }
}
