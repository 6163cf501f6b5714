pub mod events;
pub mod jid;
pub mod message;

pub use events::{DisconnectReason, Event, ParticipantAction, ParticipantsUpdate};
pub use jid::Jid;
pub use message::{IncomingMessage, MessageKey, MessagePayload, MessageUpdate};
