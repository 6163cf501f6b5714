pub mod app;
pub mod auth;
pub mod bot;
pub mod client;
pub mod config;
pub mod journal;
pub mod pairing;
pub mod reconnect;
pub mod types;
pub mod utils;

pub use app::context::BotContext;
pub use bot::{Bot, BotBuilder};
pub use client::{ClientError, Connector, OutgoingMessage, ProtocolClient};
pub use config::BotConfig;
pub use types::events::Event;
pub use types::jid::Jid;

#[cfg(test)]
pub mod test_utils;
