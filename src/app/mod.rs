//! Event dispatch and reaction handlers.
//!
//! The dispatcher performs structural classification only: event kind plus
//! presence of a payload. Interpreting the payload is left to the handler
//! each event is routed to. No cross-event state is held; every decision
//! is a function of the current event and the static configuration.

pub mod context;
pub mod deletion;
pub mod greeting;
pub mod membership;
pub mod status;

#[cfg(test)]
mod tests;

use crate::types::events::{DisconnectReason, Event};
use context::BotContext;
use log::{debug, error, info, warn};

/// Routes one event to its reaction handler. Handlers never propagate
/// failures; anything that goes wrong inside them is logged and the
/// dispatch loop continues with the next event.
pub async fn handle_event(event: Event, ctx: &BotContext) {
    match event {
        Event::Connected => {
            info!("Connected to WhatsApp successfully!");
            ctx.supervisor.note_connected().await;
        }
        Event::Disconnected { reason } => {
            let reason = DisconnectReason::describe(reason);
            warn!(
                "Connection closed (reason: {reason}). Reconnecting in {}s...",
                ctx.config.reconnect_delay.as_secs()
            );
            ctx.supervisor.schedule_restart().await;
        }
        Event::PairingQr { code } => {
            info!("Scan this QR code to connect WhatsApp:");
            ctx.pairing.render(&code, true);
        }
        Event::CredentialsUpdate(credentials) => {
            if let Err(e) = ctx.session_store.save(&credentials).await {
                error!("Failed to persist updated credentials: {e}");
            }
        }
        Event::MessagesUpdate(updates) => {
            for update in &updates {
                if update.payload.is_none() && !update.key.from_me {
                    deletion::handle_deleted_message(ctx, &update.key);
                }
            }
        }
        Event::MessagesUpsert(messages) => {
            let Some(msg) = messages.into_iter().next() else {
                return;
            };
            if msg.payload.is_none() {
                debug!("Ignoring upsert without payload in {}", msg.key.remote_jid);
                return;
            }
            if msg.key.remote_jid.is_status_broadcast() {
                status::handle_status(ctx, &msg).await;
            } else {
                greeting::handle_greeting(ctx, &msg).await;
            }
        }
        Event::GroupParticipantsUpdate(update) => {
            membership::handle_participants_update(ctx, &update).await;
        }
    }
}
