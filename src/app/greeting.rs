use super::context::BotContext;
use crate::client::OutgoingMessage;
use crate::types::message::IncomingMessage;
use log::{error, info};

pub(crate) fn reply_text(name: &str) -> String {
    format!("Hello {name}! 👋 Hope you're doing great!")
}

/// Replies to messages whose whole text is one of the configured greeting
/// tokens. Matching is exact on the trimmed, lower-cased text; "hello
/// there" is not a greeting.
pub async fn handle_greeting(ctx: &BotContext, msg: &IncomingMessage) {
    if msg.key.from_me {
        return;
    }

    let Some(text) = msg.payload.as_ref().and_then(|p| p.text_content()) else {
        return;
    };
    if !ctx.config.is_greeting(text) {
        return;
    }

    let name = msg.display_name();
    let reply = OutgoingMessage::text(reply_text(name));
    match ctx.client.send_message(&msg.key.remote_jid, reply).await {
        Ok(_) => info!("Replied to greeting from {name}"),
        Err(e) => error!("Failed to reply to greeting from {name}: {e}"),
    }
}
