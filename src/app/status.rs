use super::context::BotContext;
use crate::types::message::IncomingMessage;
use log::{error, info};

/// Auto-views a status update by marking it read.
///
/// Never propagates a failure: a mark-read error is logged and handling
/// continues, and the same goes for a journal write failure.
pub async fn handle_status(ctx: &BotContext, msg: &IncomingMessage) {
    let name = msg.display_name();

    match ctx.client.mark_read(std::slice::from_ref(&msg.key)).await {
        Ok(()) => {
            if let Err(e) = ctx.journal.record_viewed_status(name) {
                error!("Failed to record viewed status from {name}: {e}");
            }
            info!("Viewed status from {name}");
        }
        Err(e) => error!("Error viewing status from {name}: {e}"),
    }
}
