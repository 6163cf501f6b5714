use super::context::BotContext;
use crate::types::message::MessageKey;
use log::{error, info};

/// Records a deleted message in the journal and echoes the line to the
/// console log. The append is guarded: a write failure is logged and must
/// not take down the dispatch loop.
pub fn handle_deleted_message(ctx: &BotContext, key: &MessageKey) {
    match ctx.journal.record_deleted_message(&key.remote_jid) {
        Ok(line) => info!("{line}"),
        Err(e) => error!(
            "Failed to record deleted message in {}: {e}",
            key.remote_jid
        ),
    }
}
