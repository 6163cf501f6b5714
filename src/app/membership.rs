use super::context::BotContext;
use crate::client::{ClientError, OutgoingMessage};
use crate::types::events::{ParticipantAction, ParticipantsUpdate};
use crate::types::jid::Jid;
use log::{error, info};

/// Outcome of announcing one membership batch.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub delivered: Vec<Jid>,
    pub failed: Vec<(Jid, ClientError)>,
}

impl BatchReport {
    pub fn all_delivered(&self) -> bool {
        self.failed.is_empty()
    }
}

fn announcement(action: ParticipantAction, participant: &Jid) -> OutgoingMessage {
    let short = participant.short_name();
    let text = match action {
        ParticipantAction::Add => format!("🎉 Welcome @{short} to the group!"),
        ParticipantAction::Remove => format!("👋 Goodbye @{short}! We'll miss you!"),
    };
    OutgoingMessage::mentioning(text, participant.clone())
}

/// Sends one mention-tagged announcement per affected participant, in
/// list order. Each send is isolated: a failure is recorded in the batch
/// report and the remaining participants are still announced.
pub async fn handle_participants_update(
    ctx: &BotContext,
    update: &ParticipantsUpdate,
) -> BatchReport {
    let mut report = BatchReport::default();

    for participant in &update.participants {
        let message = announcement(update.action, participant);
        match ctx.client.send_message(&update.group, message).await {
            Ok(_) => {
                match update.action {
                    ParticipantAction::Add => info!("Welcomed {}", participant.short_name()),
                    ParticipantAction::Remove => {
                        info!("Said goodbye to {}", participant.short_name())
                    }
                }
                report.delivered.push(participant.clone());
            }
            Err(e) => {
                error!(
                    "Failed to announce {} in {}: {e}",
                    participant.short_name(),
                    update.group
                );
                report.failed.push((participant.clone(), e));
            }
        }
    }

    if !report.all_delivered() {
        error!(
            "Membership announcements in {}: {} delivered, {} failed",
            update.group,
            report.delivered.len(),
            report.failed.len()
        );
    }

    report
}
