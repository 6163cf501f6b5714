use crate::app::handle_event;
use crate::journal::Journal;
use crate::test_utils::{test_context, update};
use crate::types::events::Event;
use crate::types::message::MessagePayload;
use std::sync::Arc;

#[tokio::test]
async fn test_deletion_signal_logs_exactly_one_line() {
    let tc = test_context();
    let updates = vec![update("123456789@g.us", "MSG1", false, None)];

    handle_event(Event::MessagesUpdate(updates), &tc.ctx).await;

    let deleted = tc.deleted_log();
    assert_eq!(deleted.lines().count(), 1);
    assert!(deleted.contains("Deleted message in 123456789@g.us"));
}

#[tokio::test]
async fn test_updates_with_body_or_self_origin_are_ignored() {
    let tc = test_context();
    let updates = vec![
        // Edited message, body still present.
        update(
            "123456789@g.us",
            "MSG1",
            false,
            Some(MessagePayload::text("edited")),
        ),
        // Our own deletion.
        update("123456789@g.us", "MSG2", true, None),
    ];

    handle_event(Event::MessagesUpdate(updates), &tc.ctx).await;

    assert!(tc.deleted_log().is_empty());
}

#[tokio::test]
async fn test_every_deletion_in_batch_is_logged() {
    let tc = test_context();
    let mut group_deletion = update("123456789@g.us", "MSG3", false, None);
    group_deletion.key.participant = Some("1111111111@s.whatsapp.net".parse().unwrap());
    let updates = vec![
        update("1234567890@s.whatsapp.net", "MSG1", false, None),
        update("123456789@g.us", "MSG2", false, Some(MessagePayload::text("kept"))),
        group_deletion,
    ];

    handle_event(Event::MessagesUpdate(updates), &tc.ctx).await;

    let deleted = tc.deleted_log();
    assert_eq!(deleted.lines().count(), 2);
    assert!(deleted.contains("1234567890@s.whatsapp.net"));
    assert!(deleted.contains("123456789@g.us"));
}

#[tokio::test]
async fn test_journal_write_failure_is_swallowed() {
    let mut tc = test_context();
    // Point the journal at a directory that does not exist.
    tc.ctx.journal = Arc::new(Journal::new(
        "/nonexistent/deleted_msgs.txt",
        "/nonexistent/viewed_status.txt",
    ));
    let updates = vec![update("123456789@g.us", "MSG1", false, None)];

    // Must not panic; the append error is logged and dispatch continues.
    handle_event(Event::MessagesUpdate(updates), &tc.ctx).await;
}
