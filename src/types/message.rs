use super::jid::Jid;

/// Identifies one message within a conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageKey {
    pub remote_jid: Jid,
    pub id: String,
    pub from_me: bool,
    /// Sender within a group chat; absent for direct messages.
    pub participant: Option<Jid>,
}

impl MessageKey {
    pub fn new(remote_jid: Jid, id: impl Into<String>, from_me: bool) -> Self {
        Self {
            remote_jid,
            id: id.into(),
            from_me,
            participant: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtendedText {
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaContent {
    pub caption: Option<String>,
}

/// The kind-specific body of a message. At most one of the fields is set
/// for well-formed messages; `text_content` tolerates malformed payloads
/// carrying several.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessagePayload {
    pub conversation: Option<String>,
    pub extended_text: Option<ExtendedText>,
    pub image: Option<MediaContent>,
    pub video: Option<MediaContent>,
}

impl MessagePayload {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            conversation: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn extended(text: impl Into<String>) -> Self {
        Self {
            extended_text: Some(ExtendedText {
                text: Some(text.into()),
            }),
            ..Default::default()
        }
    }

    pub fn image_caption(caption: impl Into<String>) -> Self {
        Self {
            image: Some(MediaContent {
                caption: Some(caption.into()),
            }),
            ..Default::default()
        }
    }

    pub fn video_caption(caption: impl Into<String>) -> Self {
        Self {
            video: Some(MediaContent {
                caption: Some(caption.into()),
            }),
            ..Default::default()
        }
    }

    /// Extracts the plain text of the message, if any.
    ///
    /// Precedence: conversation text, extended text, image caption, video
    /// caption. The first non-empty value wins.
    pub fn text_content(&self) -> Option<&str> {
        fn non_empty(text: &Option<String>) -> Option<&str> {
            text.as_deref().filter(|t| !t.is_empty())
        }

        non_empty(&self.conversation)
            .or_else(|| self.extended_text.as_ref().and_then(|e| non_empty(&e.text)))
            .or_else(|| self.image.as_ref().and_then(|m| non_empty(&m.caption)))
            .or_else(|| self.video.as_ref().and_then(|m| non_empty(&m.caption)))
    }
}

/// One inbound message as delivered by a message-upsert event.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub key: MessageKey,
    /// Display name the sender advertises; not verified.
    pub push_name: Option<String>,
    pub payload: Option<MessagePayload>,
}

impl IncomingMessage {
    /// The sender's display name, falling back to `"User"` when absent or
    /// empty.
    pub fn display_name(&self) -> &str {
        self.push_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or("User")
    }
}

/// One entry of a message-update event. An update without a payload for a
/// message we did not send is the deletion signal.
#[derive(Debug, Clone)]
pub struct MessageUpdate {
    pub key: MessageKey,
    pub payload: Option<MessagePayload>,
}
