//! Conversation messages
//!
//! A `Message` is one WhatsApp turn as the webhook hands it over: direction,
//! free text, an optional audio transcription, and optional media metadata.
//! Media kind is inferred here so the rest of the pipeline only deals with
//! the typed [`MessageKind`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who sent the message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageDirection {
    /// From the lead to the agent
    Incoming,
    /// From the agent to the lead
    Outgoing,
}

impl MessageDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageDirection::Incoming => "incoming",
            MessageDirection::Outgoing => "outgoing",
        }
    }

    /// Speaker label used when rendering conversation history
    pub fn speaker_label(&self) -> &'static str {
        match self {
            MessageDirection::Incoming => "Cliente",
            MessageDirection::Outgoing => "Atendente",
        }
    }
}

/// Media kind of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    #[default]
    Text,
    Audio,
    Image,
    Video,
    Document,
}

impl MessageKind {
    /// Infer the kind from media metadata
    ///
    /// No URL means plain text. An explicit MIME hint wins over the URL
    /// extension; anything unrecognized is treated as a document.
    pub fn detect(media_url: Option<&str>, media_type: Option<&str>) -> Self {
        let Some(url) = media_url else {
            return MessageKind::Text;
        };

        if let Some(mime) = media_type {
            let mime = mime.to_lowercase();
            if mime.contains("audio") {
                return MessageKind::Audio;
            }
            if mime.contains("image") {
                return MessageKind::Image;
            }
            if mime.contains("video") {
                return MessageKind::Video;
            }
            return MessageKind::Document;
        }

        let ext = url
            .rsplit('.')
            .next()
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "ogg" | "oga" | "mp3" | "wav" => MessageKind::Audio,
            "jpg" | "jpeg" | "png" | "gif" | "webp" | "heic" => MessageKind::Image,
            "mp4" | "mov" | "avi" => MessageKind::Video,
            _ => MessageKind::Document,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Text => "text",
            MessageKind::Audio => "audio",
            MessageKind::Image => "image",
            MessageKind::Video => "video",
            MessageKind::Document => "document",
        }
    }
}

/// A single conversation turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub direction: MessageDirection,
    /// Raw text content (caption for media messages)
    pub content: String,
    /// Transcription when the message was audio
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcription: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub kind: MessageKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
}

impl Message {
    pub fn new(direction: MessageDirection, content: impl Into<String>) -> Self {
        Self {
            direction,
            content: content.into(),
            transcription: None,
            timestamp: Utc::now(),
            kind: MessageKind::Text,
            media_url: None,
        }
    }

    /// Create an incoming text message
    pub fn incoming(content: impl Into<String>) -> Self {
        Self::new(MessageDirection::Incoming, content)
    }

    /// Create an outgoing text message
    pub fn outgoing(content: impl Into<String>) -> Self {
        Self::new(MessageDirection::Outgoing, content)
    }

    /// Attach a transcription (audio messages)
    pub fn with_transcription(mut self, transcription: impl Into<String>) -> Self {
        self.transcription = Some(transcription.into());
        self.kind = MessageKind::Audio;
        self
    }

    /// Attach media metadata and infer the kind
    pub fn with_media(mut self, url: impl Into<String>, media_type: Option<&str>) -> Self {
        let url = url.into();
        self.kind = MessageKind::detect(Some(&url), media_type);
        self.media_url = Some(url);
        self
    }

    /// Text the interpreter should read: transcription when present,
    /// raw content otherwise
    pub fn effective_text(&self) -> &str {
        self.transcription.as_deref().unwrap_or(&self.content)
    }

    pub fn is_incoming(&self) -> bool {
        self.direction == MessageDirection::Incoming
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_detection_no_url() {
        assert_eq!(MessageKind::detect(None, None), MessageKind::Text);
        assert_eq!(MessageKind::detect(None, Some("audio/ogg")), MessageKind::Text);
    }

    #[test]
    fn test_kind_detection_mime_hint_wins() {
        let kind = MessageKind::detect(Some("https://cdn.example/file.bin"), Some("audio/ogg"));
        assert_eq!(kind, MessageKind::Audio);

        let kind = MessageKind::detect(Some("https://cdn.example/file.ogg"), Some("application/pdf"));
        assert_eq!(kind, MessageKind::Document);
    }

    #[test]
    fn test_kind_detection_by_extension() {
        assert_eq!(
            MessageKind::detect(Some("https://cdn.example/voice.oga"), None),
            MessageKind::Audio
        );
        assert_eq!(
            MessageKind::detect(Some("https://cdn.example/photo.HEIC"), None),
            MessageKind::Image
        );
        assert_eq!(
            MessageKind::detect(Some("https://cdn.example/tour.mp4"), None),
            MessageKind::Video
        );
        assert_eq!(
            MessageKind::detect(Some("https://cdn.example/contrato.pdf"), None),
            MessageKind::Document
        );
    }

    #[test]
    fn test_effective_text_prefers_transcription() {
        let msg = Message::incoming("").with_transcription("quero um apartamento no Centro");
        assert_eq!(msg.effective_text(), "quero um apartamento no Centro");
        assert_eq!(msg.kind, MessageKind::Audio);

        let msg = Message::incoming("tenho 300 mil");
        assert_eq!(msg.effective_text(), "tenho 300 mil");
    }
}
