use crate::entities::messages::MessageRow;
use crate::models::cards::{CardShape, CardStyleId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MAX_MESSAGE_LENGTH: usize = 1000;

/// A stored message with its card identifiers resolved against the current
/// catalog: unknown styles become the default entry, a missing shape becomes
/// `square`. `sender_id` is absent on legacy anonymous sends.
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub message_id: Uuid,
    pub recipient_id: Uuid,
    pub sender_id: Option<Uuid>,
    pub sender_name: String,
    pub message: String,
    pub image_url: Option<String>,
    pub card_style: CardStyleId,
    pub card_shape: CardShape,
    pub created_at: DateTime<Utc>,
}

impl From<MessageRow> for Message {
    fn from(row: MessageRow) -> Self {
        Self {
            message_id: row.id,
            recipient_id: row.recipient_id,
            sender_id: row.sender_id,
            sender_name: row.sender_name,
            message: row.message,
            image_url: row.image_url,
            card_style: row
                .card_style
                .as_deref()
                .map(CardStyleId::parse)
                .unwrap_or_default(),
            card_shape: row
                .card_shape
                .as_deref()
                .map(CardShape::parse)
                .unwrap_or_default(),
            created_at: row.created_at,
        }
    }
}

/// Composer input, validated by the compose usecase before the single
/// insert.
#[derive(Debug, Clone)]
pub struct MessageDraft {
    pub recipient_id: Uuid,
    pub message: String,
    pub card_style: CardStyleId,
    pub card_shape: CardShape,
}

/// Sender-editable fields. Everything else on a message is immutable.
#[derive(Debug, Clone, Default)]
pub struct MessageEdit {
    pub message: Option<String>,
    pub card_style: Option<CardStyleId>,
}

#[derive(Debug, Deserialize)]
pub struct SendMessageArgs {
    pub recipient_id: Uuid,
    pub message: String,
    pub card_style: String,
    #[serde(default)]
    pub card_shape: Option<String>,
}

impl From<SendMessageArgs> for MessageDraft {
    fn from(args: SendMessageArgs) -> Self {
        Self {
            recipient_id: args.recipient_id,
            message: args.message,
            card_style: CardStyleId::parse(&args.card_style),
            card_shape: args
                .card_shape
                .as_deref()
                .map(CardShape::parse)
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct EditMessageArgs {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub card_style: Option<String>,
}

impl From<EditMessageArgs> for MessageEdit {
    fn from(args: EditMessageArgs) -> Self {
        Self {
            message: args.message,
            card_style: args.card_style.as_deref().map(CardStyleId::parse),
        }
    }
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: Message,
}

/// Message text validity shared by compose and edit: non-empty after
/// trimming, at most `MAX_MESSAGE_LENGTH` characters.
pub fn text_within_bounds(text: &str) -> bool {
    !text.trim().is_empty() && text.chars().count() <= MAX_MESSAGE_LENGTH
}
