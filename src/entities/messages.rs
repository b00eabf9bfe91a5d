use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Message row as stored in the record store's `messages` collection.
/// `card_style` and `card_shape` are kept raw here; resolution against the
/// catalog (with its default fallbacks) happens in the model conversion.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageRow {
    pub id: Uuid,
    pub recipient_id: Uuid,
    #[serde(default)]
    pub sender_id: Option<Uuid>,
    #[serde(default)]
    pub sender_name: String,
    pub message: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub card_style: Option<String>,
    #[serde(default)]
    pub card_shape: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload. `id` and `created_at` are generated by the store.
#[derive(Debug, Clone, Serialize)]
pub struct NewMessageRow {
    pub recipient_id: Uuid,
    pub sender_id: Uuid,
    pub sender_name: String,
    pub message: String,
    pub card_style: String,
    pub card_shape: String,
}

/// Partial update payload. Only the sender-mutable columns exist here, so
/// recipient, sender and timestamp immutability holds at the type level.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MessageChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_style: Option<String>,
}
