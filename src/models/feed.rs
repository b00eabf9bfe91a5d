use crate::models::accounts::{Department, PeerProfile, Role};
use crate::models::cards::{CardShape, CardStyleId};
use crate::models::messages::Message;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Inbound render model: a message merged with its sender's enrichment.
/// `sender_department` is always set — the resolved value or the
/// unclassified default, never absent.
#[derive(Debug, Clone, Serialize)]
pub struct FeedMessage {
    pub message_id: Uuid,
    pub sender_id: Option<Uuid>,
    pub sender_name: String,
    pub sender_avatar_url: Option<String>,
    pub sender_department: Department,
    pub message: String,
    pub image_url: Option<String>,
    pub card_style: CardStyleId,
    pub card_shape: CardShape,
    pub created_at: DateTime<Utc>,
}

impl FeedMessage {
    pub fn merge(message: Message, profile: Option<&PeerProfile>) -> Self {
        Self {
            message_id: message.message_id,
            sender_id: message.sender_id,
            sender_name: message.sender_name,
            sender_avatar_url: profile.and_then(|p| p.avatar_url.clone()),
            sender_department: profile.map(|p| p.department).unwrap_or_default(),
            message: message.message,
            image_url: message.image_url,
            card_style: message.card_style,
            card_shape: message.card_shape,
            created_at: message.created_at,
        }
    }
}

/// Feed ordering. Recency is the default; the department mode groups by the
/// fixed department priority order and stays recency-sorted within a group.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FeedSort {
    #[default]
    Recency,
    Department,
}

impl FeedSort {
    pub fn parse(value: &str) -> FeedSort {
        match value {
            "department" => FeedSort::Department,
            _ => FeedSort::Recency,
        }
    }
}

/// Outbound render model: a sent message merged with its recipient's
/// enrichment.
#[derive(Debug, Clone, Serialize)]
pub struct SentMessage {
    pub message_id: Uuid,
    pub recipient_id: Uuid,
    pub recipient_name: Option<String>,
    pub recipient_avatar_url: Option<String>,
    pub recipient_department: Department,
    pub recipient_role: Option<Role>,
    pub message: String,
    pub image_url: Option<String>,
    pub card_style: CardStyleId,
    pub card_shape: CardShape,
    pub created_at: DateTime<Utc>,
}

impl SentMessage {
    pub fn merge(message: Message, profile: Option<&PeerProfile>) -> Self {
        Self {
            message_id: message.message_id,
            recipient_id: message.recipient_id,
            recipient_name: profile.and_then(|p| p.display_name.clone()),
            recipient_avatar_url: profile.and_then(|p| p.avatar_url.clone()),
            recipient_department: profile.map(|p| p.department).unwrap_or_default(),
            recipient_role: profile.and_then(|p| p.role),
            message: message.message,
            image_url: message.image_url,
            card_style: message.card_style,
            card_shape: message.card_shape,
            created_at: message.created_at,
        }
    }
}

/// Sent-list ordering: send date (default) or recipient display name.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SentSort {
    #[default]
    Date,
    Name,
}

impl SentSort {
    pub fn parse(value: &str) -> SentSort {
        match value {
            "name" => SentSort::Name,
            _ => SentSort::Date,
        }
    }
}

/// Sent-list filter; all set criteria must match.
#[derive(Debug, Default, Clone)]
pub struct SentFilter {
    pub department: Option<Department>,
    pub role: Option<Role>,
    pub query: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FeedArgs {
    #[serde(default)]
    pub sort: Option<String>,
}

#[derive(Serialize)]
pub struct FeedResponse {
    pub messages: Vec<FeedMessage>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SentArgs {
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
}

#[derive(Serialize)]
pub struct SentResponse {
    pub messages: Vec<SentMessage>,
}

impl SentFilter {
    pub fn matches(&self, message: &SentMessage) -> bool {
        if let Some(department) = self.department {
            if message.recipient_department != department {
                return false;
            }
        }
        if let Some(role) = self.role {
            if message.recipient_role != Some(role) {
                return false;
            }
        }
        if let Some(query) = &self.query {
            if !query.is_empty() {
                let name = message.recipient_name.as_deref().unwrap_or("");
                if !name.contains(query.as_str()) {
                    return false;
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::messages::MessageRow;
    use uuid::Uuid;

    #[test]
    fn unresolved_sender_serializes_the_unclassified_literal() {
        let row = MessageRow {
            id: Uuid::new_v4(),
            recipient_id: Uuid::new_v4(),
            sender_id: Some(Uuid::new_v4()),
            sender_name: "Anonymous Fan".to_owned(),
            message: "good luck!".to_owned(),
            image_url: None,
            card_style: None,
            card_shape: None,
            created_at: Utc::now(),
        };
        let merged = FeedMessage::merge(Message::from(row), None);
        let json = serde_json::to_value(&merged).unwrap();
        assert_eq!(json["sender_department"], "unclassified");
        assert!(json["sender_avatar_url"].is_null());
        assert_eq!(json["card_style"], "crimson");
        assert_eq!(json["card_shape"], "square");
    }
}
