use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account record as the directory provider returns it. The metadata blob is
/// whatever was written at provisioning time; it is validated into the typed
/// domain model exactly once, at the model boundary.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountRecord {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: MetadataRecord,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetadataRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Payload for the provider's admin create-user endpoint. Accounts are
/// provisioned pre-confirmed; the temp password is rotated by the user.
#[derive(Debug, Serialize)]
pub struct NewAccountRecord {
    pub email: String,
    pub password: String,
    pub email_confirm: bool,
    pub user_metadata: MetadataRecord,
}
