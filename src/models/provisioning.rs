use crate::models::accounts::{Department, Role};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One account to provision. Role assignment happens here rather than in
/// separate per-role operations.
#[derive(Debug, Clone)]
pub struct AccountSeed {
    pub display_name: String,
    pub email: String,
    pub department: Department,
    pub role: Option<Role>,
}

#[derive(Debug, Serialize)]
pub struct ProvisionOutcome {
    pub email: String,
    pub created: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AccountSeedArgs {
    pub display_name: String,
    pub email: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl From<AccountSeedArgs> for AccountSeed {
    fn from(args: AccountSeedArgs) -> Self {
        Self {
            display_name: args.display_name,
            email: args.email,
            department: args
                .department
                .as_deref()
                .map(Department::parse)
                .unwrap_or_default(),
            role: args.role.as_deref().and_then(Role::parse),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ProvisionArgs {
    pub accounts: Vec<AccountSeedArgs>,
}

#[derive(Serialize)]
pub struct ProvisionResponse {
    pub results: Vec<ProvisionOutcome>,
}
