use crate::entities::accounts::{AccountRecord, MetadataRecord};
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

/// The ten organizational units, in display priority order, plus the
/// `unclassified` sentinel used whenever a profile carries no department
/// (or an unknown one). The declaration order is the grouping order used by
/// the department feed sort and the recipient picker.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Department {
    ExecutiveBoard,
    Operations,
    Performance,
    Development,
    PublicRelations,
    Finance,
    ParticipatingGroups,
    ExternalAffairs,
    Production,
    GeneralAffairs,
    #[default]
    Unclassified,
}

impl Department {
    pub const UNITS: [Department; 10] = [
        Department::ExecutiveBoard,
        Department::Operations,
        Department::Performance,
        Department::Development,
        Department::PublicRelations,
        Department::Finance,
        Department::ParticipatingGroups,
        Department::ExternalAffairs,
        Department::Production,
        Department::GeneralAffairs,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Department::ExecutiveBoard => "executive_board",
            Department::Operations => "operations",
            Department::Performance => "performance",
            Department::Development => "development",
            Department::PublicRelations => "public_relations",
            Department::Finance => "finance",
            Department::ParticipatingGroups => "participating_groups",
            Department::ExternalAffairs => "external_affairs",
            Department::Production => "production",
            Department::GeneralAffairs => "general_affairs",
            Department::Unclassified => "unclassified",
        }
    }

    /// Total parse: anything unknown is `Unclassified`, never an error.
    pub fn parse(value: &str) -> Department {
        Department::UNITS
            .into_iter()
            .find(|unit| unit.as_str() == value)
            .unwrap_or(Department::Unclassified)
    }

    /// Sort key for department grouping; unclassified always sorts last.
    pub const fn priority(&self) -> u16 {
        match self {
            Department::ExecutiveBoard => 0,
            Department::Operations => 1,
            Department::Performance => 2,
            Department::Development => 3,
            Department::PublicRelations => 4,
            Department::Finance => 5,
            Department::ParticipatingGroups => 6,
            Department::ExternalAffairs => 7,
            Department::Production => 8,
            Department::GeneralAffairs => 9,
            Department::Unclassified => 999,
        }
    }
}

impl Serialize for Department {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Elevated designations granting access to restricted card styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Executive,
    ViceDirector,
    SectionChief,
}

impl Role {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Executive => "executive",
            Role::ViceDirector => "vice_director",
            Role::SectionChief => "section_chief",
        }
    }

    pub fn parse(value: &str) -> Option<Role> {
        match value {
            "executive" => Some(Role::Executive),
            "vice_director" => Some(Role::ViceDirector),
            "section_chief" => Some(Role::SectionChief),
            _ => None,
        }
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A directory account with its metadata validated at the boundary.
/// Unknown departments degrade to `Unclassified`, unknown roles to `None`;
/// nothing downstream re-inspects the raw metadata blob.
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    pub account_id: Uuid,
    pub email: String,
    pub display_name: Option<String>,
    pub department: Department,
    pub role: Option<Role>,
    pub avatar_url: Option<String>,
}

impl From<AccountRecord> for Account {
    fn from(record: AccountRecord) -> Self {
        let metadata = record.user_metadata;
        Self {
            account_id: record.id,
            email: record.email.unwrap_or_default(),
            display_name: metadata.display_name.filter(|name| !name.is_empty()),
            department: metadata
                .department
                .as_deref()
                .map(Department::parse)
                .unwrap_or_default(),
            role: metadata.role.as_deref().and_then(Role::parse),
            avatar_url: metadata.avatar_url.filter(|url| !url.is_empty()),
        }
    }
}

impl Account {
    /// Name shown in recipient listings: display name, else email.
    pub fn visible_name(&self) -> &str {
        match &self.display_name {
            Some(name) => name,
            None => &self.email,
        }
    }

    /// Metadata blob representing this account's current profile, used as
    /// the base for partial profile updates.
    pub fn to_metadata(&self) -> MetadataRecord {
        MetadataRecord {
            display_name: self.display_name.clone(),
            department: (self.department != Department::Unclassified)
                .then(|| self.department.as_str().to_owned()),
            role: self.role.map(|role| role.as_str().to_owned()),
            avatar_url: self.avatar_url.clone(),
        }
    }
}

/// Profile attributes attached to a message counterparty for display:
/// the sender on the inbound feed, the recipient on the sent list.
#[derive(Debug, Clone)]
pub struct PeerProfile {
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub department: Department,
    pub role: Option<Role>,
}

impl From<Account> for PeerProfile {
    fn from(account: Account) -> Self {
        let fallback_name = (!account.email.is_empty()).then(|| account.email.clone());
        Self {
            display_name: account.display_name.or(fallback_name),
            avatar_url: account.avatar_url,
            department: account.department,
            role: account.role,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RecipientsArgs {
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub q: Option<String>,
}

#[derive(Serialize)]
pub struct RecipientsResponse {
    pub recipients: Vec<Account>,
}

#[derive(Serialize)]
pub struct AccountResponse {
    pub account: Account,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProfileUpdateArgs {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
}
