use crate::common::context::Context;
use crate::common::error::{AppError, ServiceResult, unexpected};
use crate::models::accounts::{Account, Department, Role};
use crate::repositories::accounts;
use uuid::Uuid;

/// Recipient-picker filter; all set criteria must match.
#[derive(Debug, Default, Clone)]
pub struct RecipientFilter {
    pub department: Option<Department>,
    pub role: Option<Role>,
    pub query: Option<String>,
}

impl RecipientFilter {
    fn matches(&self, account: &Account) -> bool {
        if let Some(department) = self.department {
            if account.department != department {
                return false;
            }
        }
        if let Some(role) = self.role {
            if account.role != Some(role) {
                return false;
            }
        }
        if let Some(query) = &self.query {
            if !query.is_empty() {
                let name = account.display_name.as_deref().unwrap_or("");
                if !name.contains(query.as_str()) {
                    return false;
                }
            }
        }
        true
    }
}

/// Lists selectable recipients, grouped by department priority order and
/// alphabetical by display name within a department.
pub async fn list_recipients<C: Context>(
    ctx: &C,
    filter: &RecipientFilter,
) -> ServiceResult<Vec<Account>> {
    let records = match accounts::fetch_all(ctx).await {
        Ok(records) => records,
        Err(e) => return unexpected(e),
    };
    let mut recipients: Vec<Account> = records
        .into_iter()
        .map(Account::from)
        .filter(|account| filter.matches(account))
        .collect();
    recipients.sort_by(|a, b| {
        a.department
            .priority()
            .cmp(&b.department.priority())
            .then_with(|| {
                let a_name = a.display_name.as_deref().unwrap_or("");
                let b_name = b.display_name.as_deref().unwrap_or("");
                a_name.cmp(b_name)
            })
    });
    Ok(recipients)
}

/// Single recipient lookup backing the share-URL compose flow.
pub async fn fetch_recipient<C: Context>(ctx: &C, account_id: Uuid) -> ServiceResult<Account> {
    match accounts::fetch_one(ctx, account_id).await {
        Ok(Some(record)) => Ok(Account::from(record)),
        Ok(None) => Err(AppError::AccountsNotFound),
        Err(e) => unexpected(e),
    }
}
