use crate::common::context::Context;
use crate::common::error::{AppError, ServiceResult};
use crate::entities::accounts::{MetadataRecord, NewAccountRecord};
use crate::models::accounts::{Account, Department, Role};
use crate::models::provisioning::{AccountSeed, ProvisionOutcome};
use crate::repositories::accounts;
use rand::Rng;
use rand::distr::Alphanumeric;

const TEMP_PASSWORD_LENGTH: usize = 12;

/// Bulk account creation, restricted to executives. Each row gets a fresh
/// temp password; a failing row is reported and does not abort the batch.
pub async fn bulk_create<C: Context>(
    ctx: &C,
    caller: &Account,
    seeds: Vec<AccountSeed>,
) -> ServiceResult<Vec<ProvisionOutcome>> {
    if caller.role != Some(Role::Executive) {
        return Err(AppError::ProvisioningUnauthorized);
    }

    let mut outcomes = Vec::with_capacity(seeds.len());
    for seed in seeds {
        let temp_password = generate_temp_password();
        let record = NewAccountRecord {
            email: seed.email.clone(),
            password: temp_password.clone(),
            email_confirm: true,
            user_metadata: MetadataRecord {
                display_name: Some(seed.display_name),
                department: (seed.department != Department::Unclassified)
                    .then(|| seed.department.as_str().to_owned()),
                role: seed.role.map(|role| role.as_str().to_owned()),
                avatar_url: None,
            },
        };
        match accounts::create(ctx, &record).await {
            Ok(created) => outcomes.push(ProvisionOutcome {
                email: seed.email,
                created: true,
                account_id: Some(created.id),
                temp_password: Some(temp_password),
                error: None,
            }),
            Err(e) => {
                tracing::warn!(email = %seed.email, "provisioning account failed: {e}");
                outcomes.push(ProvisionOutcome {
                    email: seed.email,
                    created: false,
                    account_id: None,
                    temp_password: None,
                    error: Some(e.to_string()),
                });
            }
        }
    }
    Ok(outcomes)
}

fn generate_temp_password() -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(TEMP_PASSWORD_LENGTH)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::directory::Directory;
    use crate::common::testing::{TestContext, account};

    fn seeds() -> Vec<AccountSeed> {
        vec![
            AccountSeed {
                display_name: "Mayu".to_owned(),
                email: "mayu@example.jp".to_owned(),
                department: Department::ExecutiveBoard,
                role: Some(Role::Executive),
            },
            AccountSeed {
                display_name: "Ginpei".to_owned(),
                email: "ginpei@example.jp".to_owned(),
                department: Department::ParticipatingGroups,
                role: None,
            },
        ]
    }

    #[tokio::test]
    async fn non_executive_caller_is_rejected() {
        let ctx = TestContext::default();
        let caller = account("Chief", Department::Finance, Some(Role::SectionChief));
        let result = bulk_create(&ctx, &caller, seeds()).await;
        assert!(matches!(result, Err(AppError::ProvisioningUnauthorized)));
    }

    #[tokio::test]
    async fn executive_provisions_accounts_with_temp_passwords() {
        let ctx = TestContext::default();
        let caller = account("Boss", Department::ExecutiveBoard, Some(Role::Executive));

        let outcomes = bulk_create(&ctx, &caller, seeds()).await.unwrap();
        assert_eq!(outcomes.len(), 2);
        for outcome in &outcomes {
            assert!(outcome.created);
            assert_eq!(
                outcome.temp_password.as_ref().unwrap().len(),
                TEMP_PASSWORD_LENGTH
            );
        }

        let listed = ctx.directory.list_accounts().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(
            listed[0].user_metadata.department.as_deref(),
            Some("executive_board")
        );
        assert_eq!(listed[0].user_metadata.role.as_deref(), Some("executive"));
    }

    #[tokio::test]
    async fn failing_row_does_not_abort_the_batch() {
        let ctx = TestContext::default();
        let caller = account("Boss", Department::ExecutiveBoard, Some(Role::Executive));

        // First pass registers both; second pass collides on both emails
        // but still reports per-row outcomes.
        bulk_create(&ctx, &caller, seeds()).await.unwrap();
        let outcomes = bulk_create(&ctx, &caller, seeds()).await.unwrap();
        assert_eq!(outcomes.len(), 2);
        for outcome in outcomes {
            assert!(!outcome.created);
            assert!(outcome.error.is_some());
        }
    }
}
