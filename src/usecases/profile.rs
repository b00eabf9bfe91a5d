use crate::adapters::blob_storage::Bucket;
use crate::common::context::Context;
use crate::common::error::{AppError, ServiceResult, unexpected};
use crate::models::accounts::{Account, Department};
use crate::repositories::accounts;
use uuid::Uuid;

const AVATAR_FOLDER: &str = "public";

/// Caller-editable profile fields. Department is assigned at provisioning
/// and rejected here when a change is attempted.
#[derive(Debug, Default, Clone)]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
    pub department: Option<Department>,
}

pub async fn update<C: Context>(
    ctx: &C,
    account: &Account,
    update: ProfileUpdate,
) -> ServiceResult<Account> {
    if let Some(department) = update.department {
        if department != account.department {
            return Err(AppError::AccountsDepartmentImmutable);
        }
    }
    let mut metadata = account.to_metadata();
    if let Some(display_name) = update.display_name {
        let trimmed = display_name.trim();
        metadata.display_name = (!trimmed.is_empty()).then(|| trimmed.to_owned());
    }
    match accounts::update_metadata(ctx, account.account_id, &metadata).await {
        Ok(record) => Ok(Account::from(record)),
        Err(e) => unexpected(e),
    }
}

/// Replaces the avatar with an ordered compensating sequence: upload the new
/// blob, point the metadata at it, then best-effort delete of the replaced
/// blob. If the metadata write fails the new blob is deleted again, so the
/// profile never references a file that does not exist.
pub async fn set_avatar<C: Context>(
    ctx: &C,
    account: &Account,
    content_type: &str,
    bytes: Vec<u8>,
) -> ServiceResult<Account> {
    let path = format!(
        "{AVATAR_FOLDER}/{}.{}",
        Uuid::new_v4(),
        extension_for(content_type)
    );
    if let Err(e) = ctx
        .blobs()
        .upload(Bucket::Avatars, &path, content_type, bytes)
        .await
    {
        return unexpected(e);
    }

    let mut metadata = account.to_metadata();
    metadata.avatar_url = Some(ctx.blobs().public_url(Bucket::Avatars, &path));
    match accounts::update_metadata(ctx, account.account_id, &metadata).await {
        Ok(record) => {
            if let Some(replaced) = account.avatar_url.as_deref().and_then(object_path) {
                if replaced != path {
                    if let Err(e) = ctx.blobs().remove(Bucket::Avatars, &replaced).await {
                        tracing::warn!("removing replaced avatar failed: {e}");
                    }
                }
            }
            Ok(Account::from(record))
        }
        Err(e) => {
            if let Err(remove_err) = ctx.blobs().remove(Bucket::Avatars, &path).await {
                tracing::warn!("removing unreferenced avatar failed: {remove_err}");
            }
            unexpected(e)
        }
    }
}

/// Clears the avatar: metadata first, then best-effort blob removal.
pub async fn remove_avatar<C: Context>(ctx: &C, account: &Account) -> ServiceResult<Account> {
    let mut metadata = account.to_metadata();
    metadata.avatar_url = None;
    match accounts::update_metadata(ctx, account.account_id, &metadata).await {
        Ok(record) => {
            if let Some(previous) = account.avatar_url.as_deref().and_then(object_path) {
                if let Err(e) = ctx.blobs().remove(Bucket::Avatars, &previous).await {
                    tracing::warn!("removing cleared avatar failed: {e}");
                }
            }
            Ok(Account::from(record))
        }
        Err(e) => unexpected(e),
    }
}

fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        "image/png" => "png",
        "image/jpeg" => "jpg",
        "image/gif" => "gif",
        "image/webp" => "webp",
        _ => "img",
    }
}

/// Storage path of an avatar from its public URL (the URL's file name under
/// the avatar folder).
fn object_path(url: &str) -> Option<String> {
    let name = url.rsplit('/').next()?;
    (!name.is_empty()).then(|| format!("{AVATAR_FOLDER}/{name}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::testing::{BlobOp, TestContext, account_record};

    async fn seeded_account(ctx: &TestContext, avatar: Option<&str>) -> Account {
        let mut record = account_record(Some("Taro"), Some("development"), None);
        record.user_metadata.avatar_url = avatar.map(str::to_owned);
        ctx.directory.insert(record.clone());
        Account::from(record)
    }

    #[tokio::test]
    async fn display_name_update_persists() {
        let ctx = TestContext::default();
        let account = seeded_account(&ctx, None).await;

        let updated = update(
            &ctx,
            &account,
            ProfileUpdate {
                display_name: Some("  Taro Y.  ".to_owned()),
                department: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.display_name.as_deref(), Some("Taro Y."));
        let stored = ctx.directory.stored_metadata(account.account_id).unwrap();
        assert_eq!(stored.display_name.as_deref(), Some("Taro Y."));
        assert_eq!(stored.department.as_deref(), Some("development"));
    }

    #[tokio::test]
    async fn department_change_is_rejected() {
        let ctx = TestContext::default();
        let account = seeded_account(&ctx, None).await;

        let result = update(
            &ctx,
            &account,
            ProfileUpdate {
                display_name: None,
                department: Some(Department::Finance),
            },
        )
        .await;
        assert!(matches!(result, Err(AppError::AccountsDepartmentImmutable)));

        let unchanged = update(
            &ctx,
            &account,
            ProfileUpdate {
                display_name: None,
                department: Some(Department::Development),
            },
        )
        .await;
        assert!(unchanged.is_ok());
    }

    #[tokio::test]
    async fn avatar_swap_uploads_then_updates_then_removes_old() {
        let ctx = TestContext::default();
        let account = seeded_account(&ctx, Some("memory://avatars/public/old.png")).await;
        ctx.blobs.seed_object(Bucket::Avatars, "public/old.png");

        let updated = set_avatar(&ctx, &account, "image/png", vec![1, 2, 3])
            .await
            .unwrap();
        let new_url = updated.avatar_url.unwrap();
        assert!(new_url.starts_with("memory://avatars/public/"));
        assert!(new_url.ends_with(".png"));

        let ops = ctx.blobs.operations();
        assert_eq!(ops.len(), 2);
        assert!(matches!(&ops[0], BlobOp::Upload(path) if path.starts_with("avatars/public/")));
        assert_eq!(ops[1], BlobOp::Remove("avatars/public/old.png".to_owned()));
        assert!(!ctx.blobs.contains(Bucket::Avatars, "public/old.png"));
    }

    #[tokio::test]
    async fn upload_failure_leaves_the_profile_untouched() {
        let ctx = TestContext::default();
        let account = seeded_account(&ctx, Some("memory://avatars/public/old.png")).await;
        ctx.blobs.seed_object(Bucket::Avatars, "public/old.png");
        ctx.blobs.fail_uploads();

        let result = set_avatar(&ctx, &account, "image/png", vec![1]).await;
        assert!(matches!(result, Err(AppError::Unexpected)));
        let stored = ctx.directory.stored_metadata(account.account_id).unwrap();
        assert_eq!(
            stored.avatar_url.as_deref(),
            Some("memory://avatars/public/old.png")
        );
        assert!(ctx.blobs.operations().is_empty());
    }

    #[tokio::test]
    async fn metadata_failure_compensates_by_removing_new_blob() {
        let ctx = TestContext::default();
        let account = seeded_account(&ctx, Some("memory://avatars/public/old.png")).await;
        ctx.blobs.seed_object(Bucket::Avatars, "public/old.png");
        ctx.directory.fail_metadata_updates();

        let result = set_avatar(&ctx, &account, "image/png", vec![1]).await;
        assert!(matches!(result, Err(AppError::Unexpected)));

        // Old blob untouched, new blob compensated away.
        assert!(ctx.blobs.contains(Bucket::Avatars, "public/old.png"));
        let ops = ctx.blobs.operations();
        assert_eq!(ops.len(), 2);
        let (BlobOp::Upload(uploaded), BlobOp::Remove(removed)) = (&ops[0], &ops[1]) else {
            panic!("expected upload then remove, got {ops:?}");
        };
        assert_eq!(uploaded, removed);
    }

    #[tokio::test]
    async fn remove_avatar_clears_metadata_then_blob() {
        let ctx = TestContext::default();
        let account = seeded_account(&ctx, Some("memory://avatars/public/old.png")).await;
        ctx.blobs.seed_object(Bucket::Avatars, "public/old.png");

        let updated = remove_avatar(&ctx, &account).await.unwrap();
        assert_eq!(updated.avatar_url, None);
        assert!(!ctx.blobs.contains(Bucket::Avatars, "public/old.png"));
        let stored = ctx.directory.stored_metadata(account.account_id).unwrap();
        assert_eq!(stored.avatar_url, None);
    }
}
