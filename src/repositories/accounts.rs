use crate::common::context::Context;
use crate::entities::accounts::{AccountRecord, MetadataRecord, NewAccountRecord};
use hashbrown::HashMap;
use uuid::Uuid;

pub async fn fetch_current<C: Context>(
    ctx: &C,
    bearer_token: &str,
) -> anyhow::Result<Option<AccountRecord>> {
    ctx.directory().current_account(bearer_token).await
}

pub async fn fetch_all<C: Context>(ctx: &C) -> anyhow::Result<Vec<AccountRecord>> {
    ctx.directory().list_accounts().await
}

pub async fn fetch_one<C: Context>(
    ctx: &C,
    account_id: Uuid,
) -> anyhow::Result<Option<AccountRecord>> {
    ctx.directory().fetch_account(account_id).await
}

/// Batched lookup; the mapping omits ids the provider could not resolve.
pub async fn fetch_many<C: Context>(
    ctx: &C,
    account_ids: &[Uuid],
) -> anyhow::Result<HashMap<Uuid, AccountRecord>> {
    ctx.directory().fetch_accounts(account_ids).await
}

pub async fn create<C: Context>(
    ctx: &C,
    account: &NewAccountRecord,
) -> anyhow::Result<AccountRecord> {
    ctx.directory().create_account(account).await
}

pub async fn update_metadata<C: Context>(
    ctx: &C,
    account_id: Uuid,
    metadata: &MetadataRecord,
) -> anyhow::Result<AccountRecord> {
    ctx.directory().update_metadata(account_id, metadata).await
}
