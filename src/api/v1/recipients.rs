use crate::api::RequestContext;
use crate::common::error::ServiceResponse;
use crate::models::accounts::{
    AccountResponse, Department, RecipientsArgs, RecipientsResponse, Role,
};
use crate::usecases::{directory, sessions};
use axum::Json;
use axum::extract::{Path, Query};
use uuid::Uuid;

pub async fn list(
    ctx: RequestContext,
    Query(args): Query<RecipientsArgs>,
) -> ServiceResponse<RecipientsResponse> {
    sessions::require_account(&ctx, ctx.bearer()).await?;
    let filter = directory::RecipientFilter {
        department: args.department.as_deref().map(Department::parse),
        role: args.role.as_deref().and_then(Role::parse),
        query: args.q,
    };
    let recipients = directory::list_recipients(&ctx, &filter).await?;
    Ok(Json(RecipientsResponse { recipients }))
}

pub async fn fetch_one(
    ctx: RequestContext,
    Path(account_id): Path<Uuid>,
) -> ServiceResponse<AccountResponse> {
    sessions::require_account(&ctx, ctx.bearer()).await?;
    let account = directory::fetch_recipient(&ctx, account_id).await?;
    Ok(Json(AccountResponse { account }))
}
