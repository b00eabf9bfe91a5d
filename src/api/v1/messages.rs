use crate::api::RequestContext;
use crate::common::error::ServiceResponse;
use crate::models::accounts::{Department, Role};
use crate::models::feed::{SentArgs, SentFilter, SentResponse, SentSort};
use crate::models::messages::{EditMessageArgs, MessageResponse, SendMessageArgs};
use crate::usecases::{compose, sent, sessions};
use axum::Json;
use axum::extract::{Path, Query};
use uuid::Uuid;

pub async fn sent(
    ctx: RequestContext,
    Query(args): Query<SentArgs>,
) -> ServiceResponse<SentResponse> {
    let account = sessions::require_account(&ctx, ctx.bearer()).await?;
    let filter = SentFilter {
        department: args.department.as_deref().map(Department::parse),
        role: args.role.as_deref().and_then(Role::parse),
        query: args.q,
    };
    let sort = args
        .sort
        .as_deref()
        .map(SentSort::parse)
        .unwrap_or_default();
    let messages = sent::list(&ctx, account.account_id, &filter, sort).await;
    Ok(Json(SentResponse { messages }))
}

pub async fn send(
    ctx: RequestContext,
    Json(args): Json<SendMessageArgs>,
) -> ServiceResponse<MessageResponse> {
    let account = sessions::require_account(&ctx, ctx.bearer()).await?;
    let message = compose::send(&ctx, &account, args.into()).await?;
    Ok(Json(MessageResponse { message }))
}

pub async fn edit(
    ctx: RequestContext,
    Path(message_id): Path<Uuid>,
    Json(args): Json<EditMessageArgs>,
) -> ServiceResponse<MessageResponse> {
    let account = sessions::require_account(&ctx, ctx.bearer()).await?;
    let message = sent::edit(&ctx, &account, message_id, args.into()).await?;
    Ok(Json(MessageResponse { message }))
}

pub async fn delete(
    ctx: RequestContext,
    Path(message_id): Path<Uuid>,
) -> ServiceResponse<()> {
    let account = sessions::require_account(&ctx, ctx.bearer()).await?;
    sent::delete(&ctx, &account, message_id).await?;
    Ok(Json(()))
}
