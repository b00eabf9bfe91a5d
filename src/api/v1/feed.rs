use crate::api::RequestContext;
use crate::common::error::ServiceResponse;
use crate::models::feed::{FeedArgs, FeedResponse, FeedSort};
use crate::usecases::{feed, sessions};
use axum::Json;
use axum::extract::Query;

pub async fn inbound(
    ctx: RequestContext,
    Query(args): Query<FeedArgs>,
) -> ServiceResponse<FeedResponse> {
    let account = sessions::require_account(&ctx, ctx.bearer()).await?;
    let sort = args
        .sort
        .as_deref()
        .map(FeedSort::parse)
        .unwrap_or_default();
    let messages = feed::assemble(&ctx, account.account_id, sort).await;
    Ok(Json(FeedResponse { messages }))
}
