use crate::api::RequestContext;
use crate::common::error::ServiceResponse;
use crate::models::accounts::{AccountResponse, Department, ProfileUpdateArgs};
use crate::usecases::{profile, sessions};
use axum::Json;
use axum::body::Bytes;
use axum::http::HeaderMap;
use axum::http::header::CONTENT_TYPE;

pub async fn fetch(ctx: RequestContext) -> ServiceResponse<AccountResponse> {
    let account = sessions::require_account(&ctx, ctx.bearer()).await?;
    Ok(Json(AccountResponse { account }))
}

pub async fn update(
    ctx: RequestContext,
    Json(args): Json<ProfileUpdateArgs>,
) -> ServiceResponse<AccountResponse> {
    let account = sessions::require_account(&ctx, ctx.bearer()).await?;
    let update = profile::ProfileUpdate {
        display_name: args.display_name,
        department: args.department.as_deref().map(Department::parse),
    };
    let account = profile::update(&ctx, &account, update).await?;
    Ok(Json(AccountResponse { account }))
}

pub async fn set_avatar(
    ctx: RequestContext,
    headers: HeaderMap,
    body: Bytes,
) -> ServiceResponse<AccountResponse> {
    let account = sessions::require_account(&ctx, ctx.bearer()).await?;
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("application/octet-stream");
    let account = profile::set_avatar(&ctx, &account, content_type, body.to_vec()).await?;
    Ok(Json(AccountResponse { account }))
}

pub async fn remove_avatar(ctx: RequestContext) -> ServiceResponse<AccountResponse> {
    let account = sessions::require_account(&ctx, ctx.bearer()).await?;
    let account = profile::remove_avatar(&ctx, &account).await?;
    Ok(Json(AccountResponse { account }))
}
