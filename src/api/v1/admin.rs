use crate::api::RequestContext;
use crate::common::error::ServiceResponse;
use crate::models::provisioning::{AccountSeed, ProvisionArgs, ProvisionResponse};
use crate::usecases::{provisioning, sessions};
use axum::Json;

/// Bulk account provisioning. Authorization is the caller's executive role,
/// checked in the usecase; there is no shared admin secret.
pub async fn bulk_create(
    ctx: RequestContext,
    Json(args): Json<ProvisionArgs>,
) -> ServiceResponse<ProvisionResponse> {
    let caller = sessions::require_account(&ctx, ctx.bearer()).await?;
    let seeds: Vec<AccountSeed> = args.accounts.into_iter().map(AccountSeed::from).collect();
    let results = provisioning::bulk_create(&ctx, &caller, seeds).await?;
    Ok(Json(ProvisionResponse { results }))
}
