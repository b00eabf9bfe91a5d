use crate::common::context::Context;
use crate::common::error::{AppError, ServiceResult, unexpected};
use crate::models::accounts::Account;
use crate::repositories::accounts;

/// Resolves the caller's account from a bearer token. Authentication itself
/// is owned by the directory provider; this only validates the token and
/// types the metadata.
pub async fn require_account<C: Context>(ctx: &C, bearer: Option<&str>) -> ServiceResult<Account> {
    let token = bearer.ok_or(AppError::Unauthorized)?;
    match accounts::fetch_current(ctx, token).await {
        Ok(Some(record)) => Ok(Account::from(record)),
        Ok(None) => Err(AppError::Unauthorized),
        Err(e) => unexpected(e),
    }
}
