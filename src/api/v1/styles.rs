use crate::api::RequestContext;
use crate::common::error::ServiceResponse;
use crate::models::cards::{CardShape, ShapeView, StylesResponse, eligible_styles};
use crate::usecases::sessions;
use axum::Json;

/// Styles the caller may pick plus the shape layout rules. The UI never
/// offers a style outside this set.
pub async fn list(ctx: RequestContext) -> ServiceResponse<StylesResponse> {
    let account = sessions::require_account(&ctx, ctx.bearer()).await?;
    Ok(Json(StylesResponse {
        styles: eligible_styles(&account).collect(),
        shapes: CardShape::ALL.into_iter().map(ShapeView::from).collect(),
    }))
}
