pub mod admin;
pub mod feed;
pub mod messages;
pub mod profile;
pub mod recipients;
pub mod styles;

use crate::common::state::AppState;
use axum::Router;
use axum::routing::{get, patch, post, put};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/feed", get(feed::inbound))
        .route("/sent", get(messages::sent))
        .route("/messages", post(messages::send))
        .route(
            "/messages/{message_id}",
            patch(messages::edit).delete(messages::delete),
        )
        .route("/recipients", get(recipients::list))
        .route("/recipients/{account_id}", get(recipients::fetch_one))
        .route("/styles", get(styles::list))
        .route("/profile", get(profile::fetch).patch(profile::update))
        .route(
            "/profile/avatar",
            put(profile::set_avatar).delete(profile::remove_avatar),
        )
        .route("/admin/accounts", post(admin::bulk_create))
}
