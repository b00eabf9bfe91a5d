use crate::adapters::blob_storage::BlobStorage;
use crate::adapters::directory::Directory;
use crate::adapters::record_store::MessageStore;
use crate::common::context::Context;
use crate::common::error::AppError;
use crate::common::init;
use crate::common::state::AppState;
use crate::settings::AppSettings;
use axum::Router;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use tokio::net::TcpListener;

pub mod v1;

/// Per-request view of the backends plus the caller's bearer token. Nothing
/// outlives the request; the backends behind the `Arc`s are the only shared
/// state.
pub struct RequestContext {
    state: AppState,
    bearer: Option<String>,
}

impl RequestContext {
    pub fn bearer(&self) -> Option<&str> {
        self.bearer.as_deref()
    }
}

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/v1", v1::router())
}

pub async fn serve(settings: &AppSettings) -> anyhow::Result<()> {
    let state = init::initialize_state(settings)?;
    let app = router().with_state(state);
    let listener = TcpListener::bind((settings.app_host, settings.app_port)).await?;
    tracing::info!(
        "serving api on {}:{}",
        settings.app_host,
        settings.app_port
    );
    axum::serve(listener, app).await?;
    Ok(())
}

impl FromRequestParts<AppState> for RequestContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let bearer = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::to_owned);
        Ok(Self {
            state: state.clone(),
            bearer,
        })
    }
}

impl Context for RequestContext {
    fn directory(&self) -> &dyn Directory {
        self.state.directory.as_ref()
    }

    fn store(&self) -> &dyn MessageStore {
        self.state.store.as_ref()
    }

    fn blobs(&self) -> &dyn BlobStorage {
        self.state.blobs.as_ref()
    }
}
