use crate::adapters::blob_storage::BucketStorage;
use crate::adapters::directory::AuthDirectory;
use crate::adapters::record_store::RestRecordStore;
use crate::common::state::AppState;
use crate::settings::AppSettings;
use std::sync::Arc;

pub fn initialize_logging(settings: &AppSettings) {
    tracing_subscriber::fmt()
        .with_max_level(settings.level)
        .with_timer(tracing_subscriber::fmt::time())
        .with_level(true)
        .compact()
        .init();
}

pub fn initialize_state(settings: &AppSettings) -> anyhow::Result<AppState> {
    let http = reqwest::Client::builder()
        .timeout(settings.backend_request_timeout)
        .build()?;
    Ok(AppState {
        directory: Arc::new(AuthDirectory::new(http.clone(), settings)),
        store: Arc::new(RestRecordStore::new(http.clone(), settings)),
        blobs: Arc::new(BucketStorage::new(http, settings)),
    })
}
