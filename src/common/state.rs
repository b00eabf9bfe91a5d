use crate::adapters::blob_storage::BlobStorage;
use crate::adapters::directory::Directory;
use crate::adapters::record_store::MessageStore;
use crate::common::context::Context;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<dyn Directory>,
    pub store: Arc<dyn MessageStore>,
    pub blobs: Arc<dyn BlobStorage>,
}

impl Context for AppState {
    fn directory(&self) -> &dyn Directory {
        self.directory.as_ref()
    }

    fn store(&self) -> &dyn MessageStore {
        self.store.as_ref()
    }

    fn blobs(&self) -> &dyn BlobStorage {
        self.blobs.as_ref()
    }
}
