use crate::adapters::blob_storage::BlobStorage;
use crate::adapters::directory::Directory;
use crate::adapters::record_store::MessageStore;

/// Access to the three external collaborators. Repositories and usecases
/// are generic over this, so request handlers and tests supply their own
/// backends.
pub trait Context: Sync + Send {
    fn directory(&self) -> &dyn Directory;
    fn store(&self) -> &dyn MessageStore;
    fn blobs(&self) -> &dyn BlobStorage;
}
