use crate::settings::AppSettings;
use async_trait::async_trait;

/// Logical buckets owned by the external blob store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Avatars,
    MessageImages,
}

impl Bucket {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Bucket::Avatars => "avatars",
            Bucket::MessageImages => "message-images",
        }
    }
}

#[async_trait]
pub trait BlobStorage: Send + Sync {
    async fn upload(
        &self,
        bucket: Bucket,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> anyhow::Result<()>;

    async fn remove(&self, bucket: Bucket, path: &str) -> anyhow::Result<()>;

    fn public_url(&self, bucket: Bucket, path: &str) -> String;
}

/// HTTP client for the blob store's object API.
#[derive(Clone)]
pub struct BucketStorage {
    client: reqwest::Client,
    base_url: String,
    service_key: String,
}

impl BucketStorage {
    pub fn new(client: reqwest::Client, settings: &AppSettings) -> Self {
        Self {
            client,
            base_url: settings.backend_base_url.clone(),
            service_key: settings.backend_service_key.clone(),
        }
    }

    fn object_url(&self, bucket: Bucket, path: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{path}",
            self.base_url,
            bucket.as_str()
        )
    }
}

#[async_trait]
impl BlobStorage for BucketStorage {
    async fn upload(
        &self,
        bucket: Bucket,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> anyhow::Result<()> {
        self.client
            .post(self.object_url(bucket, path))
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .header("Content-Type", content_type)
            .body(bytes)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn remove(&self, bucket: Bucket, path: &str) -> anyhow::Result<()> {
        self.client
            .delete(self.object_url(bucket, path))
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    fn public_url(&self, bucket: Bucket, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{path}",
            self.base_url,
            bucket.as_str()
        )
    }
}
