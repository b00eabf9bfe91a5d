use crate::entities::messages::{MessageChanges, MessageRow, NewMessageRow};
use crate::settings::AppSettings;
use anyhow::Context as _;
use async_trait::async_trait;
use uuid::Uuid;

const COLLECTION: &str = "messages";
const READ_FIELDS: &str = const_str::concat!(
    "id,recipient_id,sender_id,sender_name,message,",
    "image_url,card_style,card_shape,created_at"
);
const ORDER_NEWEST_FIRST: &str = "created_at.desc";

/// The external structured record store holding the `messages` collection.
/// Reads come back newest first.
#[async_trait]
pub trait MessageStore: Send + Sync {
    async fn fetch_by_recipient(&self, recipient_id: Uuid) -> anyhow::Result<Vec<MessageRow>>;

    async fn fetch_by_sender(&self, sender_id: Uuid) -> anyhow::Result<Vec<MessageRow>>;

    async fn fetch_one(&self, message_id: Uuid) -> anyhow::Result<Option<MessageRow>>;

    /// Inserts one row and returns it as stored (id and timestamp are
    /// generated by the store).
    async fn insert(&self, row: &NewMessageRow) -> anyhow::Result<MessageRow>;

    async fn update(
        &self,
        message_id: Uuid,
        changes: &MessageChanges,
    ) -> anyhow::Result<MessageRow>;

    async fn delete(&self, message_id: Uuid) -> anyhow::Result<()>;
}

/// REST client for the record store's row API.
#[derive(Clone)]
pub struct RestRecordStore {
    client: reqwest::Client,
    base_url: String,
    service_key: String,
}

impl RestRecordStore {
    pub fn new(client: reqwest::Client, settings: &AppSettings) -> Self {
        Self {
            client,
            base_url: settings.backend_base_url.clone(),
            service_key: settings.backend_service_key.clone(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/rest/v1/{COLLECTION}", self.base_url)
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }

    async fn fetch_filtered(&self, column: &str, value: Uuid) -> anyhow::Result<Vec<MessageRow>> {
        let filter = format!("eq.{value}");
        let response = self
            .request(self.client.get(self.collection_url()))
            .query(&[
                ("select", READ_FIELDS),
                (column, filter.as_str()),
                ("order", ORDER_NEWEST_FIRST),
            ])
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl MessageStore for RestRecordStore {
    async fn fetch_by_recipient(&self, recipient_id: Uuid) -> anyhow::Result<Vec<MessageRow>> {
        self.fetch_filtered("recipient_id", recipient_id).await
    }

    async fn fetch_by_sender(&self, sender_id: Uuid) -> anyhow::Result<Vec<MessageRow>> {
        self.fetch_filtered("sender_id", sender_id).await
    }

    async fn fetch_one(&self, message_id: Uuid) -> anyhow::Result<Option<MessageRow>> {
        let rows = self.fetch_filtered("id", message_id).await?;
        Ok(rows.into_iter().next())
    }

    async fn insert(&self, row: &NewMessageRow) -> anyhow::Result<MessageRow> {
        let response = self
            .request(self.client.post(self.collection_url()))
            .header("Prefer", "return=representation")
            .json(row)
            .send()
            .await?
            .error_for_status()?;
        let mut rows: Vec<MessageRow> = response.json().await?;
        rows.pop().context("insert returned no row")
    }

    async fn update(
        &self,
        message_id: Uuid,
        changes: &MessageChanges,
    ) -> anyhow::Result<MessageRow> {
        let response = self
            .request(self.client.patch(self.collection_url()))
            .query(&[("id", format!("eq.{message_id}"))])
            .header("Prefer", "return=representation")
            .json(changes)
            .send()
            .await?
            .error_for_status()?;
        let mut rows: Vec<MessageRow> = response.json().await?;
        rows.pop().context("update matched no row")
    }

    async fn delete(&self, message_id: Uuid) -> anyhow::Result<()> {
        self.request(self.client.delete(self.collection_url()))
            .query(&[("id", format!("eq.{message_id}"))])
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
