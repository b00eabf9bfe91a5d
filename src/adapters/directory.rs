use crate::entities::accounts::{AccountRecord, MetadataRecord, NewAccountRecord};
use crate::settings::AppSettings;
use async_trait::async_trait;
use hashbrown::{HashMap, HashSet};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;
use uuid::Uuid;

/// The external auth/directory provider. Accounts live entirely on the
/// provider's side; this service only reads and administers them.
#[async_trait]
pub trait Directory: Send + Sync {
    /// Resolves the account behind a user bearer token. `None` for an
    /// invalid or expired token.
    async fn current_account(&self, bearer_token: &str) -> anyhow::Result<Option<AccountRecord>>;

    /// Every registered account, in provider order.
    async fn list_accounts(&self) -> anyhow::Result<Vec<AccountRecord>>;

    async fn fetch_account(&self, account_id: Uuid) -> anyhow::Result<Option<AccountRecord>>;

    /// Batched lookup. The returned mapping omits ids that could not be
    /// resolved; an individual failure never fails the batch.
    async fn fetch_accounts(
        &self,
        account_ids: &[Uuid],
    ) -> anyhow::Result<HashMap<Uuid, AccountRecord>>;

    async fn create_account(&self, account: &NewAccountRecord) -> anyhow::Result<AccountRecord>;

    async fn update_metadata(
        &self,
        account_id: Uuid,
        metadata: &MetadataRecord,
    ) -> anyhow::Result<AccountRecord>;
}

#[derive(Deserialize)]
struct AccountPage {
    users: Vec<AccountRecord>,
}

#[derive(Serialize)]
struct MetadataUpdate<'a> {
    user_metadata: &'a MetadataRecord,
}

/// HTTP client for the provider's auth API, authenticated with the service
/// key for admin operations.
#[derive(Clone)]
pub struct AuthDirectory {
    client: reqwest::Client,
    base_url: String,
    service_key: String,
    page_size: usize,
}

impl AuthDirectory {
    pub fn new(client: reqwest::Client, settings: &AppSettings) -> Self {
        Self {
            client,
            base_url: settings.backend_base_url.clone(),
            service_key: settings.backend_service_key.clone(),
            page_size: settings.directory_page_size,
        }
    }

    fn admin_users_url(&self) -> String {
        format!("{}/auth/v1/admin/users", self.base_url)
    }

    fn admin_user_url(&self, account_id: Uuid) -> String {
        format!("{}/auth/v1/admin/users/{account_id}", self.base_url)
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }
}

#[async_trait]
impl Directory for AuthDirectory {
    async fn current_account(&self, bearer_token: &str) -> anyhow::Result<Option<AccountRecord>> {
        let url = format!("{}/auth/v1/user", self.base_url);
        let response = self
            .client
            .get(url)
            .header("apikey", &self.service_key)
            .bearer_auth(bearer_token)
            .send()
            .await?;
        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND => Ok(None),
            _ => Ok(Some(response.error_for_status()?.json().await?)),
        }
    }

    async fn list_accounts(&self) -> anyhow::Result<Vec<AccountRecord>> {
        let mut accounts = Vec::new();
        let mut page = 1usize;
        loop {
            let response = self
                .request(self.client.get(self.admin_users_url()))
                .query(&[("page", page), ("per_page", self.page_size)])
                .send()
                .await?
                .error_for_status()?;
            let batch: AccountPage = response.json().await?;
            let fetched = batch.users.len();
            accounts.extend(batch.users);
            if fetched < self.page_size {
                return Ok(accounts);
            }
            page += 1;
        }
    }

    async fn fetch_account(&self, account_id: Uuid) -> anyhow::Result<Option<AccountRecord>> {
        let response = self
            .request(self.client.get(self.admin_user_url(account_id)))
            .send()
            .await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            _ => Ok(Some(response.error_for_status()?.json().await?)),
        }
    }

    async fn fetch_accounts(
        &self,
        account_ids: &[Uuid],
    ) -> anyhow::Result<HashMap<Uuid, AccountRecord>> {
        let unique: HashSet<Uuid> = account_ids.iter().copied().collect();
        let mut lookups = JoinSet::new();
        for account_id in unique {
            let directory = self.clone();
            lookups.spawn(async move { (account_id, directory.fetch_account(account_id).await) });
        }

        let mut accounts = HashMap::new();
        while let Some(joined) = lookups.join_next().await {
            match joined? {
                (account_id, Ok(Some(record))) => {
                    accounts.insert(account_id, record);
                }
                (account_id, Ok(None)) => {
                    tracing::debug!(%account_id, "account lookup returned no record");
                }
                (account_id, Err(e)) => {
                    tracing::debug!(%account_id, "account lookup failed: {e}");
                }
            }
        }
        Ok(accounts)
    }

    async fn create_account(&self, account: &NewAccountRecord) -> anyhow::Result<AccountRecord> {
        let response = self
            .request(self.client.post(self.admin_users_url()))
            .json(account)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    async fn update_metadata(
        &self,
        account_id: Uuid,
        metadata: &MetadataRecord,
    ) -> anyhow::Result<AccountRecord> {
        let response = self
            .request(self.client.put(self.admin_user_url(account_id)))
            .json(&MetadataUpdate {
                user_metadata: metadata,
            })
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }
}
