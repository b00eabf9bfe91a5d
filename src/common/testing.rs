use crate::adapters::blob_storage::{BlobStorage, Bucket};
use crate::adapters::directory::Directory;
use crate::adapters::record_store::MessageStore;
use crate::common::context::Context;
use crate::entities::accounts::{AccountRecord, MetadataRecord, NewAccountRecord};
use crate::entities::messages::{MessageChanges, MessageRow, NewMessageRow};
use crate::models::accounts::{Account, Department, Role};
use anyhow::bail;
use async_trait::async_trait;
use chrono::{TimeDelta, Utc};
use hashbrown::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use uuid::Uuid;

/// In-memory stand-ins for the three external collaborators, with call
/// counters so tests can assert how much backend work a usecase issued.
#[derive(Default)]
pub struct TestContext {
    pub directory: InMemoryDirectory,
    pub store: InMemoryMessageStore,
    pub blobs: InMemoryBlobStorage,
}

impl Context for TestContext {
    fn directory(&self) -> &dyn Directory {
        &self.directory
    }

    fn store(&self) -> &dyn MessageStore {
        &self.store
    }

    fn blobs(&self) -> &dyn BlobStorage {
        &self.blobs
    }
}

#[derive(Default)]
pub struct InMemoryDirectory {
    accounts: Mutex<Vec<AccountRecord>>,
    sessions: Mutex<HashMap<String, Uuid>>,
    failing: Mutex<HashSet<Uuid>>,
    fail_updates: AtomicBool,
    /// Individual account lookups performed, including batch members.
    pub lookup_calls: AtomicUsize,
    /// Batched lookup passes performed.
    pub batch_calls: AtomicUsize,
}

impl InMemoryDirectory {
    pub fn insert(&self, record: AccountRecord) {
        self.accounts.lock().unwrap().push(record);
    }

    pub fn add_session(&self, token: &str, account_id: Uuid) {
        self.sessions
            .lock()
            .unwrap()
            .insert(token.to_owned(), account_id);
    }

    /// Makes every lookup of this id fail, as if the provider errored.
    pub fn fail_lookups_of(&self, account_id: Uuid) {
        self.failing.lock().unwrap().insert(account_id);
    }

    pub fn fail_metadata_updates(&self) {
        self.fail_updates.store(true, Ordering::SeqCst);
    }

    pub fn stored_metadata(&self, account_id: Uuid) -> Option<MetadataRecord> {
        self.accounts
            .lock()
            .unwrap()
            .iter()
            .find(|record| record.id == account_id)
            .map(|record| record.user_metadata.clone())
    }

    fn lookup(&self, account_id: Uuid) -> anyhow::Result<Option<AccountRecord>> {
        self.lookup_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.lock().unwrap().contains(&account_id) {
            bail!("directory lookup failed");
        }
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|record| record.id == account_id)
            .cloned())
    }
}

#[async_trait]
impl Directory for InMemoryDirectory {
    async fn current_account(&self, bearer_token: &str) -> anyhow::Result<Option<AccountRecord>> {
        let account_id = self.sessions.lock().unwrap().get(bearer_token).copied();
        match account_id {
            Some(account_id) => self.lookup(account_id),
            None => Ok(None),
        }
    }

    async fn list_accounts(&self) -> anyhow::Result<Vec<AccountRecord>> {
        Ok(self.accounts.lock().unwrap().clone())
    }

    async fn fetch_account(&self, account_id: Uuid) -> anyhow::Result<Option<AccountRecord>> {
        self.lookup(account_id)
    }

    async fn fetch_accounts(
        &self,
        account_ids: &[Uuid],
    ) -> anyhow::Result<HashMap<Uuid, AccountRecord>> {
        self.batch_calls.fetch_add(1, Ordering::SeqCst);
        let unique: HashSet<Uuid> = account_ids.iter().copied().collect();
        let mut found = HashMap::new();
        for account_id in unique {
            if let Ok(Some(record)) = self.lookup(account_id) {
                found.insert(account_id, record);
            }
        }
        Ok(found)
    }

    async fn create_account(&self, account: &NewAccountRecord) -> anyhow::Result<AccountRecord> {
        let mut accounts = self.accounts.lock().unwrap();
        if accounts
            .iter()
            .any(|existing| existing.email.as_deref() == Some(account.email.as_str()))
        {
            bail!("email already registered");
        }
        let record = AccountRecord {
            id: Uuid::new_v4(),
            email: Some(account.email.clone()),
            user_metadata: account.user_metadata.clone(),
        };
        accounts.push(record.clone());
        Ok(record)
    }

    async fn update_metadata(
        &self,
        account_id: Uuid,
        metadata: &MetadataRecord,
    ) -> anyhow::Result<AccountRecord> {
        if self.fail_updates.load(Ordering::SeqCst) {
            bail!("metadata update failed");
        }
        let mut accounts = self.accounts.lock().unwrap();
        let Some(record) = accounts.iter_mut().find(|record| record.id == account_id) else {
            bail!("no such account");
        };
        record.user_metadata = metadata.clone();
        Ok(record.clone())
    }
}

#[derive(Default)]
pub struct InMemoryMessageStore {
    rows: Mutex<Vec<MessageRow>>,
    fail_reads: AtomicBool,
    pub insert_calls: AtomicUsize,
}

impl InMemoryMessageStore {
    pub fn seed(&self, row: MessageRow) {
        self.rows.lock().unwrap().push(row);
    }

    pub fn fail_reads(&self) {
        self.fail_reads.store(true, Ordering::SeqCst);
    }

    pub fn rows(&self) -> Vec<MessageRow> {
        self.rows.lock().unwrap().clone()
    }

    fn guard_reads(&self) -> anyhow::Result<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            bail!("record store unavailable");
        }
        Ok(())
    }

    fn newest_first(mut rows: Vec<MessageRow>) -> Vec<MessageRow> {
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn fetch_by_recipient(&self, recipient_id: Uuid) -> anyhow::Result<Vec<MessageRow>> {
        self.guard_reads()?;
        let rows = self.rows.lock().unwrap();
        Ok(Self::newest_first(
            rows.iter()
                .filter(|row| row.recipient_id == recipient_id)
                .cloned()
                .collect(),
        ))
    }

    async fn fetch_by_sender(&self, sender_id: Uuid) -> anyhow::Result<Vec<MessageRow>> {
        self.guard_reads()?;
        let rows = self.rows.lock().unwrap();
        Ok(Self::newest_first(
            rows.iter()
                .filter(|row| row.sender_id == Some(sender_id))
                .cloned()
                .collect(),
        ))
    }

    async fn fetch_one(&self, message_id: Uuid) -> anyhow::Result<Option<MessageRow>> {
        self.guard_reads()?;
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|row| row.id == message_id).cloned())
    }

    async fn insert(&self, row: &NewMessageRow) -> anyhow::Result<MessageRow> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        let stored = MessageRow {
            id: Uuid::new_v4(),
            recipient_id: row.recipient_id,
            sender_id: Some(row.sender_id),
            sender_name: row.sender_name.clone(),
            message: row.message.clone(),
            image_url: None,
            card_style: Some(row.card_style.clone()),
            card_shape: Some(row.card_shape.clone()),
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn update(
        &self,
        message_id: Uuid,
        changes: &MessageChanges,
    ) -> anyhow::Result<MessageRow> {
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.iter_mut().find(|row| row.id == message_id) else {
            bail!("update matched no row");
        };
        if let Some(message) = &changes.message {
            row.message = message.clone();
        }
        if let Some(card_style) = &changes.card_style {
            row.card_style = Some(card_style.clone());
        }
        Ok(row.clone())
    }

    async fn delete(&self, message_id: Uuid) -> anyhow::Result<()> {
        self.rows.lock().unwrap().retain(|row| row.id != message_id);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlobOp {
    Upload(String),
    Remove(String),
}

#[derive(Default)]
pub struct InMemoryBlobStorage {
    objects: Mutex<HashSet<String>>,
    pub ops: Mutex<Vec<BlobOp>>,
    fail_uploads: AtomicBool,
}

impl InMemoryBlobStorage {
    fn key(bucket: Bucket, path: &str) -> String {
        format!("{}/{path}", bucket.as_str())
    }

    pub fn seed_object(&self, bucket: Bucket, path: &str) {
        self.objects.lock().unwrap().insert(Self::key(bucket, path));
    }

    pub fn fail_uploads(&self) {
        self.fail_uploads.store(true, Ordering::SeqCst);
    }

    pub fn contains(&self, bucket: Bucket, path: &str) -> bool {
        self.objects.lock().unwrap().contains(&Self::key(bucket, path))
    }

    pub fn operations(&self) -> Vec<BlobOp> {
        self.ops.lock().unwrap().clone()
    }
}

#[async_trait]
impl BlobStorage for InMemoryBlobStorage {
    async fn upload(
        &self,
        bucket: Bucket,
        path: &str,
        _content_type: &str,
        _bytes: Vec<u8>,
    ) -> anyhow::Result<()> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            bail!("upload failed");
        }
        let key = Self::key(bucket, path);
        self.objects.lock().unwrap().insert(key.clone());
        self.ops.lock().unwrap().push(BlobOp::Upload(key));
        Ok(())
    }

    async fn remove(&self, bucket: Bucket, path: &str) -> anyhow::Result<()> {
        let key = Self::key(bucket, path);
        if !self.objects.lock().unwrap().remove(&key) {
            bail!("no such object");
        }
        self.ops.lock().unwrap().push(BlobOp::Remove(key));
        Ok(())
    }

    fn public_url(&self, bucket: Bucket, path: &str) -> String {
        format!("memory://{}/{path}", bucket.as_str())
    }
}

pub fn account_record(
    display_name: Option<&str>,
    department: Option<&str>,
    role: Option<&str>,
) -> AccountRecord {
    AccountRecord {
        id: Uuid::new_v4(),
        email: Some(format!("{}@example.jp", Uuid::new_v4().simple())),
        user_metadata: MetadataRecord {
            display_name: display_name.map(str::to_owned),
            department: department.map(str::to_owned),
            role: role.map(str::to_owned),
            avatar_url: None,
        },
    }
}

pub fn account(display_name: &str, department: Department, role: Option<Role>) -> Account {
    Account {
        account_id: Uuid::new_v4(),
        email: format!("{}@example.jp", Uuid::new_v4().simple()),
        display_name: Some(display_name.to_owned()),
        department,
        role,
        avatar_url: None,
    }
}

/// A stored row `age_secs` in the past, so tests get distinct sort keys.
pub fn message_row(recipient_id: Uuid, sender_id: Option<Uuid>, age_secs: i64) -> MessageRow {
    MessageRow {
        id: Uuid::new_v4(),
        recipient_id,
        sender_id,
        sender_name: "Sender".to_owned(),
        message: "hello".to_owned(),
        image_url: None,
        card_style: Some("crimson".to_owned()),
        card_shape: Some("square".to_owned()),
        created_at: Utc::now() - TimeDelta::seconds(age_secs),
    }
}
