use crate::common::context::Context;
use crate::entities::messages::{MessageChanges, MessageRow, NewMessageRow};
use uuid::Uuid;

pub async fn fetch_by_recipient<C: Context>(
    ctx: &C,
    recipient_id: Uuid,
) -> anyhow::Result<Vec<MessageRow>> {
    ctx.store().fetch_by_recipient(recipient_id).await
}

pub async fn fetch_by_sender<C: Context>(
    ctx: &C,
    sender_id: Uuid,
) -> anyhow::Result<Vec<MessageRow>> {
    ctx.store().fetch_by_sender(sender_id).await
}

pub async fn fetch_one<C: Context>(
    ctx: &C,
    message_id: Uuid,
) -> anyhow::Result<Option<MessageRow>> {
    ctx.store().fetch_one(message_id).await
}

pub async fn insert<C: Context>(ctx: &C, row: &NewMessageRow) -> anyhow::Result<MessageRow> {
    ctx.store().insert(row).await
}

pub async fn update<C: Context>(
    ctx: &C,
    message_id: Uuid,
    changes: &MessageChanges,
) -> anyhow::Result<MessageRow> {
    ctx.store().update(message_id, changes).await
}

pub async fn delete<C: Context>(ctx: &C, message_id: Uuid) -> anyhow::Result<()> {
    ctx.store().delete(message_id).await
}
