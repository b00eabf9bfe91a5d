use crate::common::context::Context;
use crate::common::error::{AppError, ServiceResult, unexpected};
use crate::entities::messages::MessageChanges;
use crate::models::accounts::Account;
use crate::models::feed::{SentFilter, SentMessage, SentSort};
use crate::models::messages::{Message, MessageEdit, text_within_bounds};
use crate::repositories::messages;
use crate::usecases::enrichment;
use uuid::Uuid;

/// Assembles the outbound list for a sender: same pipeline as the inbound
/// feed, keyed by `sender_id` and enriched with recipient profiles, then
/// filtered and sorted per the caller's view options.
pub async fn list<C: Context>(
    ctx: &C,
    sender_id: Uuid,
    filter: &SentFilter,
    sort: SentSort,
) -> Vec<SentMessage> {
    let rows = match messages::fetch_by_sender(ctx, sender_id).await {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!(%sender_id, "loading sent messages failed: {e}");
            return Vec::new();
        }
    };
    if rows.is_empty() {
        return Vec::new();
    }

    let recipient_ids = rows.iter().map(|row| row.recipient_id);
    let profiles = enrichment::resolve(ctx, recipient_ids).await;

    let mut sent: Vec<SentMessage> = rows
        .into_iter()
        .map(Message::from)
        .map(|message| {
            let profile = profiles.get(&message.recipient_id);
            SentMessage::merge(message, profile)
        })
        .filter(|message| filter.matches(message))
        .collect();

    match sort {
        SentSort::Date => sent.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SentSort::Name => sent.sort_by(|a, b| {
            let a_name = a.recipient_name.as_deref().unwrap_or("");
            let b_name = b.recipient_name.as_deref().unwrap_or("");
            a_name.cmp(b_name)
        }),
    }
    sent
}

/// Updates the sender-mutable fields of an owned message. Recipient, sender
/// and timestamp stay as stored; the changes payload cannot express them.
pub async fn edit<C: Context>(
    ctx: &C,
    editor: &Account,
    message_id: Uuid,
    edit: MessageEdit,
) -> ServiceResult<Message> {
    let row = match messages::fetch_one(ctx, message_id).await {
        Ok(Some(row)) => row,
        Ok(None) => return Err(AppError::MessagesNotFound),
        Err(e) => return unexpected(e),
    };
    if row.sender_id != Some(editor.account_id) {
        return Err(AppError::MessagesNotOwned);
    }
    if let Some(text) = &edit.message {
        if !text_within_bounds(text) {
            return Err(AppError::MessagesInvalidLength);
        }
    }
    if let Some(style) = edit.card_style {
        if !style.style().eligible_for(editor) {
            return Err(AppError::StylesNotEligible);
        }
    }

    let changes = MessageChanges {
        message: edit.message,
        card_style: edit.card_style.map(|style| style.as_str().to_owned()),
    };
    if changes.message.is_none() && changes.card_style.is_none() {
        return Ok(Message::from(row));
    }
    match messages::update(ctx, message_id, &changes).await {
        Ok(updated) => Ok(Message::from(updated)),
        Err(e) => unexpected(e),
    }
}

/// Deletes an owned message. The client confirms; the service enforces
/// ownership.
pub async fn delete<C: Context>(
    ctx: &C,
    caller: &Account,
    message_id: Uuid,
) -> ServiceResult<()> {
    let row = match messages::fetch_one(ctx, message_id).await {
        Ok(Some(row)) => row,
        Ok(None) => return Err(AppError::MessagesNotFound),
        Err(e) => return unexpected(e),
    };
    if row.sender_id != Some(caller.account_id) {
        return Err(AppError::MessagesNotOwned);
    }
    match messages::delete(ctx, message_id).await {
        Ok(()) => Ok(()),
        Err(e) => unexpected(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::testing::{TestContext, account, account_record, message_row};
    use crate::models::accounts::{Department, Role};
    use crate::models::cards::CardStyleId;
    use uuid::Uuid;

    fn seeded_peer(
        ctx: &TestContext,
        name: &str,
        department: &str,
        role: Option<&str>,
    ) -> Uuid {
        let record = account_record(Some(name), Some(department), role);
        let id = record.id;
        ctx.directory.insert(record);
        id
    }

    #[tokio::test]
    async fn list_enriches_recipients_and_sorts_by_date() {
        let ctx = TestContext::default();
        let sender = Uuid::new_v4();
        let hanako = seeded_peer(&ctx, "Hanako", "finance", Some("section_chief"));
        let taro = seeded_peer(&ctx, "Taro", "operations", None);
        ctx.store.seed(message_row(hanako, Some(sender), 100));
        ctx.store.seed(message_row(taro, Some(sender), 10));

        let sent = list(&ctx, sender, &SentFilter::default(), SentSort::Date).await;
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].recipient_name.as_deref(), Some("Taro"));
        assert_eq!(sent[1].recipient_name.as_deref(), Some("Hanako"));
        assert_eq!(sent[1].recipient_department, Department::Finance);
        assert_eq!(sent[1].recipient_role, Some(Role::SectionChief));
    }

    #[tokio::test]
    async fn list_sorts_by_recipient_name_when_requested() {
        let ctx = TestContext::default();
        let sender = Uuid::new_v4();
        let zoe = seeded_peer(&ctx, "Zoe", "finance", None);
        let aki = seeded_peer(&ctx, "Aki", "finance", None);
        ctx.store.seed(message_row(aki, Some(sender), 5));
        ctx.store.seed(message_row(zoe, Some(sender), 50));

        let sent = list(&ctx, sender, &SentFilter::default(), SentSort::Name).await;
        let names: Vec<_> = sent
            .iter()
            .map(|m| m.recipient_name.clone().unwrap())
            .collect();
        assert_eq!(names, vec!["Aki".to_owned(), "Zoe".to_owned()]);
    }

    #[tokio::test]
    async fn list_filters_by_department_role_and_name() {
        let ctx = TestContext::default();
        let sender = Uuid::new_v4();
        let chief = seeded_peer(&ctx, "Ginpei", "finance", Some("section_chief"));
        let member = seeded_peer(&ctx, "Yuri", "development", None);
        ctx.store.seed(message_row(chief, Some(sender), 1));
        ctx.store.seed(message_row(member, Some(sender), 2));

        let by_department = SentFilter {
            department: Some(Department::Finance),
            ..Default::default()
        };
        let sent = list(&ctx, sender, &by_department, SentSort::Date).await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].recipient_department, Department::Finance);

        let by_role = SentFilter {
            role: Some(Role::SectionChief),
            ..Default::default()
        };
        let sent = list(&ctx, sender, &by_role, SentSort::Date).await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].recipient_name.as_deref(), Some("Ginpei"));

        let by_name = SentFilter {
            query: Some("Yu".to_owned()),
            ..Default::default()
        };
        let sent = list(&ctx, sender, &by_name, SentSort::Date).await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].recipient_name.as_deref(), Some("Yuri"));
    }

    #[tokio::test]
    async fn edit_changes_text_and_keeps_recipient_and_timestamp() {
        let ctx = TestContext::default();
        let editor = account("Taro", Department::Development, None);
        let recipient = Uuid::new_v4();
        let row = message_row(recipient, Some(editor.account_id), 60);
        let message_id = row.id;
        let original_created_at = row.created_at;
        ctx.store.seed(row);

        let updated = edit(
            &ctx,
            &editor,
            message_id,
            MessageEdit {
                message: Some("rewritten".to_owned()),
                card_style: Some(CardStyleId::Gold),
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.message, "rewritten");
        assert_eq!(updated.card_style, CardStyleId::Gold);
        assert_eq!(updated.recipient_id, recipient);
        assert_eq!(updated.created_at, original_created_at);

        let refetched = ctx.store.rows();
        assert_eq!(refetched[0].message, "rewritten");
        assert_eq!(refetched[0].created_at, original_created_at);
    }

    #[tokio::test]
    async fn edit_rejects_non_owner() {
        let ctx = TestContext::default();
        let editor = account("Taro", Department::Development, None);
        let row = message_row(Uuid::new_v4(), Some(Uuid::new_v4()), 1);
        let message_id = row.id;
        ctx.store.seed(row);

        let result = edit(
            &ctx,
            &editor,
            message_id,
            MessageEdit {
                message: Some("hijacked".to_owned()),
                card_style: None,
            },
        )
        .await;
        assert!(matches!(result, Err(AppError::MessagesNotOwned)));
    }

    #[tokio::test]
    async fn edit_rejects_whitespace_only_text() {
        let ctx = TestContext::default();
        let editor = account("Taro", Department::Development, None);
        let row = message_row(Uuid::new_v4(), Some(editor.account_id), 1);
        let message_id = row.id;
        ctx.store.seed(row);

        let result = edit(
            &ctx,
            &editor,
            message_id,
            MessageEdit {
                message: Some("  \n  ".to_owned()),
                card_style: None,
            },
        )
        .await;
        assert!(matches!(result, Err(AppError::MessagesInvalidLength)));
    }

    #[tokio::test]
    async fn edit_rejects_ineligible_style() {
        let ctx = TestContext::default();
        let editor = account("Taro", Department::Development, None);
        let row = message_row(Uuid::new_v4(), Some(editor.account_id), 1);
        let message_id = row.id;
        ctx.store.seed(row);

        let result = edit(
            &ctx,
            &editor,
            message_id,
            MessageEdit {
                message: None,
                card_style: Some(CardStyleId::ViceDirector),
            },
        )
        .await;
        assert!(matches!(result, Err(AppError::StylesNotEligible)));
    }

    #[tokio::test]
    async fn delete_removes_the_row() {
        let ctx = TestContext::default();
        let caller = account("Taro", Department::Development, None);
        let row = message_row(Uuid::new_v4(), Some(caller.account_id), 1);
        let message_id = row.id;
        ctx.store.seed(row);

        delete(&ctx, &caller, message_id).await.unwrap();
        let refetched = messages::fetch_one(&ctx, message_id).await.unwrap();
        assert!(refetched.is_none());
    }

    #[tokio::test]
    async fn delete_rejects_non_owner() {
        let ctx = TestContext::default();
        let caller = account("Taro", Department::Development, None);
        let row = message_row(Uuid::new_v4(), Some(Uuid::new_v4()), 1);
        let message_id = row.id;
        ctx.store.seed(row);

        let result = delete(&ctx, &caller, message_id).await;
        assert!(matches!(result, Err(AppError::MessagesNotOwned)));
        assert_eq!(ctx.store.rows().len(), 1);
    }
}
