use crate::common::context::Context;
use crate::common::error::{AppError, ServiceResult, unexpected};
use crate::entities::messages::NewMessageRow;
use crate::models::accounts::Account;
use crate::models::messages::{Message, MessageDraft, text_within_bounds};
use crate::repositories::{accounts, messages};

/// Validates a draft and performs exactly one insert. All checks run before
/// any write: text bounds, the sender's display-name precondition, style
/// eligibility, and recipient existence in the directory.
pub async fn send<C: Context>(
    ctx: &C,
    sender: &Account,
    draft: MessageDraft,
) -> ServiceResult<Message> {
    if !text_within_bounds(&draft.message) {
        return Err(AppError::MessagesInvalidLength);
    }
    let Some(sender_name) = sender.display_name.clone() else {
        return Err(AppError::AccountsDisplayNameMissing);
    };
    if !draft.card_style.style().eligible_for(sender) {
        return Err(AppError::StylesNotEligible);
    }
    match accounts::fetch_one(ctx, draft.recipient_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Err(AppError::AccountsNotFound),
        Err(e) => return unexpected(e),
    }

    let row = NewMessageRow {
        recipient_id: draft.recipient_id,
        sender_id: sender.account_id,
        sender_name,
        message: draft.message,
        card_style: draft.card_style.as_str().to_owned(),
        card_shape: draft.card_shape.as_str().to_owned(),
    };
    match messages::insert(ctx, &row).await {
        Ok(stored) => Ok(Message::from(stored)),
        Err(e) => unexpected(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::testing::{TestContext, account, account_record};
    use crate::models::accounts::{Department, Role};
    use crate::models::cards::{CardShape, CardStyleId};
    use crate::models::messages::MAX_MESSAGE_LENGTH;
    use std::sync::atomic::Ordering;
    use uuid::Uuid;

    fn draft(recipient_id: Uuid, message: &str) -> MessageDraft {
        MessageDraft {
            recipient_id,
            message: message.to_owned(),
            card_style: CardStyleId::Azure,
            card_shape: CardShape::Heart,
        }
    }

    fn seeded_recipient(ctx: &TestContext) -> Uuid {
        let record = account_record(Some("Recipient"), Some("operations"), None);
        let id = record.id;
        ctx.directory.insert(record);
        id
    }

    #[tokio::test]
    async fn valid_draft_inserts_exactly_once() {
        let ctx = TestContext::default();
        let recipient = seeded_recipient(&ctx);
        let sender = account("Taro", Department::Development, None);

        let message = send(&ctx, &sender, draft(recipient, "congratulations!"))
            .await
            .unwrap();
        assert_eq!(ctx.store.insert_calls.load(Ordering::SeqCst), 1);
        assert_eq!(message.recipient_id, recipient);
        assert_eq!(message.sender_id, Some(sender.account_id));
        assert_eq!(message.sender_name, "Taro");
        assert_eq!(message.card_style, CardStyleId::Azure);
        assert_eq!(message.card_shape, CardShape::Heart);
    }

    #[tokio::test]
    async fn empty_text_is_rejected_before_any_write() {
        let ctx = TestContext::default();
        let recipient = seeded_recipient(&ctx);
        let sender = account("Taro", Department::Development, None);

        let result = send(&ctx, &sender, draft(recipient, "   \n")).await;
        assert!(matches!(result, Err(AppError::MessagesInvalidLength)));
        assert_eq!(ctx.store.insert_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn overlong_text_is_rejected() {
        let ctx = TestContext::default();
        let recipient = seeded_recipient(&ctx);
        let sender = account("Taro", Department::Development, None);
        let long = "や".repeat(MAX_MESSAGE_LENGTH + 1);

        let result = send(&ctx, &sender, draft(recipient, &long)).await;
        assert!(matches!(result, Err(AppError::MessagesInvalidLength)));
    }

    #[tokio::test]
    async fn missing_display_name_blocks_submission() {
        let ctx = TestContext::default();
        let recipient = seeded_recipient(&ctx);
        let mut sender = account("Taro", Department::Development, None);
        sender.display_name = None;

        let result = send(&ctx, &sender, draft(recipient, "hello")).await;
        assert!(matches!(result, Err(AppError::AccountsDisplayNameMissing)));
        assert_eq!(ctx.store.insert_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn role_restricted_style_is_refused_without_role() {
        let ctx = TestContext::default();
        let recipient = seeded_recipient(&ctx);
        let sender = account("Taro", Department::Development, None);
        let mut executive_draft = draft(recipient, "hello");
        executive_draft.card_style = CardStyleId::Executive;

        let result = send(&ctx, &sender, executive_draft).await;
        assert!(matches!(result, Err(AppError::StylesNotEligible)));
    }

    #[tokio::test]
    async fn role_restricted_style_is_accepted_with_role() {
        let ctx = TestContext::default();
        let recipient = seeded_recipient(&ctx);
        let sender = account("Kaito", Department::ExecutiveBoard, Some(Role::Executive));
        let mut executive_draft = draft(recipient, "well done this year");
        executive_draft.card_style = CardStyleId::Executive;

        let message = send(&ctx, &sender, executive_draft).await.unwrap();
        assert_eq!(message.card_style, CardStyleId::Executive);
    }

    #[tokio::test]
    async fn unknown_recipient_is_rejected() {
        let ctx = TestContext::default();
        let sender = account("Taro", Department::Development, None);

        let result = send(&ctx, &sender, draft(Uuid::new_v4(), "hello")).await;
        assert!(matches!(result, Err(AppError::AccountsNotFound)));
        assert_eq!(ctx.store.insert_calls.load(Ordering::SeqCst), 0);
    }
}
