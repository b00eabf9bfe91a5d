use crate::common::context::Context;
use crate::models::feed::{FeedMessage, FeedSort};
use crate::models::messages::Message;
use crate::repositories::messages;
use crate::usecases::enrichment;
use uuid::Uuid;

/// Assembles the inbound feed for a recipient: fetch, enrich, merge, sort.
/// Performs no caching; every call re-fetches and re-resolves, so a repeat
/// call with no intervening writes returns an identical feed.
///
/// A store failure degrades to an empty feed with the cause logged; the
/// feed screen shows "no messages" instead of an error state.
pub async fn assemble<C: Context>(
    ctx: &C,
    recipient_id: Uuid,
    sort: FeedSort,
) -> Vec<FeedMessage> {
    let rows = match messages::fetch_by_recipient(ctx, recipient_id).await {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!(%recipient_id, "loading feed failed: {e}");
            return Vec::new();
        }
    };
    if rows.is_empty() {
        return Vec::new();
    }

    let sender_ids = rows.iter().filter_map(|row| row.sender_id);
    let profiles = enrichment::resolve(ctx, sender_ids).await;

    let mut feed: Vec<FeedMessage> = rows
        .into_iter()
        .map(Message::from)
        .map(|message| {
            let profile = message.sender_id.and_then(|id| profiles.get(&id));
            FeedMessage::merge(message, profile)
        })
        .collect();

    match sort {
        FeedSort::Recency => feed.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        FeedSort::Department => feed.sort_by(|a, b| {
            a.sender_department
                .priority()
                .cmp(&b.sender_department.priority())
                .then(b.created_at.cmp(&a.created_at))
        }),
    }
    feed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::testing::{TestContext, account_record, message_row};
    use crate::models::accounts::Department;
    use std::sync::atomic::Ordering;

    #[tokio::test]
    async fn empty_feed_short_circuits_enrichment() {
        let ctx = TestContext::default();
        let feed = assemble(&ctx, Uuid::new_v4(), FeedSort::Recency).await;
        assert!(feed.is_empty());
        assert_eq!(ctx.directory.batch_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn store_failure_degrades_to_empty_feed() {
        let ctx = TestContext::default();
        let recipient = Uuid::new_v4();
        ctx.store.seed(message_row(recipient, Some(Uuid::new_v4()), 10));
        ctx.store.fail_reads();

        let feed = assemble(&ctx, recipient, FeedSort::Recency).await;
        assert!(feed.is_empty());
    }

    #[tokio::test]
    async fn feed_is_sorted_newest_first() {
        let ctx = TestContext::default();
        let recipient = Uuid::new_v4();
        for age in [300, 5, 120, 45] {
            ctx.store.seed(message_row(recipient, None, age));
        }

        let feed = assemble(&ctx, recipient, FeedSort::Recency).await;
        assert_eq!(feed.len(), 4);
        for pair in feed.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }
    }

    #[tokio::test]
    async fn enrichment_cost_is_bounded_by_distinct_senders() {
        let ctx = TestContext::default();
        let recipient = Uuid::new_v4();
        let alice = account_record(Some("Alice"), Some("development"), None);
        let alice_id = alice.id;
        ctx.directory.insert(alice);
        let bob = account_record(Some("Bob"), Some("finance"), None);
        let bob_id = bob.id;
        ctx.directory.insert(bob);

        for (sender, age) in [(alice_id, 1), (alice_id, 2), (alice_id, 3), (bob_id, 4)] {
            ctx.store.seed(message_row(recipient, Some(sender), age));
        }

        let feed = assemble(&ctx, recipient, FeedSort::Recency).await;
        assert_eq!(feed.len(), 4);
        // 4 messages, 2 distinct senders: exactly 2 lookups in 1 batch.
        assert_eq!(ctx.directory.batch_calls.load(Ordering::SeqCst), 1);
        assert_eq!(ctx.directory.lookup_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failed_sender_lookup_renders_defaults() {
        let ctx = TestContext::default();
        let recipient = Uuid::new_v4();
        let resolved = account_record(Some("Resolved"), Some("operations"), None);
        let resolved_id = resolved.id;
        ctx.directory.insert(resolved);
        let failing_id = Uuid::new_v4();
        ctx.directory.fail_lookups_of(failing_id);

        ctx.store.seed(message_row(recipient, Some(failing_id), 1));
        ctx.store.seed(message_row(recipient, Some(failing_id), 2));
        ctx.store.seed(message_row(recipient, Some(resolved_id), 3));

        let feed = assemble(&ctx, recipient, FeedSort::Recency).await;
        assert_eq!(feed.len(), 3);
        let degraded: Vec<_> = feed
            .iter()
            .filter(|m| m.sender_id == Some(failing_id))
            .collect();
        assert_eq!(degraded.len(), 2);
        for message in degraded {
            assert_eq!(message.sender_department, Department::Unclassified);
            assert_eq!(message.sender_avatar_url, None);
        }
        let enriched = feed
            .iter()
            .find(|m| m.sender_id == Some(resolved_id))
            .unwrap();
        assert_eq!(enriched.sender_department, Department::Operations);
    }

    #[tokio::test]
    async fn repeat_assembly_is_idempotent() {
        let ctx = TestContext::default();
        let recipient = Uuid::new_v4();
        for age in [30, 10, 20] {
            ctx.store.seed(message_row(recipient, None, age));
        }

        let first = assemble(&ctx, recipient, FeedSort::Recency).await;
        let second = assemble(&ctx, recipient, FeedSort::Recency).await;
        let first_ids: Vec<Uuid> = first.iter().map(|m| m.message_id).collect();
        let second_ids: Vec<Uuid> = second.iter().map(|m| m.message_id).collect();
        assert_eq!(first_ids, second_ids);
    }

    #[tokio::test]
    async fn department_sort_groups_by_priority_with_unknown_last() {
        let ctx = TestContext::default();
        let recipient = Uuid::new_v4();
        let exec = account_record(Some("Exec"), Some("executive_board"), None);
        let exec_id = exec.id;
        ctx.directory.insert(exec);
        let general = account_record(Some("General"), Some("general_affairs"), None);
        let general_id = general.id;
        ctx.directory.insert(general);
        let stranger_id = Uuid::new_v4(); // unresolvable, lands in unclassified

        ctx.store.seed(message_row(recipient, Some(general_id), 1));
        ctx.store.seed(message_row(recipient, Some(stranger_id), 2));
        ctx.store.seed(message_row(recipient, Some(exec_id), 3));
        ctx.store.seed(message_row(recipient, Some(exec_id), 4));

        let feed = assemble(&ctx, recipient, FeedSort::Department).await;
        let departments: Vec<Department> = feed.iter().map(|m| m.sender_department).collect();
        assert_eq!(
            departments,
            vec![
                Department::ExecutiveBoard,
                Department::ExecutiveBoard,
                Department::GeneralAffairs,
                Department::Unclassified,
            ]
        );
        // Within a group, newest first.
        assert!(feed[0].created_at >= feed[1].created_at);
    }
}
