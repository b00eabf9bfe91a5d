use crate::common::context::Context;
use crate::models::accounts::{Account, PeerProfile};
use crate::repositories::accounts;
use hashbrown::{HashMap, HashSet};
use uuid::Uuid;

/// Resolves profile attributes for a set of account ids in one batched
/// directory pass. Ids are deduplicated first, so the work is proportional
/// to the number of distinct ids, not to the message count that produced
/// them. Never fails: ids that cannot be resolved are simply absent from the
/// mapping and the affected records render with defaults.
pub async fn resolve<C: Context>(
    ctx: &C,
    ids: impl IntoIterator<Item = Uuid>,
) -> HashMap<Uuid, PeerProfile> {
    let unique: HashSet<Uuid> = ids.into_iter().collect();
    if unique.is_empty() {
        return HashMap::new();
    }
    let unique: Vec<Uuid> = unique.into_iter().collect();
    match accounts::fetch_many(ctx, &unique).await {
        Ok(records) => records
            .into_iter()
            .map(|(id, record)| (id, PeerProfile::from(Account::from(record))))
            .collect(),
        Err(e) => {
            tracing::error!("sender enrichment failed, rendering defaults: {e}");
            HashMap::new()
        }
    }
}
