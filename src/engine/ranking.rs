use std::cmp::Ordering;

use tracing::debug;

use crate::models::courier::Courier;
use crate::models::kitchen_worker::KitchenWorkerLoad;
use crate::store::{ReportStore, StoreError};

/// Higher coalesced rating first, lower id on ties.
pub fn courier_rank_order(a: &Courier, b: &Courier) -> Ordering {
    b.ranking_rating()
        .total_cmp(&a.ranking_rating())
        .then_with(|| a.id.cmp(&b.id))
}

/// More assigned orders first, lower id on ties.
pub fn worker_rank_order(a: &KitchenWorkerLoad, b: &KitchenWorkerLoad) -> Ordering {
    b.order_count
        .cmp(&a.order_count)
        .then_with(|| a.worker.id.cmp(&b.worker.id))
}

pub async fn top_courier(store: &dyn ReportStore) -> Result<Option<Courier>, StoreError> {
    let top = store.couriers_by_rating(Some(1)).await?.into_iter().next();

    debug!(
        courier_id = ?top.as_ref().map(|courier| courier.id),
        rating = ?top.as_ref().and_then(|courier| courier.rating),
        "top courier resolved"
    );

    Ok(top)
}

pub async fn top_kitchen_worker(
    store: &dyn ReportStore,
) -> Result<Option<KitchenWorkerLoad>, StoreError> {
    let top = store
        .kitchen_workers_by_order_count(Some(1))
        .await?
        .into_iter()
        .next();

    debug!(
        worker_id = ?top.as_ref().map(|load| load.worker.id),
        order_count = ?top.as_ref().map(|load| load.order_count),
        "top kitchen worker resolved"
    );

    Ok(top)
}
