pub mod memory;
pub mod snapshot;

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::models::account::{Account, AccountId};
use crate::models::courier::{Courier, CourierId};
use crate::models::kitchen_worker::KitchenWorkerLoad;
use crate::models::order::OrderCharge;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("query failed: {0}")]
    Query(String),

    #[error("failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct StoreCounts {
    pub couriers: usize,
    pub kitchen_workers: usize,
    pub orders: usize,
}

/// Read contract the reporting core needs from the data store.
///
/// Ranked queries order by `engine::ranking::courier_rank_order` and
/// `engine::ranking::worker_rank_order`. Order lists come back sorted by order id,
/// both per courier and in the grouped bulk read, so that folds over them agree.
#[async_trait]
pub trait ReportStore: Send + Sync {
    async fn couriers_by_rating(&self, limit: Option<usize>) -> Result<Vec<Courier>, StoreError>;

    async fn kitchen_workers_by_order_count(
        &self,
        limit: Option<usize>,
    ) -> Result<Vec<KitchenWorkerLoad>, StoreError>;

    async fn orders_for_courier(
        &self,
        courier_id: CourierId,
    ) -> Result<Vec<OrderCharge>, StoreError>;

    /// Every courier, ordered by id.
    async fn all_couriers(&self) -> Result<Vec<Courier>, StoreError>;

    /// All courier-assigned orders in one read, grouped by courier id.
    async fn orders_by_courier(&self) -> Result<HashMap<CourierId, Vec<OrderCharge>>, StoreError>;

    async fn courier(&self, id: CourierId) -> Result<Option<Courier>, StoreError>;

    async fn account(&self, id: AccountId) -> Result<Option<Account>, StoreError>;

    async fn counts(&self) -> Result<StoreCounts, StoreError>;
}
