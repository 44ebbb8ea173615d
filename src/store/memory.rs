use std::collections::HashMap;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::engine::ranking::{courier_rank_order, worker_rank_order};
use crate::models::account::{Account, AccountId};
use crate::models::courier::{Courier, CourierId};
use crate::models::kitchen_worker::{KitchenWorker, KitchenWorkerId, KitchenWorkerLoad};
use crate::models::order::{Order, OrderCharge, OrderId};
use crate::store::snapshot::Snapshot;
use crate::store::{ReportStore, StoreCounts, StoreError};

/// Snapshot-backed store. Reads never block each other; writes exist only to load data.
#[derive(Default)]
pub struct MemoryStore {
    accounts: DashMap<AccountId, Account>,
    couriers: DashMap<CourierId, Courier>,
    kitchen_workers: DashMap<KitchenWorkerId, KitchenWorker>,
    orders: DashMap<OrderId, Order>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let store = Self::new();
        for account in snapshot.accounts {
            store.insert_account(account);
        }
        for courier in snapshot.couriers {
            store.insert_courier(courier);
        }
        for worker in snapshot.kitchen_workers {
            store.insert_kitchen_worker(worker);
        }
        for order in snapshot.orders {
            store.insert_order(order);
        }
        store
    }

    pub fn insert_account(&self, account: Account) {
        self.accounts.insert(account.id, account);
    }

    pub fn insert_courier(&self, courier: Courier) {
        self.couriers.insert(courier.id, courier);
    }

    pub fn insert_kitchen_worker(&self, worker: KitchenWorker) {
        self.kitchen_workers.insert(worker.id, worker);
    }

    pub fn insert_order(&self, order: Order) {
        self.orders.insert(order.id, order);
    }

    /// Removes a courier together with the orders assigned to it.
    pub fn remove_courier(&self, id: CourierId) -> Option<Courier> {
        let (_, courier) = self.couriers.remove(&id)?;
        self.orders.retain(|_, order| order.courier_id != Some(id));
        Some(courier)
    }
}

fn truncate<T>(mut rows: Vec<T>, limit: Option<usize>) -> Vec<T> {
    if let Some(limit) = limit {
        rows.truncate(limit);
    }
    rows
}

#[async_trait]
impl ReportStore for MemoryStore {
    async fn couriers_by_rating(&self, limit: Option<usize>) -> Result<Vec<Courier>, StoreError> {
        let mut couriers: Vec<Courier> = self
            .couriers
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        couriers.sort_by(courier_rank_order);
        Ok(truncate(couriers, limit))
    }

    async fn kitchen_workers_by_order_count(
        &self,
        limit: Option<usize>,
    ) -> Result<Vec<KitchenWorkerLoad>, StoreError> {
        let mut counts: HashMap<KitchenWorkerId, usize> = HashMap::new();
        for entry in self.orders.iter() {
            if let Some(worker_id) = entry.value().kitchen_worker_id {
                *counts.entry(worker_id).or_default() += 1;
            }
        }

        let mut loads: Vec<KitchenWorkerLoad> = self
            .kitchen_workers
            .iter()
            .map(|entry| KitchenWorkerLoad {
                worker: entry.value().clone(),
                order_count: counts.get(entry.key()).copied().unwrap_or(0),
            })
            .collect();
        loads.sort_by(worker_rank_order);
        Ok(truncate(loads, limit))
    }

    async fn orders_for_courier(
        &self,
        courier_id: CourierId,
    ) -> Result<Vec<OrderCharge>, StoreError> {
        let mut charges: Vec<OrderCharge> = self
            .orders
            .iter()
            .filter(|entry| entry.value().courier_id == Some(courier_id))
            .map(|entry| entry.value().charge())
            .collect();
        charges.sort_by_key(|charge| charge.order_id);
        Ok(charges)
    }

    async fn all_couriers(&self) -> Result<Vec<Courier>, StoreError> {
        let mut couriers: Vec<Courier> = self
            .couriers
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        couriers.sort_by_key(|courier| courier.id);
        Ok(couriers)
    }

    async fn orders_by_courier(&self) -> Result<HashMap<CourierId, Vec<OrderCharge>>, StoreError> {
        let mut grouped: HashMap<CourierId, Vec<OrderCharge>> = HashMap::new();
        for entry in self.orders.iter() {
            let order = entry.value();
            if let Some(courier_id) = order.courier_id {
                grouped.entry(courier_id).or_default().push(order.charge());
            }
        }
        for charges in grouped.values_mut() {
            charges.sort_by_key(|charge| charge.order_id);
        }
        Ok(grouped)
    }

    async fn courier(&self, id: CourierId) -> Result<Option<Courier>, StoreError> {
        Ok(self.couriers.get(&id).map(|entry| entry.value().clone()))
    }

    async fn account(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        Ok(self.accounts.get(&id).map(|entry| entry.value().clone()))
    }

    async fn counts(&self) -> Result<StoreCounts, StoreError> {
        Ok(StoreCounts {
            couriers: self.couriers.len(),
            kitchen_workers: self.kitchen_workers.len(),
            orders: self.orders.len(),
        })
    }
}
