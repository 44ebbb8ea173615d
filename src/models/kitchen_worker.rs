use serde::{Deserialize, Serialize};

use crate::models::account::AccountId;

pub type KitchenWorkerId = AccountId;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KitchenWorker {
    pub id: KitchenWorkerId,
}

/// A kitchen worker together with the number of orders assigned to it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KitchenWorkerLoad {
    pub worker: KitchenWorker,
    pub order_count: usize,
}
