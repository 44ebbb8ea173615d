use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::account::AccountId;
use crate::models::courier::CourierId;
use crate::models::kitchen_worker::KitchenWorkerId;

pub type OrderId = i64;

/// Two independent fulfillment flags; every combination is representable.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderStatus {
    #[serde(default)]
    pub prepared: bool,
    #[serde(default)]
    pub delivered: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    pub dish_id: i64,
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub price: f64,
    pub weight: f64,
    pub created_at: DateTime<Utc>,
    pub location: String,
    #[serde(default)]
    pub courier_id: Option<CourierId>,
    #[serde(default)]
    pub kitchen_worker_id: Option<KitchenWorkerId>,
    #[serde(default)]
    pub customer_id: Option<AccountId>,
    #[serde(default)]
    pub expected_delivery_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub delivered_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub status: OrderStatus,
}

impl Order {
    pub fn charge(&self) -> OrderCharge {
        OrderCharge {
            order_id: self.id,
            price: self.price,
            delivered: self.status.delivered,
        }
    }
}

/// The slice of an order the payout calculation reads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderCharge {
    pub order_id: OrderId,
    pub price: f64,
    pub delivered: bool,
}
