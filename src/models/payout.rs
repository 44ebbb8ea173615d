use serde::{Deserialize, Serialize};

use crate::models::courier::CourierId;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CourierPayout {
    pub courier_id: CourierId,
    pub rate: f64,
    pub orders: usize,
    pub pay: f64,
}
