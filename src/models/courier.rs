use serde::{Deserialize, Serialize};

use crate::models::account::AccountId;

pub type CourierId = AccountId;

pub const DEFAULT_COMMISSION_RATE: f64 = 0.10;

fn default_rate() -> Option<f64> {
    Some(DEFAULT_COMMISSION_RATE)
}

/// A courier row as exposed by the data store.
///
/// `rate` defaults to [`DEFAULT_COMMISSION_RATE`] when a record omits it, while an
/// explicit `null` is kept as `None` and pays nothing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Courier {
    pub id: CourierId,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default = "default_rate")]
    pub rate: Option<f64>,
    #[serde(default)]
    pub number_of_marks: u32,
    pub location: String,
}

impl Courier {
    pub fn new(id: CourierId, location: impl Into<String>) -> Self {
        Self {
            id,
            rating: None,
            rate: default_rate(),
            number_of_marks: 0,
            location: location.into(),
        }
    }

    /// Rating used for ranking: unrated couriers rank as zero.
    pub fn ranking_rating(&self) -> f64 {
        self.rating.filter(|rating| rating.is_finite()).unwrap_or(0.0)
    }

    pub fn commission_rate(&self) -> f64 {
        self.rate.unwrap_or(0.0)
    }
}
