use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::models::courier::{Courier, CourierId};
use crate::models::order::OrderCharge;
use crate::models::payout::CourierPayout;
use crate::store::{ReportStore, StoreError};

/// Which assigned orders count toward a courier's pay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PayoutPolicy {
    /// Every order ever assigned, whatever its delivery status.
    #[default]
    AllAssigned,
    DeliveredOnly,
}

impl PayoutPolicy {
    fn counts(self, charge: &OrderCharge) -> bool {
        match self {
            PayoutPolicy::AllAssigned => true,
            PayoutPolicy::DeliveredOnly => charge.delivered,
        }
    }
}

impl FromStr for PayoutPolicy {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "all_assigned" => Ok(PayoutPolicy::AllAssigned),
            "delivered_only" => Ok(PayoutPolicy::DeliveredOnly),
            other => Err(format!(
                "unknown payout policy: {other}, expected all_assigned/delivered_only"
            )),
        }
    }
}

impl fmt::Display for PayoutPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayoutPolicy::AllAssigned => f.write_str("all_assigned"),
            PayoutPolicy::DeliveredOnly => f.write_str("delivered_only"),
        }
    }
}

/// Folds a courier's orders into its payout. Charges must be in order-id order.
pub fn settle(courier: &Courier, charges: &[OrderCharge], policy: PayoutPolicy) -> CourierPayout {
    let rate = courier.commission_rate();

    let (orders, pay) = charges
        .iter()
        .filter(|charge| policy.counts(charge))
        .fold((0usize, 0.0f64), |(orders, pay), charge| {
            (orders + 1, pay + charge.price * rate)
        });

    CourierPayout {
        courier_id: courier.id,
        rate,
        orders,
        pay,
    }
}

pub async fn payout_for(
    store: &dyn ReportStore,
    courier: &Courier,
    policy: PayoutPolicy,
) -> Result<CourierPayout, StoreError> {
    let charges = store.orders_for_courier(courier.id).await?;
    let payout = settle(courier, &charges, policy);

    debug!(
        courier_id = courier.id,
        orders = payout.orders,
        pay = payout.pay,
        "courier payout computed"
    );

    Ok(payout)
}

pub async fn pay_for(
    store: &dyn ReportStore,
    courier: Option<&Courier>,
    policy: PayoutPolicy,
) -> Result<f64, StoreError> {
    match courier {
        Some(courier) => Ok(payout_for(store, courier, policy).await?.pay),
        None => Ok(0.0),
    }
}

/// Payouts for every courier from two store reads, keyed by courier id.
pub async fn pay_for_all(
    store: &dyn ReportStore,
    policy: PayoutPolicy,
) -> Result<BTreeMap<CourierId, CourierPayout>, StoreError> {
    let couriers = store.all_couriers().await?;
    let mut grouped = store.orders_by_courier().await?;

    let payouts: BTreeMap<CourierId, CourierPayout> = couriers
        .iter()
        .map(|courier| {
            let charges = grouped.remove(&courier.id).unwrap_or_default();
            (courier.id, settle(courier, &charges, policy))
        })
        .collect();

    debug!(couriers = payouts.len(), %policy, "payouts computed");
    Ok(payouts)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::{PayoutPolicy, pay_for, pay_for_all, payout_for};
    use crate::models::courier::Courier;
    use crate::models::order::{Order, OrderStatus};
    use crate::store::memory::MemoryStore;

    fn courier(id: i64, rate: f64) -> Courier {
        Courier {
            id,
            rating: Some(4.0),
            rate: Some(rate),
            number_of_marks: 3,
            location: "48.85, 2.35".to_string(),
        }
    }

    fn order(id: i64, price: f64, courier_id: i64, delivered: bool) -> Order {
        Order {
            id,
            price,
            weight: 2.0,
            created_at: Utc::now(),
            location: "48.86, 2.34".to_string(),
            courier_id: Some(courier_id),
            kitchen_worker_id: None,
            customer_id: Some(100),
            expected_delivery_at: None,
            delivered_at: None,
            items: Vec::new(),
            status: OrderStatus {
                prepared: true,
                delivered,
            },
        }
    }

    #[tokio::test]
    async fn pay_is_rate_times_order_prices() {
        let store = MemoryStore::new();
        let dan = courier(1, 0.1);
        store.insert_courier(dan.clone());
        store.insert_order(order(1, 10.0, 1, true));
        store.insert_order(order(2, 20.0, 1, false));

        let pay = pay_for(&store, Some(&dan), PayoutPolicy::AllAssigned)
            .await
            .unwrap();
        assert!((pay - 3.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn absent_courier_and_idle_courier_earn_nothing() {
        let store = MemoryStore::new();
        let idle = courier(1, 0.3);
        store.insert_courier(idle.clone());

        assert_eq!(
            pay_for(&store, None, PayoutPolicy::AllAssigned).await.unwrap(),
            0.0
        );
        assert_eq!(
            pay_for(&store, Some(&idle), PayoutPolicy::AllAssigned)
                .await
                .unwrap(),
            0.0
        );
    }

    #[tokio::test]
    async fn null_rate_pays_nothing() {
        let store = MemoryStore::new();
        let mut unpaid = courier(1, 0.1);
        unpaid.rate = None;
        store.insert_courier(unpaid.clone());
        store.insert_order(order(1, 50.0, 1, true));

        let payout = payout_for(&store, &unpaid, PayoutPolicy::AllAssigned)
            .await
            .unwrap();
        assert_eq!(payout.orders, 1);
        assert_eq!(payout.pay, 0.0);
    }

    #[tokio::test]
    async fn negative_prices_flow_into_the_total() {
        let store = MemoryStore::new();
        let dan = courier(1, 0.5);
        store.insert_courier(dan.clone());
        store.insert_order(order(1, 10.0, 1, true));
        store.insert_order(order(2, -4.0, 1, true));

        let pay = pay_for(&store, Some(&dan), PayoutPolicy::AllAssigned)
            .await
            .unwrap();
        assert!((pay - 3.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn delivered_only_policy_skips_open_orders() {
        let store = MemoryStore::new();
        let dan = courier(1, 0.1);
        store.insert_courier(dan.clone());
        store.insert_order(order(1, 10.0, 1, true));
        store.insert_order(order(2, 20.0, 1, false));

        let payout = payout_for(&store, &dan, PayoutPolicy::DeliveredOnly)
            .await
            .unwrap();
        assert_eq!(payout.orders, 1);
        assert!((payout.pay - 1.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn bulk_payouts_match_single_courier_payouts() {
        let store = MemoryStore::new();
        let couriers = [courier(1, 0.1), courier(2, 0.15), courier(3, 0.2)];
        for c in &couriers {
            store.insert_courier(c.clone());
        }
        let prices = [12.3, 7.7, 0.1, 19.99, 3.35, 44.0, 0.3];
        for (idx, price) in prices.iter().enumerate() {
            let courier_id = if idx % 2 == 0 { 1 } else { 2 };
            store.insert_order(order(idx as i64 + 1, *price, courier_id, idx % 3 == 0));
        }

        for policy in [PayoutPolicy::AllAssigned, PayoutPolicy::DeliveredOnly] {
            let all = pay_for_all(&store, policy).await.unwrap();
            assert_eq!(all.len(), 3);
            for c in &couriers {
                let single = pay_for(&store, Some(c), policy).await.unwrap();
                assert_eq!(all[&c.id].pay, single);
            }
            assert_eq!(all[&3].pay, 0.0);
            assert_eq!(all[&3].orders, 0);
        }
    }

    #[tokio::test]
    async fn repeated_bulk_payouts_agree() {
        let store = MemoryStore::new();
        for (id, rate) in [(1, 0.1), (2, 0.25), (3, 0.05), (4, 0.2)] {
            store.insert_courier(courier(id, rate));
        }
        let prices = [9.99, 14.5, 3.2, 27.0, 0.75, 11.1, 6.6, 18.25];
        for (idx, price) in prices.iter().enumerate() {
            let courier_id = (idx % 3) as i64 + 1;
            store.insert_order(order(idx as i64 + 1, *price, courier_id, idx % 2 == 0));
        }

        for policy in [PayoutPolicy::AllAssigned, PayoutPolicy::DeliveredOnly] {
            let first = pay_for_all(&store, policy).await.unwrap();
            let second = pay_for_all(&store, policy).await.unwrap();
            assert_eq!(first, second);
            assert_eq!(first.len(), 4);
        }
    }

    #[tokio::test]
    async fn no_couriers_means_no_payouts() {
        let store = MemoryStore::new();
        let all = pay_for_all(&store, PayoutPolicy::AllAssigned).await.unwrap();
        assert!(all.is_empty());
    }

    #[test]
    fn policy_parses_from_config_strings() {
        assert_eq!(
            "all_assigned".parse::<PayoutPolicy>().unwrap(),
            PayoutPolicy::AllAssigned
        );
        assert_eq!(
            " Delivered_Only ".parse::<PayoutPolicy>().unwrap(),
            PayoutPolicy::DeliveredOnly
        );
        assert!("weekly".parse::<PayoutPolicy>().is_err());
    }
}
