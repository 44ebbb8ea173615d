use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::models::account::Account;
use crate::models::courier::Courier;
use crate::models::kitchen_worker::KitchenWorker;
use crate::models::order::Order;
use crate::store::StoreError;

/// A full data set as exported from the platform database.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub couriers: Vec<Courier>,
    #[serde(default)]
    pub kitchen_workers: Vec<KitchenWorker>,
    #[serde(default)]
    pub orders: Vec<Order>,
}

pub async fn load_snapshot(path: &Path) -> Result<Snapshot, StoreError> {
    let raw = tokio::fs::read_to_string(path).await?;
    let snapshot = serde_json::from_str(&raw)?;
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::load_snapshot;
    use crate::models::account::Role;
    use crate::store::StoreError;

    #[tokio::test]
    async fn loads_snapshot_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "accounts": [{{
                    "id": 1,
                    "username": "dan",
                    "email": "dan@example.com",
                    "role": "courier",
                    "registered_at": "2024-05-01T10:00:00Z"
                }}],
                "couriers": [{{ "id": 1, "rating": 4.5, "location": "52.52, 13.40" }}],
                "orders": [{{
                    "id": 7,
                    "price": 12.5,
                    "weight": 0.8,
                    "created_at": "2024-05-01T12:00:00Z",
                    "location": "52.50, 13.38",
                    "courier_id": 1,
                    "status": {{ "delivered": true }}
                }}]
            }}"#
        )
        .unwrap();

        let snapshot = load_snapshot(file.path()).await.unwrap();
        assert_eq!(snapshot.accounts[0].role, Role::Courier);
        assert_eq!(snapshot.couriers[0].rate, Some(0.10));
        assert!(snapshot.kitchen_workers.is_empty());
        assert!(snapshot.orders[0].status.delivered);
        assert!(!snapshot.orders[0].status.prepared);
        assert!(snapshot.orders[0].items.is_empty());
    }

    #[tokio::test]
    async fn bundled_example_snapshot_loads() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("data")
            .join("snapshot.example.json");

        let snapshot = load_snapshot(&path).await.unwrap();
        assert_eq!(snapshot.couriers.len(), 2);
        assert_eq!(snapshot.couriers[1].rating, None);
        assert_eq!(snapshot.couriers[1].rate, Some(0.2));
        assert_eq!(snapshot.orders[0].items[0].quantity, 2);
    }

    #[tokio::test]
    async fn malformed_snapshot_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ \"couriers\": 3 }}").unwrap();

        let err = load_snapshot(file.path()).await.unwrap_err();
        assert!(matches!(err, StoreError::Snapshot(_)));
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let err = load_snapshot(std::path::Path::new("/nonexistent/snapshot.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
    }
}
