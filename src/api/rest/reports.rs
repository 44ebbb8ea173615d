use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use axum::Json;
use axum::Router;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::routing::get;
use serde::Serialize;
use tracing::error;

use crate::engine::payout::{pay_for_all, payout_for};
use crate::engine::ranking::{top_courier, top_kitchen_worker};
use crate::error::AppError;
use crate::models::account::AccountId;
use crate::models::courier::{Courier, CourierId};
use crate::models::kitchen_worker::KitchenWorkerLoad;
use crate::models::payout::CourierPayout;
use crate::state::AppState;
use crate::store::{ReportStore, StoreError};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/reports", get(report_summary))
        .route("/reports/top-courier", get(get_top_courier))
        .route("/reports/top-kitchen-worker", get(get_top_kitchen_worker))
        .route("/reports/payouts", get(list_payouts))
        .route("/reports/payouts/:courier_id", get(get_payout))
}

#[derive(Serialize)]
pub struct ReportSummary {
    pub top_courier: Option<Courier>,
    pub top_courier_name: Option<String>,
    pub top_kitchen_worker: Option<KitchenWorkerLoad>,
    pub top_kitchen_worker_name: Option<String>,
}

async fn observed<T, F>(state: &AppState, report: &'static str, fut: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, AppError>>,
{
    let start = Instant::now();
    let result = fut.await;
    let outcome = if result.is_ok() { "success" } else { "error" };

    state
        .metrics
        .report_latency_seconds
        .with_label_values(&[report])
        .observe(start.elapsed().as_secs_f64());
    state
        .metrics
        .report_requests_total
        .with_label_values(&[report, outcome])
        .inc();

    if let Err(err) = &result {
        error!(report, error = %err, "report failed");
    }

    result
}

async fn username(store: &dyn ReportStore, id: AccountId) -> Result<Option<String>, StoreError> {
    Ok(store.account(id).await?.map(|account| account.username))
}

async fn report_summary(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ReportSummary>, AppError> {
    observed(&state, "summary", async {
        let store = state.store.as_ref();
        let (courier, worker) = tokio::try_join!(top_courier(store), top_kitchen_worker(store))?;

        let top_courier_name = match &courier {
            Some(courier) => username(store, courier.id).await?,
            None => None,
        };
        let top_kitchen_worker_name = match &worker {
            Some(load) => username(store, load.worker.id).await?,
            None => None,
        };

        Ok(Json(ReportSummary {
            top_courier: courier,
            top_courier_name,
            top_kitchen_worker: worker,
            top_kitchen_worker_name,
        }))
    })
    .await
}

async fn get_top_courier(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Option<Courier>>, AppError> {
    observed(&state, "top_courier", async {
        Ok(Json(top_courier(state.store.as_ref()).await?))
    })
    .await
}

async fn get_top_kitchen_worker(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Option<KitchenWorkerLoad>>, AppError> {
    observed(&state, "top_kitchen_worker", async {
        Ok(Json(top_kitchen_worker(state.store.as_ref()).await?))
    })
    .await
}

async fn list_payouts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CourierPayout>>, AppError> {
    observed(&state, "payouts", async {
        let payouts = pay_for_all(state.store.as_ref(), state.payout_policy).await?;
        state.metrics.record_payouts(payouts.values());
        Ok(Json(payouts.into_values().collect()))
    })
    .await
}

async fn get_payout(
    State(state): State<Arc<AppState>>,
    courier_id: Result<Path<CourierId>, PathRejection>,
) -> Result<Json<CourierPayout>, AppError> {
    observed(&state, "courier_payout", async {
        let Path(courier_id) = courier_id.map_err(|rejection| {
            AppError::BadRequest(format!("invalid courier id: {rejection}"))
        })?;

        let courier = state
            .store
            .courier(courier_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("courier {} not found", courier_id)))?;

        let payout = payout_for(state.store.as_ref(), &courier, state.payout_policy).await?;
        Ok(Json(payout))
    })
    .await
}
