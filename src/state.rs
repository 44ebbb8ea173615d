use std::sync::Arc;
use std::time::Duration;

use crate::engine::payout::PayoutPolicy;
use crate::observability::metrics::Metrics;
use crate::store::ReportStore;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

pub struct AppState {
    pub store: Arc<dyn ReportStore>,
    pub payout_policy: PayoutPolicy,
    pub request_timeout: Duration,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(store: Arc<dyn ReportStore>) -> Self {
        Self {
            store,
            payout_policy: PayoutPolicy::default(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            metrics: Metrics::new(),
        }
    }

    pub fn with_payout_policy(mut self, policy: PayoutPolicy) -> Self {
        self.payout_policy = policy;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
