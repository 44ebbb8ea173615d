use prometheus::{
    Encoder, GaugeVec, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};

use crate::models::payout::CourierPayout;

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub report_requests_total: IntCounterVec,
    pub report_latency_seconds: HistogramVec,
    pub courier_payout: GaugeVec,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let report_requests_total = IntCounterVec::new(
            Opts::new("report_requests_total", "Total report requests by report and outcome"),
            &["report", "outcome"],
        )
        .expect("valid report_requests_total metric");

        let report_latency_seconds = HistogramVec::new(
            HistogramOpts::new(
                "report_latency_seconds",
                "Latency of report computation in seconds",
            ),
            &["report"],
        )
        .expect("valid report_latency_seconds metric");

        let courier_payout = GaugeVec::new(
            Opts::new("courier_payout", "Pay owed to a courier at the last bulk payout"),
            &["courier_id"],
        )
        .expect("valid courier_payout metric");

        registry
            .register(Box::new(report_requests_total.clone()))
            .expect("register report_requests_total");
        registry
            .register(Box::new(report_latency_seconds.clone()))
            .expect("register report_latency_seconds");
        registry
            .register(Box::new(courier_payout.clone()))
            .expect("register courier_payout");

        Self {
            registry,
            report_requests_total,
            report_latency_seconds,
            courier_payout,
        }
    }

    pub fn record_payouts<'a>(&self, payouts: impl IntoIterator<Item = &'a CourierPayout>) {
        self.courier_payout.reset();
        for payout in payouts {
            self.courier_payout
                .with_label_values(&[&payout.courier_id.to_string()])
                .set(payout.pay);
        }
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
