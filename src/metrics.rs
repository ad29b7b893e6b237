use std::sync::OnceLock;

use metrics::{counter, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus exporter and register all application metrics.
/// Returns a `PrometheusHandle` whose `render()` method produces the
/// text/plain Prometheus scrape payload. Only one recorder can exist per
/// process, so repeated calls hand back the same handle.
pub fn init_metrics() -> PrometheusHandle {
    HANDLE.get_or_init(install).clone()
}

fn install() -> PrometheusHandle {
    let builder = PrometheusBuilder::new();
    let handle = builder
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // Pre-register counters so they appear even before the first increment.
    counter!("registrations_received").absolute(0);
    counter!("orders_created").absolute(0);
    counter!("finance_entries_created").absolute(0);
    counter!("finance_entries_updated").absolute(0);
    counter!("documents_uploaded").absolute(0);
    counter!("duplicate_finance_links_rejected").absolute(0);

    // Pre-register gauges at zero.
    gauge!("cars_available").set(0.0);

    handle
}
