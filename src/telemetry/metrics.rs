//! Prometheus metrics

/// Gauge metric types
#[derive(Debug, Clone, Copy)]
pub enum GaugeMetric {
    /// Mark-to-market equity in USDT
    Equity,
    /// Switches executed today
    SwitchesToday,
    /// Assets currently eligible for leadership
    EligibleAssets,
    /// Confirmation counter
    ConfirmCount,
}

/// Counter metric types
#[derive(Debug, Clone, Copy)]
pub enum CounterMetric {
    /// Executed switches
    Switches,
    /// Failed price fetches
    FeedErrors,
    /// Rejected out-of-order samples
    StaleSamples,
}

/// Set a gauge value
pub fn set_gauge(metric: GaugeMetric, value: f64) {
    let name = match metric {
        GaugeMetric::Equity => "rotator_equity_usdt",
        GaugeMetric::SwitchesToday => "rotator_switches_today",
        GaugeMetric::EligibleAssets => "rotator_eligible_assets",
        GaugeMetric::ConfirmCount => "rotator_confirm_count",
    };
    metrics::gauge!(name).set(value);
}

/// Increment a counter
pub fn increment_counter(metric: CounterMetric) {
    let name = match metric {
        CounterMetric::Switches => "rotator_switches_total",
        CounterMetric::FeedErrors => "rotator_feed_errors_total",
        CounterMetric::StaleSamples => "rotator_stale_samples_total",
    };
    metrics::counter!(name).increment(1);
}
