use lazy_static::lazy_static;
use prometheus::{
    register_int_counter_vec, register_int_gauge, Encoder, IntCounterVec, IntGauge, TextEncoder,
};

lazy_static! {
    // Game Metrics
    pub static ref GAMES_TOTAL: IntCounterVec = register_int_counter_vec!(
        "games_total",
        "Total number of games by outcome",
        &["outcome"]
    )
    .unwrap();

    pub static ref GAMES_ACTIVE: IntGauge = register_int_gauge!(
        "games_active",
        "Number of games currently waiting for an answer"
    )
    .unwrap();

    pub static ref ANSWERS_SUBMITTED_TOTAL: IntCounterVec = register_int_counter_vec!(
        "answers_submitted_total",
        "Total number of answers submitted",
        &["correct"]
    )
    .unwrap();

    pub static ref LIFELINES_USED_TOTAL: IntCounterVec = register_int_counter_vec!(
        "lifelines_used_total",
        "Total number of lifelines used",
        &["kind"]
    )
    .unwrap();

    pub static ref TIMER_TICKS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "timer_ticks_total",
        "Total number of countdown ticks",
        &["result"]
    )
    .unwrap();

    // Store Metrics
    pub static ref STORE_OPERATIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "store_operations_total",
        "Total number of key-value store operations",
        &["operation", "status"]
    )
    .unwrap();
}

/// Renders all metrics in Prometheus text format
pub fn render_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|e| prometheus::Error::Msg(format!("Failed to convert metrics to UTF-8: {}", e)))
}

/// Helper: count a store operation by result
pub fn track_store_operation<T, E>(operation: &str, result: Result<T, E>) -> Result<T, E> {
    let status = if result.is_ok() { "success" } else { "error" };
    STORE_OPERATIONS_TOTAL
        .with_label_values(&[operation, status])
        .inc();
    result
}
