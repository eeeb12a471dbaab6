use metrics::{counter, describe_counter};
use std::sync::Once;

static DESCRIBE: Once = Once::new();

pub fn describe_metrics() {
    DESCRIBE.call_once(|| {
        describe_counter!(
            "orders_charge_invocations_total",
            "Charge invocations sent through the sidecar, by outcome"
        );
    });
}

/// Record the outcome of one charge invocation.
pub fn record_invocation(target: &str, outcome: &'static str) {
    counter!(
        "orders_charge_invocations_total",
        "target" => target.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}
