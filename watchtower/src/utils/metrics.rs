use once_cell::sync::Lazy;
use opentelemetry::metrics::{Counter, Gauge, Histogram, Meter};
use opentelemetry::{global, KeyValue};

pub static WATCHTOWER_METRICS: Lazy<WatchtowerMetrics> = Lazy::new(WatchtowerMetrics::register);

pub struct WatchtowerMetrics {
    pub reward_interval_gauge: Gauge<u64>,
    pub task_runs: Counter<u64>,
    pub failed_task_runs: Counter<u64>,
    pub background_failures: Counter<u64>,
    pub submissions: Counter<u64>,
    pub skipped_duplicate_submissions: Counter<u64>,
    pub background_run_time: Histogram<f64>,
}

impl WatchtowerMetrics {
    pub fn register() -> Self {
        let meter: Meter = global::meter("crates.watchtower.opentelemetry");

        let reward_interval_gauge = meter
            .u64_gauge("reward_interval")
            .with_description("Index of the reward interval the network is currently in")
            .with_unit("interval")
            .build();

        let task_runs = meter
            .u64_counter("task_runs")
            .with_description("Count of task invocations by the controller")
            .with_unit("runs")
            .build();

        let failed_task_runs = meter
            .u64_counter("failed_task_runs")
            .with_description("Count of task invocations that returned an error")
            .with_unit("runs")
            .build();

        let background_failures = meter
            .u64_counter("background_failures")
            .with_description("Count of failed background executions")
            .with_unit("runs")
            .build();

        let submissions = meter
            .u64_counter("submissions")
            .with_description("Count of transactions submitted")
            .with_unit("transactions")
            .build();

        let skipped_duplicate_submissions = meter
            .u64_counter("skipped_duplicate_submissions")
            .with_description("Count of submissions skipped because the ledger already records them")
            .with_unit("transactions")
            .build();

        let background_run_time = meter
            .f64_histogram("background_run_time")
            .with_description("Duration of background executions")
            .with_unit("s")
            .build();

        Self {
            reward_interval_gauge,
            task_runs,
            failed_task_runs,
            background_failures,
            submissions,
            skipped_duplicate_submissions,
            background_run_time,
        }
    }
}

/// Attribute set identifying a task.
pub fn task_attributes(task: &'static str) -> [KeyValue; 1] {
    [KeyValue::new("task", task)]
}
