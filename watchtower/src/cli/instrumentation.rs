use clap::Args;
use url::Url;

#[derive(Debug, Clone, Args)]
pub struct InstrumentationCliArgs {
    /// The name of the instrumentation service.
    #[arg(env = "WATCHTOWER_OTEL_SERVICE_NAME", long, default_value = "watchtower")]
    pub otel_service_name: Option<String>,

    /// The endpoint of the collector. Metrics are not exported when unset.
    #[arg(env = "WATCHTOWER_OTEL_COLLECTOR_ENDPOINT", long)]
    pub otel_collector_endpoint: Option<Url>,
}
