use opentelemetry::global;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::metrics::{PeriodicReader, SdkMeterProvider};
use opentelemetry_sdk::Resource;
use std::time::Duration;
use tracing::{info, warn};
use url::Url;

use crate::types::params::OTELConfig;
use crate::WatchtowerResult;

const METRICS_EXPORT_INTERVAL: Duration = Duration::from_secs(5);

/// Metrics export for the watchtower
pub struct WatchtowerInstrumentation {
    pub otel_config: OTELConfig,
    pub meter_provider: Option<SdkMeterProvider>,
}

impl WatchtowerInstrumentation {
    pub fn new(config: &OTELConfig) -> WatchtowerResult<Self> {
        match config.endpoint {
            None => {
                warn!("OTEL endpoint is not set. Skipping instrumentation.");
                Ok(Self { otel_config: config.clone(), meter_provider: None })
            }
            Some(ref endpoint) => {
                let meter_provider = Self::instrument_metric_provider(config, endpoint)?;
                info!(endpoint = %endpoint, "OpenTelemetry metrics exporter initialized");
                Ok(Self { otel_config: config.clone(), meter_provider: Some(meter_provider) })
            }
        }
    }

    fn instrument_metric_provider(config: &OTELConfig, endpoint: &Url) -> WatchtowerResult<SdkMeterProvider> {
        let exporter =
            opentelemetry_otlp::MetricExporter::builder().with_tonic().with_endpoint(endpoint.to_string()).build()?;

        let reader = PeriodicReader::builder(exporter).with_interval(METRICS_EXPORT_INTERVAL).build();

        let provider = SdkMeterProvider::builder()
            .with_reader(reader)
            .with_resource(Resource::builder().with_service_name(format!("{}_meter_service", config.service_name)).build())
            .build();

        global::set_meter_provider(provider.clone());
        Ok(provider)
    }

    pub fn shutdown(&self) -> WatchtowerResult<()> {
        match self.meter_provider {
            Some(ref meter_provider) => Ok(meter_provider.shutdown()?),
            None => {
                warn!("OTEL endpoint is not set. Skipping shutdown.");
                Ok(())
            }
        }
    }
}
