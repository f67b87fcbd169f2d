//! run with `$ cargo run --example basic`

use opentelemetry_appender_attrs::{
    error, global, info, otel::OtelSinkProvider, Attr, LogBridge, Logger, Value,
};
use opentelemetry_sdk::{logs::SdkLoggerProvider, Resource};
use std::{error::Error, time::Duration};

fn main() -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
    let exporter = opentelemetry_stdout::LogExporter::default();
    let provider = SdkLoggerProvider::builder()
        .with_resource(
            Resource::builder()
                .with_service_name("log-appender-attrs-example")
                .build(),
        )
        .with_simple_exporter(exporter)
        .build();
    global::set_sink_provider(OtelSinkProvider::new(provider.clone()));

    let logger = Logger::new(LogBridge::builder("my-system").with_source(true).build());
    let request = logger
        .with([Attr::new("request_id", "0f3a")])
        .with_group("http");

    info!(request, "request served", "status" => 200, "elapsed" => Duration::from_millis(12))?;
    error!(
        logger,
        "lookup failed",
        "user" => Value::group([Attr::new("name", "otel"), Attr::new("email", "otel@opentelemetry.io")]),
        "retries" => 3u8
    )?;

    provider.shutdown()?;
    Ok(())
}
