//! [`SinkProvider`] implementation for OpenTelemetry logger providers.
//!
//! ```no_run
//! use opentelemetry_appender_attrs::{otel::OtelSinkProvider, LogBridge};
//! use opentelemetry_sdk::logs::SdkLoggerProvider;
//!
//! let provider = SdkLoggerProvider::builder().build();
//! let bridge = LogBridge::builder("my-app")
//!     .with_provider(OtelSinkProvider::new(provider))
//!     .build();
//! ```
use crate::{
    error::EmitResult,
    sink::{EnabledParameters, LogRecord, Sink, SinkProvider},
};
use opentelemetry::{
    logs::{LogRecord as _, Logger, LoggerProvider},
    Context, InstrumentationScope,
};
use std::{fmt, sync::Arc};

/// Adapts an OpenTelemetry [`LoggerProvider`] to the [`SinkProvider`]
/// contract.
pub struct OtelSinkProvider<P> {
    provider: P,
}

impl<P> OtelSinkProvider<P>
where
    P: LoggerProvider + Send + Sync,
    P::Logger: Send + Sync + 'static,
{
    /// Wraps `provider`.
    pub fn new(provider: P) -> Self {
        OtelSinkProvider { provider }
    }
}

impl<P> fmt::Debug for OtelSinkProvider<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OtelSinkProvider").finish_non_exhaustive()
    }
}

impl<P> SinkProvider for OtelSinkProvider<P>
where
    P: LoggerProvider + Send + Sync,
    P::Logger: Send + Sync + 'static,
{
    fn sink(&self, scope: InstrumentationScope) -> Arc<dyn Sink> {
        let target = scope.name().to_owned();
        Arc::new(OtelSink {
            logger: self.provider.logger_with_scope(scope),
            target,
        })
    }
}

struct OtelSink<L> {
    logger: L,
    target: String,
}

impl<L> fmt::Debug for OtelSink<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OtelSink")
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

impl<L> Sink for OtelSink<L>
where
    L: Logger + Send + Sync,
{
    fn enabled(&self, cx: &Context, params: &EnabledParameters) -> bool {
        #[cfg(feature = "spec_unstable_logs_enabled")]
        if let Some(severity) = params.severity() {
            let _guard = cx.clone().attach();
            return self.logger.event_enabled(severity, &self.target, None);
        }
        let _ = (cx, params);
        true
    }

    fn emit(&self, cx: &Context, mut record: LogRecord) -> EmitResult {
        let mut log_record = self.logger.create_log_record();
        if let Some(timestamp) = record.timestamp() {
            log_record.set_timestamp(timestamp);
        }
        if let Some(timestamp) = record.observed_timestamp() {
            log_record.set_observed_timestamp(timestamp);
        }
        if let Some(severity) = record.severity_number() {
            log_record.set_severity_number(severity);
            log_record.set_severity_text(severity.name().into());
        }
        if let Some(body) = record.take_body() {
            log_record.set_body(body);
        }
        log_record.add_attributes(record.into_attributes());

        // The SDK reads the active span from the current context.
        let _guard = cx.clone().attach();
        self.logger.emit(log_record);
        Ok(())
    }
}
