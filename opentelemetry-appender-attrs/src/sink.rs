//! The contract between a [`LogBridge`] and the telemetry sink it feeds.
//!
//! A sink is reached only through the three capabilities defined here:
//! obtaining a per-scope handle ([`SinkProvider::sink`]), asking whether a
//! severity is wanted ([`Sink::enabled`]) and handing over a finished record
//! ([`Sink::emit`]). [`OtelSinkProvider`] implements it for any
//! OpenTelemetry `LoggerProvider`.
//!
//! [`LogBridge`]: crate::LogBridge
//! [`OtelSinkProvider`]: crate::otel::OtelSinkProvider
use crate::error::EmitResult;
use opentelemetry::{
    logs::{AnyValue, Severity},
    Context, InstrumentationScope, Key,
};
use std::{borrow::Cow, fmt, sync::Arc, time::SystemTime};

/// Creates [`Sink`]s bound to an instrumentation scope.
pub trait SinkProvider: Send + Sync + fmt::Debug {
    /// Returns the sink for `scope`. Called once per root bridge.
    fn sink(&self, scope: InstrumentationScope) -> Arc<dyn Sink>;
}

/// Receives normalized records.
///
/// Implementations are responsible for their own synchronization; the bridge
/// calls them concurrently from any thread.
pub trait Sink: Send + Sync + fmt::Debug {
    /// Reports whether a record described by `params` would be kept.
    ///
    /// `cx` is the caller's context, passed through untouched so that
    /// context-scoped overrides can be honoured.
    fn enabled(&self, cx: &Context, params: &EnabledParameters) -> bool;

    /// Accepts a finished record.
    fn emit(&self, cx: &Context, record: LogRecord) -> EmitResult;
}

impl<T: SinkProvider + ?Sized> SinkProvider for Arc<T> {
    fn sink(&self, scope: InstrumentationScope) -> Arc<dyn Sink> {
        (**self).sink(scope)
    }
}

/// Describes a prospective record to [`Sink::enabled`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnabledParameters {
    severity: Option<Severity>,
}

impl EnabledParameters {
    /// Parameters with nothing set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the severity of the prospective record.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    /// The severity of the prospective record, if it has one on the
    /// OpenTelemetry scale.
    pub fn severity(&self) -> Option<Severity> {
        self.severity
    }
}

/// A record in the sink's data model, as produced by the bridge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogRecord {
    timestamp: Option<SystemTime>,
    observed_timestamp: Option<SystemTime>,
    severity_number: Option<Severity>,
    severity_text: Option<Cow<'static, str>>,
    body: Option<AnyValue>,
    attributes: Vec<(Key, AnyValue)>,
}

impl LogRecord {
    /// An empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// When the event happened.
    pub fn timestamp(&self) -> Option<SystemTime> {
        self.timestamp
    }

    /// Sets the event time.
    pub fn set_timestamp(&mut self, timestamp: SystemTime) {
        self.timestamp = Some(timestamp);
    }

    /// When the bridge saw the event.
    pub fn observed_timestamp(&self) -> Option<SystemTime> {
        self.observed_timestamp
    }

    /// Sets the observation time.
    pub fn set_observed_timestamp(&mut self, timestamp: SystemTime) {
        self.observed_timestamp = Some(timestamp);
    }

    /// Normalized severity.
    pub fn severity_number(&self) -> Option<Severity> {
        self.severity_number
    }

    /// Sets the normalized severity.
    pub fn set_severity_number(&mut self, severity: Severity) {
        self.severity_number = Some(severity);
    }

    /// Severity as named by the front-end.
    pub fn severity_text(&self) -> Option<&str> {
        self.severity_text.as_deref()
    }

    /// Sets the front-end severity name.
    pub fn set_severity_text(&mut self, text: impl Into<Cow<'static, str>>) {
        self.severity_text = Some(text.into());
    }

    /// The message.
    pub fn body(&self) -> Option<&AnyValue> {
        self.body.as_ref()
    }

    /// Sets the message.
    pub fn set_body(&mut self, body: AnyValue) {
        self.body = Some(body);
    }

    /// Removes the message, leaving `None`.
    pub fn take_body(&mut self) -> Option<AnyValue> {
        self.body.take()
    }

    /// Appends an attribute. Duplicate keys are kept.
    pub fn add_attribute<K, V>(&mut self, key: K, value: V)
    where
        K: Into<Key>,
        V: Into<AnyValue>,
    {
        self.attributes.push((key.into(), value.into()));
    }

    /// Appends several attributes.
    pub fn add_attributes<I, K, V>(&mut self, attributes: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Key>,
        V: Into<AnyValue>,
    {
        self.attributes.extend(
            attributes
                .into_iter()
                .map(|(key, value)| (key.into(), value.into())),
        );
    }

    /// Top-level attributes in emission order.
    pub fn attributes_iter(&self) -> impl Iterator<Item = &(Key, AnyValue)> {
        self.attributes.iter()
    }

    /// Number of top-level attributes.
    pub fn attributes_len(&self) -> usize {
        self.attributes.len()
    }

    /// The first top-level attribute named `key`.
    pub fn attribute(&self, key: &str) -> Option<&AnyValue> {
        self.attributes
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, v)| v)
    }

    /// Consumes the record, returning its attributes.
    pub fn into_attributes(self) -> Vec<(Key, AnyValue)> {
        self.attributes
    }
}

/// A [`SinkProvider`] whose sinks drop everything.
///
/// This is the ambient provider until [`global::set_sink_provider`] installs
/// another one.
///
/// [`global::set_sink_provider`]: crate::global::set_sink_provider
#[derive(Debug, Clone, Default)]
pub struct NoopSinkProvider(());

impl NoopSinkProvider {
    /// Creates a new no-op provider.
    pub fn new() -> Self {
        NoopSinkProvider(())
    }
}

impl SinkProvider for NoopSinkProvider {
    fn sink(&self, _scope: InstrumentationScope) -> Arc<dyn Sink> {
        Arc::new(NoopSink(()))
    }
}

/// A [`Sink`] that drops everything.
#[derive(Debug, Clone, Default)]
pub struct NoopSink(());

impl Sink for NoopSink {
    fn enabled(&self, _cx: &Context, _params: &EnabledParameters) -> bool {
        false
    }

    fn emit(&self, _cx: &Context, _record: LogRecord) -> EmitResult {
        Ok(())
    }
}
