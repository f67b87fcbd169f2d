//! A recording [`SinkProvider`] for tests.
//!
//! Available with the `testing` feature.
use crate::{
    error::{EmitError, EmitResult},
    sink::{EnabledParameters, LogRecord, Sink, SinkProvider},
};
use opentelemetry::{logs::Severity, Context, InstrumentationScope};
use std::sync::{Arc, Mutex, MutexGuard};

/// Context marker that makes [`InMemorySinkProvider`] sinks enabled for
/// every severity.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForceEnabled;

/// Records every scope and record it receives.
///
/// Clones share the recorded state.
#[derive(Debug, Clone, Default)]
pub struct InMemorySinkProvider {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    min_severity: Option<Severity>,
    emit_error: Option<String>,
    scopes: Mutex<Vec<InstrumentationScope>>,
    records: Mutex<Vec<LogRecord>>,
}

impl InMemorySinkProvider {
    /// A provider enabled for every severity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Disables severities below `min_severity`, unless the context carries
    /// [`ForceEnabled`].
    ///
    /// Call before the provider is shared; clones made earlier keep their
    /// own settings.
    pub fn with_min_severity(self, min_severity: Severity) -> Self {
        self.reconfigure(|inner| inner.min_severity = Some(min_severity))
    }

    /// Makes every emit fail with [`EmitError::InternalFailure`] carrying
    /// `message`. Records are still recorded.
    pub fn failing_with(self, message: impl Into<String>) -> Self {
        let message = message.into();
        self.reconfigure(|inner| inner.emit_error = Some(message))
    }

    /// Scopes passed to [`SinkProvider::sink`], in call order.
    pub fn scopes(&self) -> Vec<InstrumentationScope> {
        lock(&self.inner.scopes).clone()
    }

    /// Emitted records, in emission order.
    pub fn records(&self) -> Vec<LogRecord> {
        lock(&self.inner.records).clone()
    }

    /// Forgets every recorded scope and record.
    pub fn reset(&self) {
        lock(&self.inner.scopes).clear();
        lock(&self.inner.records).clear();
    }

    fn reconfigure(self, f: impl FnOnce(&mut Inner)) -> Self {
        let mut inner = Inner {
            min_severity: self.inner.min_severity,
            emit_error: self.inner.emit_error.clone(),
            scopes: Mutex::new(self.scopes()),
            records: Mutex::new(self.records()),
        };
        f(&mut inner);
        InMemorySinkProvider {
            inner: Arc::new(inner),
        }
    }
}

impl SinkProvider for InMemorySinkProvider {
    fn sink(&self, scope: InstrumentationScope) -> Arc<dyn Sink> {
        lock(&self.inner.scopes).push(scope);
        Arc::new(InMemorySink {
            inner: self.inner.clone(),
        })
    }
}

#[derive(Debug)]
struct InMemorySink {
    inner: Arc<Inner>,
}

impl Sink for InMemorySink {
    fn enabled(&self, cx: &Context, params: &EnabledParameters) -> bool {
        if cx.get::<ForceEnabled>().is_some() {
            return true;
        }
        match (params.severity(), self.inner.min_severity) {
            (Some(severity), Some(min)) => severity >= min,
            _ => true,
        }
    }

    fn emit(&self, _cx: &Context, record: LogRecord) -> EmitResult {
        lock(&self.inner.records).push(record);
        match &self.inner.emit_error {
            Some(message) => Err(EmitError::InternalFailure(message.clone())),
            None => Ok(()),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope() -> InstrumentationScope {
        InstrumentationScope::builder("test").build()
    }

    #[test]
    fn min_severity_and_force_enabled() {
        let provider = InMemorySinkProvider::new().with_min_severity(Severity::Warn);
        let sink = provider.sink(scope());

        let info = EnabledParameters::new().with_severity(Severity::Info);
        let error = EnabledParameters::new().with_severity(Severity::Error);
        assert!(!sink.enabled(&Context::new(), &info));
        assert!(sink.enabled(&Context::new(), &error));
        assert!(sink.enabled(&Context::new().with_value(ForceEnabled), &info));
        assert!(sink.enabled(&Context::new(), &EnabledParameters::new()));
    }

    #[test]
    fn failing_sink_still_records() {
        let provider = InMemorySinkProvider::new().failing_with("boom");
        let sink = provider.sink(scope());
        let result = sink.emit(&Context::new(), LogRecord::new());
        assert!(matches!(result, Err(EmitError::InternalFailure(m)) if m == "boom"));
        assert_eq!(provider.records().len(), 1);

        provider.reset();
        assert!(provider.records().is_empty());
        assert!(provider.scopes().is_empty());
    }
}
