use crate::{
    convert::materialize,
    error::EmitResult,
    lineage::{Frame, Lineage},
    sink::{EnabledParameters, LogRecord, Sink},
    Attr, Handler, Level, LogBridgeBuilder, Record,
};
use opentelemetry::{logs::AnyValue, Context, Key};
use opentelemetry_semantic_conventions::attribute::{
    CODE_FILE_PATH, CODE_FUNCTION_NAME, CODE_LINE_NUMBER,
};
use std::{borrow::Cow, sync::Arc, time::SystemTime};

/// A [`Handler`] that forwards records to a [`Sink`].
///
/// Bridges are cheap to clone and to derive: [`with_attrs`] and
/// [`with_group`] return new bridges sharing the parent's state, which
/// neither call modifies. All methods may be called concurrently.
///
/// [`with_attrs`]: LogBridge::with_attrs
/// [`with_group`]: LogBridge::with_group
#[derive(Clone, Debug)]
pub struct LogBridge {
    sink: Arc<dyn Sink>,
    lineage: Lineage,
    capture_source: bool,
}

impl LogBridge {
    /// Creates a bridge for the scope `name` with default options.
    ///
    /// The sink comes from the global provider, see
    /// [`global::set_sink_provider`](crate::global::set_sink_provider).
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self::builder(name).build()
    }

    /// Returns a builder for a bridge with the scope `name`.
    pub fn builder(name: impl Into<Cow<'static, str>>) -> LogBridgeBuilder {
        LogBridgeBuilder::new(name)
    }

    pub(crate) fn from_sink(sink: Arc<dyn Sink>, capture_source: bool) -> Self {
        LogBridge {
            sink,
            lineage: Lineage::default(),
            capture_source,
        }
    }

    /// Reports whether the sink wants records at `level`.
    ///
    /// Levels without a counterpart on the OpenTelemetry scale are passed to
    /// the sink without a severity.
    pub fn enabled(&self, cx: &Context, level: Level) -> bool {
        let params = match level.to_severity() {
            Some(severity) => EnabledParameters::new().with_severity(severity),
            None => EnabledParameters::new(),
        };
        self.sink.enabled(cx, &params)
    }

    /// Returns a bridge that adds `attrs` to every record, inside the
    /// innermost group opened so far.
    pub fn with_attrs(&self, attrs: impl IntoIterator<Item = Attr>) -> LogBridge {
        let attrs: Vec<Attr> = attrs.into_iter().collect();
        if attrs.is_empty() {
            return self.clone();
        }
        self.derive(Frame::Attrs(attrs))
    }

    /// Returns a bridge that nests all further attributes under `name`.
    ///
    /// An empty name returns an equivalent bridge.
    pub fn with_group(&self, name: impl Into<Key>) -> LogBridge {
        let name = name.into();
        if name.as_str().is_empty() {
            return self.clone();
        }
        self.derive(Frame::Group(name))
    }

    /// Converts `record` and emits it.
    ///
    /// Returns the sink's result unchanged.
    pub fn handle(&self, cx: &Context, record: Record) -> EmitResult {
        let level = record.level();
        let time = record.time();
        let (message, attrs, source) = record.into_parts();

        let mut log_record = LogRecord::new();
        if let Some(time) = time {
            log_record.set_timestamp(time);
        }
        log_record.set_observed_timestamp(SystemTime::now());
        if let Some(severity) = level.to_severity() {
            log_record.set_severity_number(severity);
        }
        log_record.set_severity_text(level.to_string());
        log_record.set_body(AnyValue::String(message.into()));
        log_record.add_attributes(materialize(&self.lineage, &attrs));

        if self.capture_source {
            if let Some(source) = source {
                log_record.add_attribute(Key::from_static_str(CODE_FILE_PATH), source.file());
                if let Some(function) = source.function() {
                    log_record.add_attribute(Key::from_static_str(CODE_FUNCTION_NAME), function);
                }
                log_record.add_attribute(
                    Key::from_static_str(CODE_LINE_NUMBER),
                    i64::from(source.line()),
                );
            }
        }

        self.sink.emit(cx, log_record)
    }

    fn derive(&self, frame: Frame) -> LogBridge {
        LogBridge {
            sink: self.sink.clone(),
            lineage: self.lineage.push(frame),
            capture_source: self.capture_source,
        }
    }
}

impl Handler for LogBridge {
    fn enabled(&self, cx: &Context, level: Level) -> bool {
        LogBridge::enabled(self, cx, level)
    }

    fn handle(&self, cx: &Context, record: Record) -> EmitResult {
        LogBridge::handle(self, cx, record)
    }

    fn with_attrs(&self, attrs: Vec<Attr>) -> Arc<dyn Handler> {
        Arc::new(LogBridge::with_attrs(self, attrs))
    }

    fn with_group(&self, name: Key) -> Arc<dyn Handler> {
        Arc::new(LogBridge::with_group(self, name))
    }
}
