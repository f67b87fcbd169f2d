use crate::{error::EmitResult, Attr, Level, Record, Source};
use opentelemetry::{Context, Key};
use std::{borrow::Cow, fmt, sync::Arc};

/// Processes records produced by a [`Logger`].
///
/// Handlers are immutable: deriving one with [`with_attrs`] or
/// [`with_group`] returns a new handler and leaves `self` untouched.
///
/// [`with_attrs`]: Handler::with_attrs
/// [`with_group`]: Handler::with_group
pub trait Handler: Send + Sync + fmt::Debug {
    /// Reports whether records at `level` would be handled.
    fn enabled(&self, cx: &Context, level: Level) -> bool;

    /// Handles a record. Called only after [`enabled`](Handler::enabled)
    /// returned `true` for the record's level.
    fn handle(&self, cx: &Context, record: Record) -> EmitResult;

    /// A handler that includes `attrs` in every record.
    fn with_attrs(&self, attrs: Vec<Attr>) -> Arc<dyn Handler>;

    /// A handler that qualifies all further attributes with `name`.
    fn with_group(&self, name: Key) -> Arc<dyn Handler>;
}

/// The front-end used by application code.
///
/// The methods of `Logger` capture the caller's file and line but not the
/// enclosing function; use [`info!`](crate::info) and the other logging
/// macros when `code.function.name` should be recorded as well.
///
/// ```
/// use opentelemetry_appender_attrs::{Attr, LogBridge, Logger};
///
/// let logger = Logger::new(LogBridge::new("my-app")).with([Attr::new("user", "alice")]);
/// logger.info("signed in", [Attr::new("attempts", 1)]).unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct Logger {
    handler: Arc<dyn Handler>,
}

impl Logger {
    /// Creates a logger writing to `handler`.
    pub fn new<H: Handler + 'static>(handler: H) -> Self {
        Logger {
            handler: Arc::new(handler),
        }
    }

    /// Creates a logger from a shared handler.
    pub fn from_handler(handler: Arc<dyn Handler>) -> Self {
        Logger { handler }
    }

    /// The handler behind this logger.
    pub fn handler(&self) -> &Arc<dyn Handler> {
        &self.handler
    }

    /// A logger whose records all carry `attrs`.
    pub fn with(&self, attrs: impl IntoIterator<Item = Attr>) -> Logger {
        let attrs: Vec<Attr> = attrs.into_iter().collect();
        if attrs.is_empty() {
            return self.clone();
        }
        Logger {
            handler: self.handler.with_attrs(attrs),
        }
    }

    /// A logger that nests further attributes under `name`.
    pub fn with_group(&self, name: impl Into<Key>) -> Logger {
        let name = name.into();
        if name.as_str().is_empty() {
            return self.clone();
        }
        Logger {
            handler: self.handler.with_group(name),
        }
    }

    /// Reports whether records at `level` would be handled.
    pub fn enabled(&self, cx: &Context, level: Level) -> bool {
        self.handler.enabled(cx, level)
    }

    /// Logs `msg` at `level`, recording the caller's file and line.
    ///
    /// The function name is not recorded; see [`log!`](crate::log).
    #[track_caller]
    pub fn log(
        &self,
        cx: &Context,
        level: Level,
        msg: impl Into<Cow<'static, str>>,
        attrs: impl IntoIterator<Item = Attr>,
    ) -> EmitResult {
        let source = Source::caller();
        if !self.enabled(cx, level) {
            return Ok(());
        }
        let record = Record::new(level, msg)
            .with_attrs(attrs)
            .with_source(source);
        self.handler.handle(cx, record)
    }

    /// Hands a prepared record to the handler if its level is enabled.
    pub fn log_record(&self, cx: &Context, record: Record) -> EmitResult {
        if !self.enabled(cx, record.level()) {
            return Ok(());
        }
        self.handler.handle(cx, record)
    }

    /// Logs at [`Level::DEBUG`] in the current context.
    #[track_caller]
    pub fn debug(
        &self,
        msg: impl Into<Cow<'static, str>>,
        attrs: impl IntoIterator<Item = Attr>,
    ) -> EmitResult {
        self.log(&Context::current(), Level::DEBUG, msg, attrs)
    }

    /// Logs at [`Level::INFO`] in the current context.
    #[track_caller]
    pub fn info(
        &self,
        msg: impl Into<Cow<'static, str>>,
        attrs: impl IntoIterator<Item = Attr>,
    ) -> EmitResult {
        self.log(&Context::current(), Level::INFO, msg, attrs)
    }

    /// Logs at [`Level::WARN`] in the current context.
    #[track_caller]
    pub fn warn(
        &self,
        msg: impl Into<Cow<'static, str>>,
        attrs: impl IntoIterator<Item = Attr>,
    ) -> EmitResult {
        self.log(&Context::current(), Level::WARN, msg, attrs)
    }

    /// Logs at [`Level::ERROR`] in the current context.
    #[track_caller]
    pub fn error(
        &self,
        msg: impl Into<Cow<'static, str>>,
        attrs: impl IntoIterator<Item = Attr>,
    ) -> EmitResult {
        self.log(&Context::current(), Level::ERROR, msg, attrs)
    }
}

/// Logs through a [`Logger`] at the given level, in the current context.
///
/// Attributes are written as `key => value` pairs. The record carries the
/// file, line and enclosing function of the call site. Evaluates to the
/// [`EmitResult`](crate::EmitResult) of the handler.
///
/// ```
/// use opentelemetry_appender_attrs::{log, Level, LogBridge, Logger};
///
/// let logger = Logger::new(LogBridge::new("my-app"));
/// log!(logger, Level::WARN, "disk almost full", "free_bytes" => 1024u64).unwrap();
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $msg:expr $(, $key:expr => $value:expr)* $(,)?) => {{
        let logger: &$crate::Logger = &$logger;
        let level: $crate::Level = $level;
        let cx = $crate::__private::Context::current();
        if logger.enabled(&cx, level) {
            let attrs: ::std::vec::Vec<$crate::Attr> =
                ::std::vec![$($crate::Attr::new($key, $value)),*];
            let record = $crate::Record::new(level, $msg)
                .with_attrs(attrs)
                .with_source($crate::source!());
            logger.handler().handle(&cx, record)
        } else {
            ::std::result::Result::Ok(())
        }
    }};
}

/// Logs at [`Level::DEBUG`](crate::Level::DEBUG). See [`log!`](crate::log).
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::Level::DEBUG, $($rest)+)
    };
}

/// Logs at [`Level::INFO`](crate::Level::INFO). See [`log!`](crate::log).
#[macro_export]
macro_rules! info {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::Level::INFO, $($rest)+)
    };
}

/// Logs at [`Level::WARN`](crate::Level::WARN). See [`log!`](crate::log).
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::Level::WARN, $($rest)+)
    };
}

/// Logs at [`Level::ERROR`](crate::Level::ERROR). See [`log!`](crate::log).
#[macro_export]
macro_rules! error {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::Level::ERROR, $($rest)+)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        testing::{ForceEnabled, InMemorySinkProvider},
        LogBridge,
    };
    use opentelemetry::logs::{AnyValue, Severity};
    use opentelemetry_semantic_conventions::attribute::{
        CODE_FILE_PATH, CODE_FUNCTION_NAME, CODE_LINE_NUMBER,
    };

    fn setup(min_severity: Severity) -> (InMemorySinkProvider, Logger) {
        let provider = InMemorySinkProvider::new().with_min_severity(min_severity);
        let bridge = LogBridge::builder("test")
            .with_provider(provider.clone())
            .with_source(true)
            .build();
        (provider, Logger::new(bridge))
    }

    #[test]
    fn level_methods_respect_enabled() {
        let (provider, logger) = setup(Severity::Info);
        logger.debug("hidden", []).unwrap();
        logger.info("info", []).unwrap();
        logger.warn("warn", []).unwrap();
        logger.error("error", []).unwrap();

        let severities: Vec<_> = provider
            .records()
            .iter()
            .map(|record| record.severity_number())
            .collect();
        assert_eq!(
            severities,
            [
                Some(Severity::Info),
                Some(Severity::Warn),
                Some(Severity::Error)
            ]
        );
    }

    #[test]
    fn log_records_caller_location() {
        let (provider, logger) = setup(Severity::Trace);
        let line = line!() + 1;
        logger.info("here", [Attr::new("k", "v")]).unwrap();

        let record = &provider.records()[0];
        assert_eq!(
            record.attribute(CODE_FILE_PATH),
            Some(&AnyValue::String(file!().into()))
        );
        assert_eq!(
            record.attribute(CODE_LINE_NUMBER),
            Some(&AnyValue::Int(i64::from(line)))
        );
        assert_eq!(record.attribute(CODE_FUNCTION_NAME), None);
        assert_eq!(record.attribute("k"), Some(&AnyValue::String("v".into())));
    }

    #[test]
    fn macros_capture_function_name() {
        let (provider, logger) = setup(Severity::Trace);
        crate::info!(logger, "hello", "user" => "alice", "attempts" => 3).unwrap();
        crate::debug!(logger, "no attributes").unwrap();

        let records = provider.records();
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0].attribute(CODE_FUNCTION_NAME),
            Some(&AnyValue::String(
                "opentelemetry_appender_attrs::handler::tests::macros_capture_function_name".into()
            ))
        );
        assert_eq!(records[0].attribute("attempts"), Some(&AnyValue::Int(3)));
        assert_eq!(records[1].severity_number(), Some(Severity::Debug));
    }

    #[test]
    fn macros_skip_disabled_levels() {
        let (provider, logger) = setup(Severity::Error);
        crate::warn!(logger, "dropped", "k" => 1).unwrap();
        crate::error!(logger, "kept").unwrap();
        assert_eq!(provider.records().len(), 1);
    }

    #[test]
    fn log_record_checks_level_and_context() {
        let (provider, logger) = setup(Severity::Error);
        let record = || Record::new(Level::DEBUG, "debug");
        logger.log_record(&Context::new(), record()).unwrap();
        assert!(provider.records().is_empty());

        let forced = Context::new().with_value(ForceEnabled);
        logger.log_record(&forced, record()).unwrap();
        assert_eq!(provider.records().len(), 1);
    }

    #[test]
    fn derived_loggers_forward_to_the_handler() {
        let (provider, logger) = setup(Severity::Trace);
        let derived = logger
            .with([Attr::new("a", 1)])
            .with_group("G")
            .with([Attr::new("b", 2)]);
        derived.info("msg", []).unwrap();
        logger.info("plain", []).unwrap();

        let records = provider.records();
        assert_eq!(records[0].attribute("a"), Some(&AnyValue::Int(1)));
        assert!(matches!(records[0].attribute("G"), Some(AnyValue::Map(_))));
        assert_eq!(records[1].attribute("a"), None);
    }

    #[test]
    fn logger_from_shared_handler() {
        let (provider, logger) = setup(Severity::Trace);
        let shared = logger.handler().with_attrs(vec![Attr::new("shared", true)]);
        let first = Logger::from_handler(shared.clone());
        let second = Logger::from_handler(shared);
        first.info("first", []).unwrap();
        second.info("second", []).unwrap();

        for record in provider.records() {
            assert_eq!(record.attribute("shared"), Some(&AnyValue::Boolean(true)));
        }
        assert_eq!(provider.records().len(), 2);
    }
}
