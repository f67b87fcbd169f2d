use crate::{
    global,
    sink::SinkProvider,
    LogBridge,
};
use opentelemetry::{otel_debug, otel_warn, InstrumentationScope};
use std::{borrow::Cow, env, sync::Arc};

/// Default for [`LogBridgeBuilder::with_source`]: `true` or `false`,
/// case-insensitive.
pub(crate) const OTEL_LOG_BRIDGE_CAPTURE_SOURCE: &str = "OTEL_LOG_BRIDGE_CAPTURE_SOURCE";

/// Builder for [`LogBridge`].
///
/// Invalid options never fail the build: they are reported through the
/// internal log and the previous value is kept.
#[derive(Debug)]
pub struct LogBridgeBuilder {
    name: Cow<'static, str>,
    version: Option<Cow<'static, str>>,
    schema_url: Option<Cow<'static, str>>,
    provider: Option<Arc<dyn SinkProvider>>,
    capture_source: bool,
}

impl LogBridgeBuilder {
    /// Reads `OTEL_LOG_BRIDGE_CAPTURE_SOURCE` for the source capture default.
    pub(crate) fn new(name: impl Into<Cow<'static, str>>) -> Self {
        LogBridgeBuilder {
            name: name.into(),
            version: None,
            schema_url: None,
            provider: None,
            capture_source: false,
        }
        .init_from_env_vars()
    }

    /// Sets the version of the instrumentation scope.
    ///
    /// An empty version is ignored.
    pub fn with_version(mut self, version: impl Into<Cow<'static, str>>) -> Self {
        let version = version.into();
        if version.is_empty() {
            otel_warn!(
                name: "LogBridge.InvalidOption",
                option = "version",
                message = "Empty version ignored."
            );
        } else {
            self.version = Some(version);
        }
        self
    }

    /// Sets the schema URL of the instrumentation scope.
    ///
    /// An empty URL is ignored.
    pub fn with_schema_url(mut self, schema_url: impl Into<Cow<'static, str>>) -> Self {
        let schema_url = schema_url.into();
        if schema_url.is_empty() {
            otel_warn!(
                name: "LogBridge.InvalidOption",
                option = "schema_url",
                message = "Empty schema URL ignored."
            );
        } else {
            self.schema_url = Some(schema_url);
        }
        self
    }

    /// Uses `provider` instead of the global [`SinkProvider`].
    ///
    /// Only the first provider set on a builder is used; later ones conflict
    /// with it and are ignored.
    pub fn with_provider<P>(self, provider: P) -> Self
    where
        P: SinkProvider + 'static,
    {
        self.with_shared_provider(Arc::new(provider))
    }

    /// Like [`with_provider`](Self::with_provider), for a provider that is
    /// already shared.
    pub fn with_shared_provider(mut self, provider: Arc<dyn SinkProvider>) -> Self {
        if self.provider.is_some() {
            otel_warn!(
                name: "LogBridge.InvalidOption",
                option = "provider",
                message = "A provider is already configured; the new one is ignored."
            );
        } else {
            self.provider = Some(provider);
        }
        self
    }

    /// Attaches the file, function and line a record was logged from as
    /// `code.file.path`, `code.function.name` and `code.line.number`.
    ///
    /// The function name is only known for records logged through the
    /// [`log!`](crate::log) family of macros. [`Logger::log`] and its level
    /// methods record the file and line only.
    ///
    /// [`Logger::log`]: crate::Logger::log
    ///
    /// Corresponding environment variable: `OTEL_LOG_BRIDGE_CAPTURE_SOURCE`.
    ///
    /// Note: Programmatically setting this will override any value set via the environment variable.
    pub fn with_source(mut self, capture_source: bool) -> Self {
        self.capture_source = capture_source;
        self
    }

    /// Resolves the sink and creates the bridge.
    pub fn build(self) -> LogBridge {
        let provider = self.provider.unwrap_or_else(global::sink_provider);

        let mut scope = InstrumentationScope::builder(self.name);
        if let Some(version) = self.version {
            scope = scope.with_version(version);
        }
        if let Some(schema_url) = self.schema_url {
            scope = scope.with_schema_url(schema_url);
        }
        let scope = scope.build();

        otel_debug!(
            name: "LogBridge.Created",
            scope_name = scope.name(),
            capture_source = self.capture_source
        );
        LogBridge::from_sink(provider.sink(scope), self.capture_source)
    }

    fn init_from_env_vars(mut self) -> Self {
        if let Ok(value) = env::var(OTEL_LOG_BRIDGE_CAPTURE_SOURCE) {
            match value.trim().to_ascii_lowercase().as_str() {
                "true" => self.capture_source = true,
                "false" => self.capture_source = false,
                _ => {
                    otel_warn!(
                        name: "LogBridge.InvalidOption",
                        option = OTEL_LOG_BRIDGE_CAPTURE_SOURCE,
                        message = "Expected `true` or `false`; value ignored."
                    );
                }
            }
        }
        self
    }
}
