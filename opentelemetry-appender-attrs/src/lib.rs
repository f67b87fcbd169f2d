//! # OpenTelemetry-Appender-Attrs
//!
//! This crate provides a bridge between attribute-oriented structured logging and OpenTelemetry logs.
//! Application code logs through a [`Logger`] that carries key/value attributes and named groups; the
//! [`LogBridge`] handler converts every record into an OpenTelemetry log record and hands it to a sink.
//!
//! ## Features
//!
//! - Loggers derived with [`Logger::with`] and [`Logger::with_group`] share their parent's state without
//!   ever modifying it, so they can be created freely and used from any thread
//! - Groups become nested `Map` attributes; groups that end up without attributes are left out
//! - Lazily computed attribute values, resolved only when a record is emitted
//! - Optional capture of the file, function and line a record was logged from
//! - Works with any OpenTelemetry `LoggerProvider` through [`otel::OtelSinkProvider`], including
//!   trace correlation for records logged inside an active span
//!
//! ## Getting Started
//!
//! ### 1. Set Up the OpenTelemetry Logger Provider
//!
//! ```rust
//! use opentelemetry_sdk::logs::SdkLoggerProvider;
//! use opentelemetry_stdout::LogExporter;
//!
//! let exporter = LogExporter::default();
//! let provider = SdkLoggerProvider::builder()
//!     .with_simple_exporter(exporter)
//!     .build();
//! ```
//!
//! ### 2. Create the Bridge
//!
//! ```rust
//! # use opentelemetry_sdk::logs::SdkLoggerProvider;
//! # use opentelemetry_stdout::LogExporter;
//! # let provider = SdkLoggerProvider::builder()
//! #    .with_simple_exporter(LogExporter::default())
//! #    .build();
//! use opentelemetry_appender_attrs::{otel::OtelSinkProvider, LogBridge, Logger};
//!
//! let bridge = LogBridge::builder("my-service")
//!     .with_version("1.2.0")
//!     .with_source(true)
//!     .with_provider(OtelSinkProvider::new(provider))
//!     .build();
//! let logger = Logger::new(bridge);
//! ```
//!
//! Alternatively install the provider once with [`global::set_sink_provider`] and create bridges
//! with [`LogBridge::new`].
//!
//! ### 3. Log
//!
//! ```rust
//! # use opentelemetry_appender_attrs::{LogBridge, Logger};
//! # let logger = Logger::new(LogBridge::new("my-service"));
//! use opentelemetry_appender_attrs::{info, Attr};
//!
//! let request = logger
//!     .with([Attr::new("request_id", "0f3a")])
//!     .with_group("http");
//! info!(request, "request served", "status" => 200, "path" => "/index.html").unwrap();
//! ```
//!
//! ## Mapping details
//!
//! | Front-end          | OpenTelemetry              | Notes                                                     |
//! |--------------------|----------------------------|-----------------------------------------------------------|
//! | time               | `Timestamp`                | Omitted when the record has no time                       |
//! | level              | `Severity`, `SeverityText` | Severity number is `level + 9`; levels outside `-8..=15` carry no severity number |
//! | message            | `Body`                     | Always a `String`                                         |
//! | attributes         | `Attributes`               | Attributes added with `with` come first, then the record's own; duplicate keys are kept |
//! | group              | `Map` attribute            | Named after the group, nested in the enclosing group; within a group the first attribute with a key wins |
//! | source location    | `code.file.path`, `code.function.name`, `code.line.number` | Only with [`LogBridgeBuilder::with_source`]; always top-level; the function name is captured by the logging macros, not by the [`Logger`] methods |
//!
//! ### Data Type Mapping
//!
//! | [`Value`]          | OpenTelemetry `AnyValue` Type |
//! |--------------------|-------------------------------|
//! | `Bool`             | `Boolean`                     |
//! | `Int64`            | `Int`                         |
//! | `Uint64`           | `Int` (if convertible to `i64` without loss) else `String` |
//! | `Float64`          | `Double`                      |
//! | `String`           | `String`                      |
//! | `Bytes`            | `Bytes`                       |
//! | `Duration`         | `Int` (nanoseconds)           |
//! | `Time`             | `Int` (nanoseconds since the Unix epoch) |
//! | `Slice`            | `ListAny`                     |
//! | `Group`            | `Map`                         |
//! | `Lazy`             | the resolved value            |
//! | `Any`              | `String` (via `Debug` formatting) |
//! | `Null`             | attribute is dropped          |
//!
//! ## Feature Flags
//!
//! `internal-logs` (default): reports configuration problems through OpenTelemetry's internal logging.
//!
//! `spec_unstable_logs_enabled`: asks the OpenTelemetry logger whether a severity is enabled instead of
//! assuming it is.
//!
//! `testing`: exposes the `testing` module with an in-memory sink.

mod bridge;
mod builder;
pub mod convert;
mod error;
pub mod global;
mod handler;
mod level;
mod lineage;
pub mod otel;
mod record;
pub mod sink;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
mod value;

pub use bridge::LogBridge;
pub use builder::LogBridgeBuilder;
pub use error::{EmitError, EmitResult};
pub use handler::{Handler, Logger};
pub use level::{severity_number, Level, SEVERITY_OFFSET};
pub use record::{Record, Source};
pub use value::{Attr, LazyValue, Value};

#[doc(hidden)]
pub mod __private {
    pub use opentelemetry::Context;
}
