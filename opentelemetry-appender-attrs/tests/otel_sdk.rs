use opentelemetry::{
    logs::{AnyValue, Severity},
    trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState},
    Context, Key,
};
use opentelemetry_appender_attrs::{
    global, info, otel::OtelSinkProvider, Attr, Level, LogBridge, Logger, Record,
};
use opentelemetry_sdk::logs::{InMemoryLogExporter, SdkLoggerProvider};

fn setup() -> (InMemoryLogExporter, SdkLoggerProvider) {
    let exporter = InMemoryLogExporter::default();
    let provider = SdkLoggerProvider::builder()
        .with_simple_exporter(exporter.clone())
        .build();
    (exporter, provider)
}

fn find<'a>(attributes: impl Iterator<Item = &'a (Key, AnyValue)>, key: &str) -> Option<&'a AnyValue> {
    attributes
        .filter(|(k, _)| k.as_str() == key)
        .map(|(_, v)| v)
        .next()
}

#[test]
fn records_reach_the_sdk() {
    let (exporter, provider) = setup();
    let bridge = LogBridge::builder("attrs-test")
        .with_version("1.0.0")
        .with_schema_url("https://opentelemetry.io/schemas/1.28.0")
        .with_provider(OtelSinkProvider::new(provider.clone()))
        .build();
    let logger = Logger::new(bridge)
        .with_group("G")
        .with([Attr::new("a", "b")]);

    info!(logger, "hello from attrs", "k" => 42).unwrap();
    provider.force_flush().unwrap();

    let logs = exporter.get_emitted_logs().unwrap();
    assert_eq!(logs.len(), 1);
    let log = &logs[0];
    assert_eq!(log.instrumentation.name(), "attrs-test");
    assert_eq!(log.instrumentation.version(), Some("1.0.0"));
    assert_eq!(
        log.instrumentation.schema_url(),
        Some("https://opentelemetry.io/schemas/1.28.0")
    );

    assert_eq!(log.record.severity_number(), Some(Severity::Info));
    assert_eq!(log.record.severity_text(), Some("INFO"));
    assert_eq!(
        log.record.body(),
        Some(&AnyValue::String("hello from attrs".into()))
    );
    assert!(log.record.timestamp().is_some());

    match find(log.record.attributes_iter(), "G") {
        Some(AnyValue::Map(group)) => {
            assert_eq!(
                group.get(&Key::from("a")),
                Some(&AnyValue::String("b".into()))
            );
            assert_eq!(group.get(&Key::from("k")), Some(&AnyValue::Int(42)));
        }
        other => panic!("expected group G to be a map, got {other:?}"),
    }
    assert!(find(log.record.attributes_iter(), "a").is_none());
}

#[test]
fn records_carry_the_callers_trace_context() {
    let (exporter, provider) = setup();
    let bridge = LogBridge::builder("attrs-test")
        .with_provider(OtelSinkProvider::new(provider.clone()))
        .build();

    let trace_id = TraceId::from_bytes([1; 16]);
    let span_id = SpanId::from_bytes([2; 8]);
    let cx = Context::new().with_remote_span_context(SpanContext::new(
        trace_id,
        span_id,
        TraceFlags::SAMPLED,
        true,
        TraceState::default(),
    ));
    bridge
        .handle(&cx, Record::new(Level::WARN, "inside a span"))
        .unwrap();
    bridge
        .handle(&Context::new(), Record::new(Level::WARN, "outside"))
        .unwrap();
    provider.force_flush().unwrap();

    let logs = exporter.get_emitted_logs().unwrap();
    assert_eq!(logs.len(), 2);
    let trace_context = logs[0]
        .record
        .trace_context()
        .expect("record logged inside a span has a trace context");
    assert_eq!(trace_context.trace_id, trace_id);
    assert_eq!(trace_context.span_id, span_id);
    assert!(logs[1].record.trace_context().is_none());
}

#[test]
fn out_of_range_levels_have_no_severity() {
    let (exporter, provider) = setup();
    let bridge = LogBridge::builder("attrs-test")
        .with_provider(OtelSinkProvider::new(provider.clone()))
        .build();

    bridge
        .handle(&Context::new(), Record::new(Level::new(64), "off the scale"))
        .unwrap();
    provider.force_flush().unwrap();

    let logs = exporter.get_emitted_logs().unwrap();
    assert_eq!(logs[0].record.severity_number(), None);
    assert_eq!(logs[0].record.severity_text(), None);
}

#[test]
fn global_provider_is_used_by_default() {
    let (exporter, provider) = setup();
    global::set_sink_provider(OtelSinkProvider::new(provider.clone()));

    let logger = Logger::new(LogBridge::new("global-test"));
    logger.error("through the global provider", []).unwrap();
    provider.force_flush().unwrap();

    let logs = exporter.get_emitted_logs().unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].instrumentation.name(), "global-test");
    assert_eq!(logs[0].record.severity_number(), Some(Severity::Error));
}
