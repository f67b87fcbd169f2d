//! Conversion from front-end [`Value`]s to OpenTelemetry [`AnyValue`]s.
//!
//! The conversion is total: every [`Value`] either maps onto an [`AnyValue`]
//! or is absent (`None`), in which case the attribute carrying it is not
//! emitted. Nothing here can fail.
use crate::{
    lineage::{Frame, Lineage},
    Attr, Value,
};
use opentelemetry::{logs::AnyValue, otel_debug, Key};
use std::{
    collections::{hash_map::Entry, HashMap},
    time::{Duration, SystemTime, UNIX_EPOCH},
};

/// How many times a lazy value may produce another lazy value before
/// conversion gives up on it.
pub(crate) const MAX_LAZY_RESOLUTIONS: usize = 100;

/// Converts a single value.
///
/// Returns `None` for values that have no representation: [`Value::Null`],
/// empty groups, and lazy values resolving to either.
pub fn convert_value(value: &Value) -> Option<AnyValue> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(AnyValue::Boolean(*b)),
        Value::Int64(i) => Some(AnyValue::Int(*i)),
        Value::Uint64(u) => Some(match i64::try_from(*u) {
            Ok(i) => AnyValue::Int(i),
            Err(_) => AnyValue::String(u.to_string().into()),
        }),
        Value::Float64(f) => Some(AnyValue::Double(*f)),
        Value::String(s) => Some(AnyValue::String(s.clone())),
        Value::Bytes(b) => Some(AnyValue::Bytes(Box::new(b.clone()))),
        Value::Duration(d) => Some(AnyValue::Int(duration_nanos(*d))),
        Value::Time(t) => Some(AnyValue::Int(unix_nanos(*t))),
        Value::Slice(items) => Some(AnyValue::ListAny(Box::new(
            items.iter().filter_map(convert_value).collect(),
        ))),
        Value::Group(attrs) => {
            let mut entries = Vec::with_capacity(attrs.len());
            convert_attrs_into(attrs, &mut entries);
            if entries.is_empty() {
                None
            } else {
                Some(into_map(entries))
            }
        }
        Value::Lazy(lazy) => {
            let mut resolved = lazy.resolve();
            for _ in 1..MAX_LAZY_RESOLUTIONS {
                match resolved {
                    Value::Lazy(next) => resolved = next.resolve(),
                    other => return convert_value(&other),
                }
            }
            match resolved {
                Value::Lazy(_) => Some(AnyValue::String(
                    format!("lazy value did not resolve after {MAX_LAZY_RESOLUTIONS} evaluations")
                        .into(),
                )),
                other => convert_value(&other),
            }
        }
        Value::Any(any) => Some(AnyValue::String(format!("{any:?}").into())),
    }
}

/// Converts `attrs` and appends them to `out`.
///
/// An attribute with an empty key and a group value is inlined into the
/// current level; an attribute with an empty key and no value is ignored.
pub fn convert_attrs_into(attrs: &[Attr], out: &mut Vec<(Key, AnyValue)>) {
    for attr in attrs {
        if attr.key.as_str().is_empty() {
            match &attr.value {
                Value::Group(inner) => {
                    convert_attrs_into(inner, out);
                    continue;
                }
                Value::Null => continue,
                _ => {}
            }
        }
        if let Some(value) = convert_value(&attr.value) {
            out.push((attr.key.clone(), value));
        }
    }
}

/// Builds the attribute tree for one record.
///
/// The lineage is replayed from root to tip, then `record_attrs` is added to
/// the innermost group. Groups left without attributes are dropped.
pub(crate) fn materialize(lineage: &Lineage, record_attrs: &[Attr]) -> Vec<(Key, AnyValue)> {
    if lineage.is_empty() {
        let mut attributes = Vec::with_capacity(record_attrs.len());
        convert_attrs_into(record_attrs, &mut attributes);
        return attributes;
    }

    struct Open<'a> {
        name: Option<&'a Key>,
        attributes: Vec<(Key, AnyValue)>,
    }

    let mut levels = vec![Open {
        name: None,
        attributes: Vec::with_capacity(record_attrs.len()),
    }];
    for frame in lineage.frames() {
        match frame {
            Frame::Group(name) => levels.push(Open {
                name: Some(name),
                attributes: Vec::new(),
            }),
            Frame::Attrs(attrs) => {
                if let Some(level) = levels.last_mut() {
                    convert_attrs_into(attrs, &mut level.attributes);
                }
            }
        }
    }
    if let Some(level) = levels.last_mut() {
        convert_attrs_into(record_attrs, &mut level.attributes);
    }

    while levels.len() > 1 {
        let Some(Open { name, attributes }) = levels.pop() else {
            break;
        };
        if attributes.is_empty() {
            continue;
        }
        if let (Some(name), Some(parent)) = (name, levels.last_mut()) {
            parent
                .attributes
                .push((name.clone(), into_map(attributes)));
        }
    }
    levels.pop().map(|level| level.attributes).unwrap_or_default()
}

/// Collects group entries into a map. The first entry for a key wins.
fn into_map(entries: Vec<(Key, AnyValue)>) -> AnyValue {
    let mut map = HashMap::with_capacity(entries.len());
    for (key, value) in entries {
        match map.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(value);
            }
            Entry::Occupied(slot) => {
                otel_debug!(
                    name: "LogBridge.DuplicateKeyDropped",
                    key = slot.key().as_str(),
                    message = "Group already holds this key; later value dropped."
                );
            }
        }
    }
    AnyValue::Map(Box::new(map))
}

fn duration_nanos(d: Duration) -> i64 {
    i64::try_from(d.as_nanos()).unwrap_or(i64::MAX)
}

fn unix_nanos(t: SystemTime) -> i64 {
    match t.duration_since(UNIX_EPOCH) {
        Ok(since) => duration_nanos(since),
        Err(before) => duration_nanos(before.duration()).saturating_neg(),
    }
}
