//! Front-end levels and their mapping onto the OpenTelemetry severity scale.
use opentelemetry::logs::Severity;
use std::fmt;

/// Distance between a front-end [`Level`] and the matching OpenTelemetry
/// [`Severity`] number.
///
/// `Level::DEBUG`, `Level::INFO`, `Level::WARN` and `Level::ERROR` land on
/// `Severity::Debug` (5), `Severity::Info` (9), `Severity::Warn` (13) and
/// `Severity::Error` (17) respectively.
pub const SEVERITY_OFFSET: i32 = 9;

const SEVERITIES: [Severity; 24] = [
    Severity::Trace,
    Severity::Trace2,
    Severity::Trace3,
    Severity::Trace4,
    Severity::Debug,
    Severity::Debug2,
    Severity::Debug3,
    Severity::Debug4,
    Severity::Info,
    Severity::Info2,
    Severity::Info3,
    Severity::Info4,
    Severity::Warn,
    Severity::Warn2,
    Severity::Warn3,
    Severity::Warn4,
    Severity::Error,
    Severity::Error2,
    Severity::Error3,
    Severity::Error4,
    Severity::Fatal,
    Severity::Fatal2,
    Severity::Fatal3,
    Severity::Fatal4,
];

/// Returns the numeric value of `severity` in the logs data model.
pub fn severity_number(severity: Severity) -> i32 {
    SEVERITIES
        .iter()
        .position(|candidate| *candidate == severity)
        .map_or(0, |index| index as i32 + 1)
}

/// The importance of a log event.
///
/// Levels are plain integers; the named constants are spaced four apart so
/// that custom levels can sit in between them. Higher is more severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Level(i32);

impl Level {
    /// Verbose diagnostics.
    pub const DEBUG: Level = Level(-4);
    /// Normal operational messages.
    pub const INFO: Level = Level(0);
    /// Something unexpected that does not stop the program.
    pub const WARN: Level = Level(4);
    /// A failure.
    pub const ERROR: Level = Level(8);

    /// Creates a level from its raw value.
    pub const fn new(level: i32) -> Self {
        Level(level)
    }

    /// Returns the raw value of this level.
    pub const fn get(self) -> i32 {
        self.0
    }

    /// Maps this level onto the OpenTelemetry severity scale.
    ///
    /// Returns `None` when `self + SEVERITY_OFFSET` falls outside of the
    /// `1..=24` range defined by the logs data model.
    pub fn to_severity(self) -> Option<Severity> {
        let number = self.0.checked_add(SEVERITY_OFFSET)?;
        let index = usize::try_from(number.checked_sub(1)?).ok()?;
        SEVERITIES.get(index).copied()
    }

    /// Maps an OpenTelemetry severity back onto the front-end scale.
    pub fn from_severity(severity: Severity) -> Self {
        Level(severity_number(severity) - SEVERITY_OFFSET)
    }
}

impl From<Severity> for Level {
    fn from(severity: Severity) -> Self {
        Level::from_severity(severity)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (name, base) = if self.0 < Level::INFO.0 {
            ("DEBUG", Level::DEBUG.0)
        } else if self.0 < Level::WARN.0 {
            ("INFO", Level::INFO.0)
        } else if self.0 < Level::ERROR.0 {
            ("WARN", Level::WARN.0)
        } else {
            ("ERROR", Level::ERROR.0)
        };
        let delta = i64::from(self.0) - i64::from(base);
        if delta == 0 {
            f.write_str(name)
        } else {
            write!(f, "{name}{delta:+}")
        }
    }
}
