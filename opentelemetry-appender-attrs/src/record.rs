use crate::{Attr, Level};
use std::{borrow::Cow, panic::Location, time::SystemTime};

/// A single log event as produced by the front-end.
///
/// Records are built per call and consumed by [`Handler::handle`].
///
/// [`Handler::handle`]: crate::Handler::handle
#[derive(Debug, Clone)]
pub struct Record {
    time: Option<SystemTime>,
    level: Level,
    message: Cow<'static, str>,
    attrs: Vec<Attr>,
    source: Option<Source>,
}

impl Record {
    /// Creates a record stamped with the current time.
    pub fn new(level: Level, message: impl Into<Cow<'static, str>>) -> Self {
        Record {
            time: Some(SystemTime::now()),
            level,
            message: message.into(),
            attrs: Vec::new(),
            source: None,
        }
    }

    /// Replaces the timestamp. `None` leaves the emitted record without one.
    pub fn with_time(mut self, time: Option<SystemTime>) -> Self {
        self.time = time;
        self
    }

    /// Attaches the location the event was logged from.
    pub fn with_source(mut self, source: Source) -> Self {
        self.source = Some(source);
        self
    }

    /// Appends event-local attributes.
    pub fn with_attrs(mut self, attrs: impl IntoIterator<Item = Attr>) -> Self {
        self.attrs.extend(attrs);
        self
    }

    /// Appends event-local attributes in place.
    pub fn add_attrs(&mut self, attrs: impl IntoIterator<Item = Attr>) {
        self.attrs.extend(attrs);
    }

    /// When the event happened.
    pub fn time(&self) -> Option<SystemTime> {
        self.time
    }

    /// The event level.
    pub fn level(&self) -> Level {
        self.level
    }

    /// The log message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Event-local attributes, in insertion order.
    pub fn attrs(&self) -> &[Attr] {
        &self.attrs
    }

    /// Where the event was logged from, if captured.
    pub fn source(&self) -> Option<&Source> {
        self.source.as_ref()
    }

    pub(crate) fn into_parts(self) -> (Cow<'static, str>, Vec<Attr>, Option<Source>) {
        (self.message, self.attrs, self.source)
    }
}

/// The program location a record was created at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Source {
    file: &'static str,
    line: u32,
    function: Option<&'static str>,
}

impl Source {
    /// Creates a source location.
    pub const fn new(file: &'static str, line: u32, function: Option<&'static str>) -> Self {
        Source {
            file,
            line,
            function,
        }
    }

    /// The location of the caller of the function this is invoked from.
    ///
    /// The function name is not known on this path; use [`source!`] to
    /// capture it as well.
    ///
    /// [`source!`]: crate::source
    #[track_caller]
    pub fn caller() -> Self {
        let location = Location::caller();
        Source::new(location.file(), location.line(), None)
    }

    /// Path of the source file.
    pub fn file(&self) -> &'static str {
        self.file
    }

    /// Line number within [`Source::file`].
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Fully qualified name of the enclosing function, when known.
    pub fn function(&self) -> Option<&'static str> {
        self.function
    }
}

/// Captures the current file, line and enclosing function as a [`Source`].
///
/// ```
/// use opentelemetry_appender_attrs::source;
///
/// fn handler() -> opentelemetry_appender_attrs::Source {
///     source!()
/// }
///
/// assert!(handler().function().unwrap().ends_with("handler"));
/// ```
#[macro_export]
macro_rules! source {
    () => {
        $crate::Source::new(file!(), line!(), Some($crate::__function_name!()))
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __function_name {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = type_name_of(f);
        name.strip_suffix("::f").unwrap_or(name)
    }};
}
