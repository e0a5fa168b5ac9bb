//! A `log` backend that writes legacy-coded lines.
//!
//! The library itself only logs through the `log` facade and never installs a
//! logger. [`LegacyLogger`] is provided for hosts whose console understands
//! `§` codes: every record becomes one line with a colored level badge.
//!
//! ```no_run
//! use log::LevelFilter;
//! use rgb_text::logging::LegacyLogger;
//!
//! LegacyLogger::new()
//!     .level(LevelFilter::Debug)
//!     .markup(true)
//!     .init()
//!     .expect("logger already installed");
//!
//! log::info!("&aServer started on port {}", 25565);
//! ```

use std::io::{self, Write};
use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use time::{OffsetDateTime, format_description::OwnedFormatItem};

use crate::color::Color;
use crate::component::StyledRun;
use crate::palette::LegacyCode;
use crate::pipeline::Pipeline;
use crate::sync::{lock_recover, lock_recover_debug};

/// Logger for the `log` crate that renders records as legacy-coded text.
///
/// # Thread Safety
///
/// The sink and the last printed timestamp are each behind a mutex with
/// poison recovery, so any number of threads may log concurrently. Lines are
/// written whole.
pub struct LegacyLogger {
    sink: Mutex<Box<dyn Write + Send>>,
    level: LevelFilter,
    show_time: bool,
    omit_repeated_times: bool,
    show_level: bool,
    show_target: bool,
    markup: bool,
    plain: bool,
    time_format: OwnedFormatItem,
    last_time: Mutex<Option<String>>,
}

impl Default for LegacyLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl LegacyLogger {
    /// Create a logger writing to stderr with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_sink(io::stderr())
    }

    /// Create a logger writing to `sink`.
    #[must_use]
    pub fn with_sink(sink: impl Write + Send + 'static) -> Self {
        let time_format = time::format_description::parse_owned::<2>("[hour]:[minute]:[second]")
            .unwrap_or_else(|_| OwnedFormatItem::Compound(Box::new([])));
        Self {
            sink: Mutex::new(Box::new(sink)),
            level: LevelFilter::Info,
            show_time: true,
            omit_repeated_times: false,
            show_level: true,
            show_target: false,
            markup: false,
            plain: false,
            time_format,
            last_time: Mutex::new(None),
        }
    }

    /// Set the minimum log level.
    #[must_use]
    pub fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Enable or disable timestamps.
    #[must_use]
    pub fn show_time(mut self, show: bool) -> Self {
        self.show_time = show;
        self
    }

    /// Blank out a timestamp equal to the previous line's.
    #[must_use]
    pub fn omit_repeated_times(mut self, omit: bool) -> Self {
        self.omit_repeated_times = omit;
        self
    }

    /// Enable or disable the level badge.
    #[must_use]
    pub fn show_level(mut self, show: bool) -> Self {
        self.show_level = show;
        self
    }

    /// Enable or disable the record target.
    #[must_use]
    pub fn show_target(mut self, show: bool) -> Self {
        self.show_target = show;
        self
    }

    /// Parse messages as markup (legacy codes, hex colors, gradients).
    #[must_use]
    pub fn markup(mut self, markup: bool) -> Self {
        self.markup = markup;
        self
    }

    /// Write lines without any codes.
    #[must_use]
    pub fn plain(mut self, plain: bool) -> Self {
        self.plain = plain;
        self
    }

    /// Override the time format (a `time` format description).
    ///
    /// An invalid description keeps the current format.
    #[must_use]
    pub fn time_format(mut self, format: &str) -> Self {
        if let Ok(parsed) = time::format_description::parse_owned::<2>(format) {
            self.time_format = parsed;
        }
        self
    }

    /// Install as the global logger.
    ///
    /// # Errors
    ///
    /// Fails if a logger is already installed.
    pub fn init(self) -> Result<(), SetLoggerError> {
        log::set_max_level(self.level);
        log::set_boxed_logger(Box::new(self))
    }

    fn format_time(&self) -> String {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        now.format(&self.time_format)
            .unwrap_or_else(|_| now.to_string())
    }

    /// Badge color per level; errors are also bold.
    fn level_badge(level: Level) -> (LegacyCode, bool) {
        match level {
            Level::Trace => (LegacyCode::DarkGray, false),
            Level::Debug => (LegacyCode::Blue, false),
            Level::Info => (LegacyCode::Green, false),
            Level::Warn => (LegacyCode::Yellow, false),
            Level::Error => (LegacyCode::Red, true),
        }
    }

    /// Build the line for a record as a flat run tree.
    fn format_record(&self, record: &Record<'_>) -> StyledRun {
        let mut line = StyledRun::text("");

        if self.show_time {
            let time_str = self.format_time();
            let display = if self.omit_repeated_times {
                let mut last = lock_recover(&self.last_time);
                if last.as_ref() == Some(&time_str) {
                    " ".repeat(time_str.chars().count())
                } else {
                    *last = Some(time_str.clone());
                    time_str
                }
            } else {
                time_str
            };
            line.push(
                StyledRun::text(format!("{display} "))
                    .color(Color::from_palette(LegacyCode::Gray)),
            );
        }

        if self.show_level {
            let (code, bold) = Self::level_badge(record.level());
            let mut badge =
                StyledRun::text(format!("{:<5} ", record.level())).color(Color::from_palette(code));
            if bold {
                badge = badge.bold();
            }
            line.push(badge);
        }

        if self.show_target {
            line.push(
                StyledRun::text(format!("{} ", record.target()))
                    .color(Color::from_palette(LegacyCode::DarkGray)),
            );
        }

        let message = record.args().to_string();
        if self.markup {
            // A leading reset keeps the badge color from leaking into the message.
            let parsed = Pipeline::global().parse(&format!("&r{message}"));
            line.extra.extend(parsed.extra);
        } else {
            line.push(StyledRun::text(message).color(Color::from_palette(LegacyCode::White)));
        }

        line
    }

    fn render(&self, line: &StyledRun) -> String {
        if self.plain {
            line.to_plain_text()
        } else {
            line.to_legacy_text()
        }
    }
}

/// Records are written to the sink one line at a time. A failing sink drops
/// the line: a logger has nowhere to report its own write errors.
impl Log for LegacyLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let rendered = self.render(&self.format_record(record));
        let mut sink = lock_recover_debug(&self.sink, "LegacyLogger sink");
        // Write errors are dropped, see the impl docs.
        let _ = writeln!(sink, "{rendered}");
    }

    fn flush(&self) {
        let _ = lock_recover(&self.sink).flush();
    }
}
