//! Centralized logging for the rasterization core.
//!
//! # Architecture
//!
//! - **LogConfig**: Thread-safe global configuration using atomic operations
//! - **LogLevel**: Hierarchical log levels (Off < Error < Warn < Info < Debug < Trace)
//! - **LogCategory**: One category per raster stage (mapping, line, triangle, contribution, config)
//! - **log()**: Common logging function for all output
//!
//! Raster calls can be made thousands of times per frame, so every message is
//! built lazily and each category is rate limited. Output goes to stderr, or to
//! a file written by a background thread once [`LogConfig::set_log_file`] is called.
//!
//! # Usage
//!
//! ```rust
//! use raster_core::logging::{log, LogCategory, LogLevel};
//!
//! log(LogCategory::Line, LogLevel::Debug, || {
//!     format!("Line: trace stopped at ({}, {})", 320, 17)
//! });
//! ```

use std::collections::VecDeque;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU8, AtomicUsize, Ordering};
use std::sync::mpsc::{channel, Sender};
use std::sync::{Mutex, MutexGuard, OnceLock};
use std::thread;
use std::time::{Duration, Instant};

/// Log level for controlling verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Off = 0,
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
    Trace = 5,
}

impl LogLevel {
    /// Parse log level from string (case-insensitive)
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "off" | "0" => Some(LogLevel::Off),
            "error" | "err" | "1" => Some(LogLevel::Error),
            "warn" | "warning" | "2" => Some(LogLevel::Warn),
            "info" | "3" => Some(LogLevel::Info),
            "debug" | "4" => Some(LogLevel::Debug),
            "trace" | "5" => Some(LogLevel::Trace),
            _ => None,
        }
    }

    fn from_u8(val: u8) -> Self {
        match val {
            1 => LogLevel::Error,
            2 => LogLevel::Warn,
            3 => LogLevel::Info,
            4 => LogLevel::Debug,
            5 => LogLevel::Trace,
            _ => LogLevel::Off,
        }
    }
}

/// Log category, one per raster stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogCategory {
    /// NDC to buffer-space mapping
    Mapping,
    /// Line tracing (bound truncation, zero-length segments)
    Line,
    /// Triangle edge trace and scanline fill
    Triangle,
    /// Per-pixel vertex weights
    Contribution,
    /// Configuration loading
    Config,
}

const CATEGORY_COUNT: usize = 5;

impl LogCategory {
    pub const ALL: [LogCategory; CATEGORY_COUNT] = [
        LogCategory::Mapping,
        LogCategory::Line,
        LogCategory::Triangle,
        LogCategory::Contribution,
        LogCategory::Config,
    ];

    fn index(self) -> usize {
        match self {
            LogCategory::Mapping => 0,
            LogCategory::Line => 1,
            LogCategory::Triangle => 2,
            LogCategory::Contribution => 3,
            LogCategory::Config => 4,
        }
    }

    /// Parse a category name (case-insensitive)
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "mapping" | "map" => Some(LogCategory::Mapping),
            "line" => Some(LogCategory::Line),
            "triangle" | "tri" => Some(LogCategory::Triangle),
            "contribution" | "weights" => Some(LogCategory::Contribution),
            "config" => Some(LogCategory::Config),
            _ => None,
        }
    }
}

/// Per-category state tracked by the rate limiter
#[derive(Default)]
struct WindowState {
    timestamps: VecDeque<Instant>,
    dropped: usize,
    last_drop_report: Option<Instant>,
}

/// Sliding-window rate limiter, one window per category
struct RateLimiter {
    max_logs_per_second: AtomicUsize,
    window_duration: Duration,
    windows: Mutex<[WindowState; CATEGORY_COUNT]>,
}

impl RateLimiter {
    fn new(max_logs_per_second: usize) -> Self {
        Self {
            max_logs_per_second: AtomicUsize::new(max_logs_per_second),
            window_duration: Duration::from_secs(1),
            windows: Mutex::new(Default::default()),
        }
    }

    fn set_max_logs_per_second(&self, max: usize) {
        self.max_logs_per_second.store(max, Ordering::Relaxed);
    }

    fn get_max_logs_per_second(&self) -> usize {
        self.max_logs_per_second.load(Ordering::Relaxed)
    }

    fn lock_windows(&self) -> MutexGuard<'_, [WindowState; CATEGORY_COUNT]> {
        // A panic while holding the lock leaves only counters behind, so keep going.
        self.windows.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Returns (allowed, dropped_count) where dropped_count is Some(n) when a
    /// drop summary is due for this category.
    fn should_allow(&self, category: LogCategory) -> (bool, Option<usize>) {
        let now = Instant::now();
        let mut windows = self.lock_windows();
        let state = &mut windows[category.index()];

        while let Some(&front) = state.timestamps.front() {
            if now.duration_since(front) > self.window_duration {
                state.timestamps.pop_front();
            } else {
                break;
            }
        }

        if state.timestamps.len() < self.get_max_logs_per_second() {
            state.timestamps.push_back(now);
            if state.dropped > 0 {
                let dropped = std::mem::take(&mut state.dropped);
                state.last_drop_report = Some(now);
                return (true, Some(dropped));
            }
            return (true, None);
        }

        state.dropped += 1;
        let report_due = match state.last_drop_report {
            None => true,
            Some(last) => now.duration_since(last) >= Duration::from_secs(1),
        };
        if report_due {
            let dropped = std::mem::take(&mut state.dropped);
            state.last_drop_report = Some(now);
            (false, Some(dropped))
        } else {
            (false, None)
        }
    }
}

/// Global logging configuration
pub struct LogConfig {
    global_level: AtomicU8,
    category_levels: [AtomicU8; CATEGORY_COUNT],
    log_sender: Mutex<Option<Sender<String>>>,
    file_logging_enabled: AtomicBool,
    rate_limiter: RateLimiter,
}

impl LogConfig {
    /// Create a new LogConfig with all logging disabled and a 60 logs/second limit
    fn new() -> Self {
        Self {
            global_level: AtomicU8::new(LogLevel::Off as u8),
            category_levels: Default::default(),
            log_sender: Mutex::new(None),
            file_logging_enabled: AtomicBool::new(false),
            rate_limiter: RateLimiter::new(60),
        }
    }

    /// Get the global singleton instance
    pub fn global() -> &'static Self {
        static INSTANCE: OnceLock<LogConfig> = OnceLock::new();
        INSTANCE.get_or_init(LogConfig::new)
    }

    pub fn set_global_level(&self, level: LogLevel) {
        self.global_level.store(level as u8, Ordering::Relaxed);
    }

    pub fn get_global_level(&self) -> LogLevel {
        LogLevel::from_u8(self.global_level.load(Ordering::Relaxed))
    }

    /// Set log level for a specific category (Off means "use the global level")
    pub fn set_level(&self, category: LogCategory, level: LogLevel) {
        self.category_levels[category.index()].store(level as u8, Ordering::Relaxed);
    }

    pub fn get_level(&self, category: LogCategory) -> LogLevel {
        LogLevel::from_u8(self.category_levels[category.index()].load(Ordering::Relaxed))
    }

    /// A category-specific level wins; a category left at Off falls back to the global level.
    pub fn should_log(&self, category: LogCategory, level: LogLevel) -> bool {
        if level == LogLevel::Off {
            return false;
        }
        let category_level = self.get_level(category);
        if category_level != LogLevel::Off {
            level <= category_level
        } else {
            level <= self.get_global_level()
        }
    }

    /// Reset all logging to Off
    pub fn reset(&self) {
        self.set_global_level(LogLevel::Off);
        for category in LogCategory::ALL {
            self.set_level(category, LogLevel::Off);
        }
    }

    /// Set the maximum logs per second per category
    pub fn set_rate_limit(&self, max_logs_per_second: usize) {
        self.rate_limiter
            .set_max_logs_per_second(max_logs_per_second);
    }

    pub fn get_rate_limit(&self) -> usize {
        self.rate_limiter.get_max_logs_per_second()
    }

    /// Send log output to a file, appended by a background writer thread.
    ///
    /// Replaces any previously configured file.
    pub fn set_log_file(&self, path: PathBuf) -> std::io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        let (sender, receiver) = channel::<String>();

        thread::Builder::new()
            .name("raster-log-writer".to_string())
            .spawn(move || {
                while let Ok(message) = receiver.recv() {
                    let _ = writeln!(file, "{}", message);
                    let _ = file.flush();
                }
                let _ = file.flush();
            })?;

        *self.lock_sender() = Some(sender);
        self.file_logging_enabled.store(true, Ordering::Relaxed);
        Ok(())
    }

    /// Stop logging to file; the writer thread exits once its channel closes.
    pub fn clear_log_file(&self) {
        *self.lock_sender() = None;
        self.file_logging_enabled.store(false, Ordering::Relaxed);
    }

    fn lock_sender(&self) -> MutexGuard<'_, Option<Sender<String>>> {
        self.log_sender.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn write_message(&self, message: &str) {
        if self.file_logging_enabled.load(Ordering::Relaxed) {
            if let Some(sender) = self.lock_sender().as_ref() {
                if sender.send(message.to_string()).is_ok() {
                    return;
                }
            }
        }
        eprintln!("{}", message);
    }
}

/// Log a message with the specified category and level
///
/// The closure only runs when the category/level is enabled and the rate
/// limiter lets the message through. When messages are dropped, a summary
/// line is emitted at most once per second per category.
pub fn log<F>(category: LogCategory, level: LogLevel, message_fn: F)
where
    F: FnOnce() -> String,
{
    let config = LogConfig::global();
    if !config.should_log(category, level) {
        return;
    }

    let (allowed, dropped_count) = config.rate_limiter.should_allow(category);
    if let Some(count) = dropped_count.filter(|&n| n > 0) {
        config.write_message(&format!(
            "[{:?}] WARNING: Rate limit exceeded, {} log message(s) dropped in the last second",
            category, count
        ));
    }

    if allowed {
        let message = message_fn();
        config.write_message(&format!("[{:?}] {:?}: {}", category, level, message));
    }
}
