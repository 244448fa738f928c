//! Opt-in timing scopes and a frame-level debug log.
//!
//! `--perf` reports scope durations through `tracing`. The debug log is a
//! plain file of timestamped events (relayouts, jumps, tracker flushes)
//! for diagnosing scroll behaviour without a subscriber.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{LazyLock, Mutex};
use std::time::Instant;

static ENABLED: AtomicBool = AtomicBool::new(false);
static DEBUG_LOG: LazyLock<Mutex<DebugLog>> = LazyLock::new(|| Mutex::new(DebugLog::new()));

/// Reports its lifetime on drop when perf reporting is enabled.
#[derive(Debug)]
pub struct Scope {
    name: &'static str,
    start: Instant,
}

impl Drop for Scope {
    fn drop(&mut self) {
        if !is_enabled() {
            return;
        }
        let elapsed_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        tracing::info!(target: "pankview::perf", scope = self.name, elapsed_ms, "perf");
        log_event(self.name, format!("{elapsed_ms:.3} ms"));
    }
}

#[derive(Debug)]
struct DebugLog {
    start: Instant,
    writer: Option<BufWriter<File>>,
}

impl DebugLog {
    fn new() -> Self {
        Self {
            start: Instant::now(),
            writer: None,
        }
    }
}

pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

pub fn scope(name: &'static str) -> Scope {
    Scope {
        name,
        start: Instant::now(),
    }
}

/// Start (or stop, with `None`) writing the debug log.
///
/// # Errors
///
/// Returns an error if the log file cannot be created.
pub fn set_debug_log_path(path: Option<&Path>) -> std::io::Result<()> {
    let mut log = DEBUG_LOG.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    match path {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            writeln!(writer, "pankview debug log start")?;
            writer.flush()?;
            log.start = Instant::now();
            log.writer = Some(writer);
        }
        None => log.writer = None,
    }
    Ok(())
}

pub fn is_debug_log_enabled() -> bool {
    DEBUG_LOG
        .lock()
        .map(|log| log.writer.is_some())
        .unwrap_or(false)
}

/// Append one event line. No-op unless a debug log path is set.
pub fn log_event(name: &str, detail: impl AsRef<str>) {
    let Ok(mut log) = DEBUG_LOG.lock() else {
        return;
    };
    let elapsed_ms = log.start.elapsed().as_secs_f64() * 1000.0;
    if let Some(writer) = log.writer.as_mut() {
        let _ = writeln!(writer, "[{elapsed_ms:>10.3} ms] {name}: {}", detail.as_ref());
        let _ = writer.flush();
    }
}
