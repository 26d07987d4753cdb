use crate::config::{LoggingConfig, Section};
use anyhow::{Context, Result};
use parking_lot::Mutex;
use std::{
    io::{IsTerminal, Write},
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{filter::Targets, fmt};

use file_rotate::{
    compression::Compression,
    suffix::{AppendTimestamp, FileLimit},
    ContentLimit, FileRotate,
};

const DEFAULT_SECTION: &str = "default";
const DEFAULT_MAX_SIZE_MB: u64 = 10;
const DEFAULT_MAX_BACKUPS: usize = 3;

// -------- level helpers --------

/// "off"/"none" and an empty string disable output; unknown names fall back to INFO.
fn parse_level(s: &str) -> LevelFilter {
    match s.trim().to_ascii_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        "" | "off" | "none" => LevelFilter::OFF,
        _ => LevelFilter::INFO,
    }
}

/// True if `target` is `prefix` itself or a module below it.
fn matches_target_prefix(target: &str, prefix: &str) -> bool {
    target == prefix
        || (target.starts_with(prefix) && target[prefix.len()..].starts_with("::"))
}

fn named_sections(cfg: &LoggingConfig) -> impl Iterator<Item = (&String, &Section)> + '_ {
    cfg.iter().filter(|(k, _)| k.as_str() != DEFAULT_SECTION)
}

fn has_file(section: &Section) -> bool {
    !section.file.trim().is_empty()
}

// -------- filters --------

fn console_targets(cfg: &LoggingConfig) -> Targets {
    let default = cfg
        .get(DEFAULT_SECTION)
        .map(|s| parse_level(&s.console_level))
        .unwrap_or(LevelFilter::OFF);

    named_sections(cfg).fold(Targets::new().with_default(default), |t, (name, s)| {
        t.with_target(name.clone(), parse_level(&s.console_level))
    })
}

/// Named sections without a file of their own spill into the default file.
fn file_targets(cfg: &LoggingConfig) -> Targets {
    let default_section = cfg.get(DEFAULT_SECTION).filter(|s| has_file(s));
    let default = default_section
        .map(|s| parse_level(&s.file_level))
        .unwrap_or(LevelFilter::OFF);

    named_sections(cfg).fold(Targets::new().with_default(default), |t, (name, s)| {
        let level = if has_file(s) || default_section.is_some() {
            parse_level(&s.file_level)
        } else {
            LevelFilter::OFF
        };
        t.with_target(name.clone(), level)
    })
}

// -------- rotating writer for files --------

#[derive(Clone)]
struct RotWriter(Arc<Mutex<FileRotate<AppendTimestamp>>>);

impl Write for RotWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.0.lock().flush()
    }
}

/// Writer picked per event; `None` swallows the record.
struct RoutedWriter(Option<RotWriter>);

impl Write for RoutedWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match &mut self.0 {
            Some(w) => w.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match &mut self.0 {
            Some(w) => w.flush(),
            None => Ok(()),
        }
    }
}

/// Routes records to the file of the longest matching target section,
/// falling back to the default file.
struct FileRouter {
    default: Option<RotWriter>,
    by_target: Vec<(String, RotWriter)>,
}

impl FileRouter {
    fn resolve_for(&self, target: &str) -> Option<RotWriter> {
        self.by_target
            .iter()
            .filter(|(prefix, _)| matches_target_prefix(target, prefix))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, w)| w.clone())
            .or_else(|| self.default.clone())
    }

    fn is_empty(&self) -> bool {
        self.default.is_none() && self.by_target.is_empty()
    }
}

impl<'a> fmt::MakeWriter<'a> for FileRouter {
    type Writer = RoutedWriter;

    fn make_writer(&'a self) -> Self::Writer {
        RoutedWriter(self.default.clone())
    }

    fn make_writer_for(&'a self, meta: &tracing::Metadata<'_>) -> Self::Writer {
        RoutedWriter(self.resolve_for(meta.target()))
    }
}

// -------- paths --------

/// Relative log paths live under `base_dir` (the console home dir).
fn resolve_log_path(file: &str, base_dir: &Path) -> PathBuf {
    let p = Path::new(file);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base_dir.join(p)
    }
}

fn create_rotating_writer(section: &Section, base_dir: &Path) -> Result<RotWriter> {
    let log_path = resolve_log_path(&section.file, base_dir);
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("cannot create log dir {}", parent.display()))?;
    }

    let max_bytes = section.max_size_mb.unwrap_or(DEFAULT_MAX_SIZE_MB) * 1024 * 1024;
    let max_files = section.max_backups.unwrap_or(DEFAULT_MAX_BACKUPS);

    let rot = FileRotate::new(
        &log_path,
        AppendTimestamp::default(FileLimit::MaxFiles(max_files)),
        ContentLimit::BytesSurpassed(max_bytes as usize),
        Compression::None,
        #[cfg(unix)]
        None,
    );

    Ok(RotWriter(Arc::new(Mutex::new(rot))))
}

fn open_writer(name: &str, section: &Section, base_dir: &Path) -> Option<RotWriter> {
    if !has_file(section) {
        return None;
    }
    match create_rotating_writer(section, base_dir) {
        Ok(w) => Some(w),
        Err(e) => {
            eprintln!("Failed to init log file for '{}': {:#}", name, e);
            None
        }
    }
}

fn build_file_router(cfg: &LoggingConfig, base_dir: &Path) -> FileRouter {
    FileRouter {
        default: cfg
            .get(DEFAULT_SECTION)
            .and_then(|s| open_writer(DEFAULT_SECTION, s, base_dir)),
        by_target: named_sections(cfg)
            .filter_map(|(name, s)| open_writer(name, s, base_dir).map(|w| (name.clone(), w)))
            .collect(),
    }
}

// -------- public init --------

/// Install the global subscriber.
///
/// Console output is filtered per target by `console_level`; file output is
/// JSON, filtered by `file_level` and routed to each section's rotating file.
/// Relative file paths resolve against `base_dir`. Calling this twice is a no-op.
pub fn init_logging_from_config(cfg: &LoggingConfig, base_dir: &Path) {
    use tracing_subscriber::{layer::SubscriberExt, prelude::*, Registry};

    // Bridge `log` → `tracing` before the subscriber goes in.
    let _ = tracing_log::LogTracer::init();

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_filter(console_targets(cfg));

    let router = build_file_router(cfg, base_dir);
    if router.is_empty() {
        let _ = Registry::default().with(console_layer).try_init();
        return;
    }

    let file_layer = fmt::layer()
        .json()
        .with_ansi(false)
        .with_target(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_writer(router)
        .with_filter(file_targets(cfg));

    let _ = Registry::default()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}
