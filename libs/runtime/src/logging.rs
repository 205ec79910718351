use crate::config::{LoggingConfig, Section};
use parking_lot::Mutex;
use std::{
    collections::HashMap,
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

/// `None` means the sink is switched off for that subsystem.
fn parse_level(s: &str) -> Option<LevelFilter> {
    match s.trim().to_ascii_lowercase().as_str() {
        "trace" => Some(LevelFilter::TRACE),
        "debug" => Some(LevelFilter::DEBUG),
        "info" | "" => Some(LevelFilter::INFO),
        "warn" | "warning" => Some(LevelFilter::WARN),
        "error" => Some(LevelFilter::ERROR),
        "off" | "none" => None,
        _ => Some(LevelFilter::INFO),
    }
}

/// Returns true if target == prefix or target starts with "prefix::".
fn matches_prefix(target: &str, prefix: &str) -> bool {
    target
        .strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
}

fn resolve_log_path(file: &str, base_dir: &Path) -> PathBuf {
    let p = Path::new(file);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base_dir.join(p)
    }
}

// -------- rotating file sink --------

type Rotating = Arc<Mutex<FileRotate<AppendTimestamp>>>;

#[derive(Clone)]
struct FileSink(Rotating);

impl FileSink {
    fn open(path: &Path, section: &Section) -> std::io::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let max_bytes = section.max_size_mb.unwrap_or(100).saturating_mul(1024 * 1024);
        let limit = match section.max_backups {
            Some(n) => FileLimit::MaxFiles(n.max(1)),
            None => FileLimit::Age(chrono::Duration::days(7)),
        };
        let rot = FileRotate::new(
            path,
            AppendTimestamp::default(limit),
            ContentLimit::BytesSurpassed(max_bytes as usize),
            Compression::None,
            #[cfg(unix)]
            None,
        );
        Ok(Self(Arc::new(Mutex::new(rot))))
    }
}

/// Writer handed to the fmt layer; `None` swallows the record.
struct SinkHandle(Option<Rotating>);

impl Write for SinkHandle {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match &self.0 {
            Some(rot) => rot.lock().write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match &self.0 {
            Some(rot) => rot.lock().flush(),
            None => Ok(()),
        }
    }
}

/// Picks the file for a record by the longest matching subsystem prefix,
/// falling back to the default file.
#[derive(Clone, Default)]
struct FileRouter {
    default: Option<FileSink>,
    by_prefix: Vec<(String, FileSink)>,
}

impl FileRouter {
    fn resolve(&self, target: &str) -> Option<Rotating> {
        self.by_prefix
            .iter()
            .filter(|(prefix, _)| matches_prefix(target, prefix))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, sink)| sink.0.clone())
            .or_else(|| self.default.as_ref().map(|s| s.0.clone()))
    }

    fn is_empty(&self) -> bool {
        self.default.is_none() && self.by_prefix.is_empty()
    }
}

impl<'a> fmt::MakeWriter<'a> for FileRouter {
    type Writer = SinkHandle;

    fn make_writer(&'a self) -> Self::Writer {
        SinkHandle(self.default.as_ref().map(|s| s.0.clone()))
    }

    fn make_writer_for(&'a self, meta: &tracing::Metadata<'_>) -> Self::Writer {
        SinkHandle(self.resolve(meta.target()))
    }
}

// -------- filters --------

fn level_or_off(level: &str) -> LevelFilter {
    parse_level(level).unwrap_or(LevelFilter::OFF)
}

fn console_targets(cfg: &LoggingConfig) -> Targets {
    let default = cfg
        .get(DEFAULT_SECTION)
        .map(|s| level_or_off(&s.console_level))
        .unwrap_or(LevelFilter::INFO);
    cfg.iter()
        .filter(|(name, _)| name.as_str() != DEFAULT_SECTION)
        .fold(Targets::new().with_default(default), |t, (name, s)| {
            t.with_target(name.clone(), level_or_off(&s.console_level))
        })
}

fn file_targets(cfg: &LoggingConfig, router: &FileRouter) -> Targets {
    let default = match (cfg.get(DEFAULT_SECTION), &router.default) {
        (Some(s), Some(_)) => level_or_off(&s.file_level),
        _ => LevelFilter::OFF,
    };
    cfg.iter()
        .filter(|(name, _)| name.as_str() != DEFAULT_SECTION)
        .fold(Targets::new().with_default(default), |t, (name, s)| {
            let has_own_file = router.by_prefix.iter().any(|(p, _)| p == name);
            let level = if has_own_file || router.default.is_some() {
                if s.file_level.trim().is_empty() {
                    default
                } else {
                    level_or_off(&s.file_level)
                }
            } else {
                LevelFilter::OFF
            };
            t.with_target(name.clone(), level)
        })
}

fn build_router(cfg: &LoggingConfig, base_dir: &Path) -> FileRouter {
    let mut router = FileRouter::default();
    let mut opened: HashMap<PathBuf, FileSink> = HashMap::new();

    for (name, section) in cfg {
        if section.file.trim().is_empty() {
            continue;
        }
        let path = resolve_log_path(section.file.trim(), base_dir);
        let sink = match opened.get(&path) {
            Some(s) => s.clone(),
            None => match FileSink::open(&path, section) {
                Ok(s) => {
                    opened.insert(path.clone(), s.clone());
                    s
                }
                Err(e) => {
                    eprintln!("failed to open log file '{}' for '{name}': {e}", path.display());
                    continue;
                }
            },
        };
        if name == DEFAULT_SECTION {
            router.default = Some(sink);
        } else {
            router.by_prefix.push((name.clone(), sink));
        }
    }
    router
}

// -------- public init --------

/// Install the global subscriber: a console layer and, when any file is
/// configured, a JSON file layer routed per subsystem. Relative file paths
/// resolve against `base_dir` (normally `server.home_dir`).
///
/// Calling this twice is harmless; the second install is ignored.
pub fn init_logging_from_config(cfg: &LoggingConfig, base_dir: &Path) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer, Registry};

    let _ = tracing_log::LogTracer::init();

    let console = fmt::layer()
        .with_ansi(std::io::stdout().is_terminal())
        .with_target(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_filter(console_targets(cfg));

    let router = build_router(cfg, base_dir);
    if router.is_empty() {
        let _ = Registry::default().with(console).try_init();
        return;
    }

    let targets = file_targets(cfg, &router);
    let file = fmt::layer()
        .json()
        .with_ansi(false)
        .with_target(true)
        .with_current_span(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_writer(router)
        .with_filter(targets);

    let _ = Registry::default().with(console).with(file).try_init();
}
