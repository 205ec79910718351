use anyhow::{anyhow, Context, Result};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::config::DatabaseConfig;

const MEMORY_DSN: &str = "sqlite::memory:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbBackend {
    Sqlite,
}

/// Only SQLite is compiled in; other schemes are rejected up front.
pub fn detect_backend(dsn: &str) -> Result<DbBackend> {
    let raw = dsn.trim();
    if raw.is_empty() {
        return Err(anyhow!("database URL not configured"));
    }
    if raw.eq_ignore_ascii_case(MEMORY_DSN) {
        return Ok(DbBackend::Sqlite);
    }
    let url = Url::parse(raw).map_err(|e| anyhow!("invalid database DSN '{raw}': {e}"))?;
    match url.scheme() {
        "sqlite" | "sqlite3" => Ok(DbBackend::Sqlite),
        other => Err(anyhow!("unsupported database type: {other}")),
    }
}

/// Rewrite a file-backed sqlite DSN so its path is absolute under `base_dir`.
///
/// In-memory DSNs are returned as `sqlite::memory:`. Backslashes become forward
/// slashes and the query string is preserved.
pub fn absolutize_sqlite_dsn(dsn: &str, base_dir: &Path, create_dirs: bool) -> Result<String> {
    if dsn.eq_ignore_ascii_case(MEMORY_DSN) || dsn.eq_ignore_ascii_case("sqlite://:memory:") {
        return Ok(MEMORY_DSN.to_string());
    }
    let db_path = dsn
        .strip_prefix("sqlite://")
        .ok_or_else(|| anyhow!("DSN must start with sqlite:// (got: {dsn})"))?;

    let (path_str, query) = match db_path.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (db_path, None),
    };

    let mut p = PathBuf::from(path_str);
    if p.as_os_str().is_empty() {
        return Err(anyhow!("empty SQLite path in DSN"));
    }
    if p.is_relative() {
        p = base_dir.join(p);
    }
    if create_dirs {
        if let Some(dir) = p.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("cannot create database dir {}", dir.display()))?;
        }
    }

    let mut out = String::from("sqlite://");
    out.push_str(&p.to_string_lossy().replace('\\', "/"));
    if let Some(q) = query {
        out.push('?');
        out.push_str(q);
    }
    Ok(out)
}

/// Open the pool described by `cfg` with foreign keys enforced.
pub async fn connect_database(cfg: &DatabaseConfig, base_dir: &Path) -> Result<DatabaseConnection> {
    detect_backend(&cfg.url)?;
    let dsn = absolutize_sqlite_dsn(cfg.url.trim(), base_dir, true)?;
    let in_memory = dsn == MEMORY_DSN;

    let mut opts = ConnectOptions::new(dsn.clone());
    // Every pooled connection to sqlite::memory: would see its own empty database.
    let max_conns = if in_memory { 1 } else { cfg.max_conns.unwrap_or(5).max(1) };
    opts.max_connections(max_conns)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);

    let busy = Duration::from_millis(u64::from(cfg.busy_timeout_ms.unwrap_or(5000)));
    opts.map_sqlx_sqlite_opts(move |o| o.foreign_keys(true).busy_timeout(busy));

    tracing::info!(dsn = %dsn, max_conns, "connecting to database");
    Database::connect(opts)
        .await
        .with_context(|| format!("failed to connect to {dsn}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn memory_dsn_is_kept() {
        let base = Path::new("/tmp");
        assert_eq!(absolutize_sqlite_dsn("sqlite::memory:", base, false).unwrap(), MEMORY_DSN);
        assert_eq!(absolutize_sqlite_dsn("sqlite://:memory:", base, false).unwrap(), MEMORY_DSN);
    }

    #[test]
    fn relative_path_is_joined_and_query_preserved() {
        let tmp = tempdir().unwrap();
        let out =
            absolutize_sqlite_dsn("sqlite://database/chores.db?mode=rwc", tmp.path(), true).unwrap();
        assert!(out.starts_with("sqlite://"));
        assert!(out.ends_with("database/chores.db?mode=rwc"));
        assert!(tmp.path().join("database").is_dir());
    }

    #[test]
    fn non_sqlite_prefix_is_rejected() {
        assert!(absolutize_sqlite_dsn("postgres://x/y", Path::new("/"), false).is_err());
        assert!(absolutize_sqlite_dsn("sqlite://", Path::new("/"), false).is_err());
    }

    #[test]
    fn backend_detection() {
        assert_eq!(detect_backend("sqlite://a.db").unwrap(), DbBackend::Sqlite);
        assert_eq!(detect_backend("sqlite::memory:").unwrap(), DbBackend::Sqlite);
        assert!(detect_backend("").is_err());
        assert!(detect_backend("mysql://localhost/db").is_err());
    }

    #[tokio::test]
    async fn connects_to_in_memory_database() {
        let cfg = DatabaseConfig {
            url: "sqlite::memory:".into(),
            max_conns: Some(4),
            busy_timeout_ms: None,
        };
        let db = connect_database(&cfg, Path::new(".")).await.unwrap();
        db.ping().await.unwrap();
    }
}
