//! Resolution of the server's home directory.
//!
//! An explicit value wins (with `~` expanded against the platform home);
//! otherwise `<platform home>/<default_subdir>` is used. The platform home is
//! `%APPDATA%` on Windows and `$HOME` elsewhere.

use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};

fn platform_home() -> Result<PathBuf> {
    #[cfg(target_os = "windows")]
    let var = "APPDATA";
    #[cfg(not(target_os = "windows"))]
    let var = "HOME";

    match std::env::var_os(var) {
        Some(v) if !v.is_empty() => Ok(PathBuf::from(v)),
        _ => Err(anyhow!("environment variable {var} is not set")),
    }
}

fn expand_tilde(raw: &str) -> Result<PathBuf> {
    if raw == "~" {
        return platform_home();
    }
    if let Some(rest) = raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\")) {
        return Ok(platform_home()?.join(rest));
    }
    Ok(PathBuf::from(raw))
}

fn absolutize(p: PathBuf) -> Result<PathBuf> {
    if p.is_absolute() {
        return Ok(p);
    }
    let cwd = std::env::current_dir().context("cannot read current directory")?;
    Ok(cwd.join(p))
}

/// Resolve `configured` (or the default location) into an absolute path,
/// creating the directory when `create` is set.
pub fn resolve_home_dir(
    configured: Option<String>,
    default_subdir: &str,
    create: bool,
) -> Result<PathBuf> {
    let path = match configured.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => absolutize(expand_tilde(raw)?)?,
        _ => platform_home()?.join(default_subdir),
    };

    if create {
        ensure_dir(&path)?;
    }
    Ok(path)
}

fn ensure_dir(path: &Path) -> Result<()> {
    if path.exists() && !path.is_dir() {
        return Err(anyhow!("home_dir {} exists and is not a directory", path.display()));
    }
    std::fs::create_dir_all(path)
        .with_context(|| format!("cannot create home_dir {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn explicit_absolute_path_is_created() {
        let tmp = tempdir().unwrap();
        let target = tmp.path().join("a/b");
        let out = resolve_home_dir(Some(target.to_string_lossy().into()), ".chores", true).unwrap();
        assert_eq!(out, target);
        assert!(target.is_dir());
    }

    #[test]
    fn relative_path_becomes_absolute() {
        let out = resolve_home_dir(Some("rel-home".into()), ".chores", false).unwrap();
        assert!(out.is_absolute());
        assert!(out.ends_with("rel-home"));
    }

    #[test]
    fn file_in_the_way_is_rejected() {
        let tmp = tempdir().unwrap();
        let file = tmp.path().join("occupied");
        std::fs::write(&file, "x").unwrap();
        let err = resolve_home_dir(Some(file.to_string_lossy().into()), ".chores", true);
        assert!(err.is_err());
    }

    #[cfg(not(target_os = "windows"))]
    #[test]
    fn tilde_and_default_use_home() {
        let Some(home) = std::env::var_os("HOME").map(PathBuf::from) else {
            return;
        };
        let out = resolve_home_dir(Some("~/.chores-test".into()), ".chores", false).unwrap();
        assert_eq!(out, home.join(".chores-test"));
        let out = resolve_home_dir(Some("  ".into()), ".chores", false).unwrap();
        assert_eq!(out, home.join(".chores"));
    }
}
