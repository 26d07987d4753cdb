use std::env;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

/// Platform base for per-user application data: the roaming data dir on
/// Windows, the home dir elsewhere.
fn platform_base() -> Result<PathBuf> {
    #[cfg(target_os = "windows")]
    let base = dirs::data_dir();
    #[cfg(not(target_os = "windows"))]
    let base = dirs::home_dir();

    base.ok_or_else(|| anyhow!("cannot determine the user's home directory"))
}

/// Expand a leading `~` against the user's home.
fn expand_tilde(raw: &str) -> Result<PathBuf> {
    if raw == "~" {
        return platform_base();
    }
    if let Some(rest) = raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\")) {
        return Ok(platform_base()?.join(rest));
    }
    Ok(PathBuf::from(raw))
}

fn absolutize(p: &Path) -> Result<PathBuf> {
    if p.is_absolute() {
        return Ok(p.to_path_buf());
    }
    let cwd = env::current_dir().context("cannot read current directory")?;
    Ok(cwd.join(p))
}

/// Resolve the application home directory.
///
/// - `Some(path)`: `~` is expanded and relative paths are made absolute.
/// - `None`: `<platform base>/<default_subdir>`.
///
/// With `create`, the directory (and parents) is created.
pub fn resolve_home_dir(
    configured: Option<String>,
    default_subdir: &str,
    create: bool,
) -> Result<PathBuf> {
    let path = match configured {
        Some(raw) => absolutize(&expand_tilde(raw.trim())?)?,
        None => platform_base()?.join(default_subdir),
    };

    if create {
        std::fs::create_dir_all(&path)
            .with_context(|| format!("cannot create home dir {}", path.display()))?;
    }
    Ok(path)
}
