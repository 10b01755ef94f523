use crate::error::{Result, ScrubError};
use std::fs;
use std::path::{Path, PathBuf};

pub trait RemovalBackend {
    fn name(&self) -> &'static str;

    /// True when removed files cannot be recovered.
    fn is_permanent(&self) -> bool;

    /// Fails when the backend cannot operate at all on this system.
    fn check_available(&self) -> Result<()> {
        Ok(())
    }

    fn remove(&self, path: &Path) -> Result<()>;
}

/// Moves files to the platform trash or recycle bin.
#[derive(Debug, Default, Clone, Copy)]
pub struct TrashBackend;

impl RemovalBackend for TrashBackend {
    fn name(&self) -> &'static str {
        "trash"
    }

    fn is_permanent(&self) -> bool {
        false
    }

    fn check_available(&self) -> Result<()> {
        match home_trash_dir()? {
            Some(dir) => ensure_trash_dir(&dir, HOME_TRASH_SUBDIRS),
            None => Ok(()),
        }
    }

    fn remove(&self, path: &Path) -> Result<()> {
        trash::delete(path).map_err(|e| ScrubError::Io(std::io::Error::other(e.to_string())))
    }
}

/// Unlinks files irrecoverably.
#[derive(Debug, Default, Clone, Copy)]
pub struct PermanentBackend;

impl RemovalBackend for PermanentBackend {
    fn name(&self) -> &'static str {
        "permanent"
    }

    fn is_permanent(&self) -> bool {
        true
    }

    fn remove(&self, path: &Path) -> Result<()> {
        fs::remove_file(path)?;
        Ok(())
    }
}

#[cfg(all(unix, not(any(target_os = "macos", target_os = "ios", target_os = "android"))))]
const HOME_TRASH_SUBDIRS: &[&str] = &["files", "info"];

#[cfg(not(all(unix, not(any(target_os = "macos", target_os = "ios", target_os = "android")))))]
const HOME_TRASH_SUBDIRS: &[&str] = &[];

/// The current user's trash folder: `$XDG_DATA_HOME/Trash` on freedesktop
/// systems, `~/.Trash` on macOS. `None` where the shell owns it (Windows).
#[cfg(all(unix, not(any(target_os = "macos", target_os = "ios", target_os = "android"))))]
pub fn home_trash_dir() -> Result<Option<PathBuf>> {
    let xdg = xdg::BaseDirectories::new()
        .map_err(|e| ScrubError::TrashUnavailable(format!("cannot resolve XDG data home: {}", e)))?;
    Ok(Some(xdg.get_data_home().join("Trash")))
}

#[cfg(target_os = "macos")]
pub fn home_trash_dir() -> Result<Option<PathBuf>> {
    let home = std::env::var_os("HOME")
        .ok_or_else(|| ScrubError::TrashUnavailable("HOME is not set".to_string()))?;
    Ok(Some(PathBuf::from(home).join(".Trash")))
}

#[cfg(not(unix))]
pub fn home_trash_dir() -> Result<Option<PathBuf>> {
    Ok(None)
}

/// Makes sure `dir` and its `subdirs` exist and are writable, creating them
/// if needed.
pub fn ensure_trash_dir(dir: &Path, subdirs: &[&str]) -> Result<()> {
    let unavailable = |e: std::io::Error| {
        ScrubError::TrashUnavailable(format!("cannot use {}: {}", dir.display(), e))
    };

    fs::create_dir_all(dir).map_err(unavailable)?;
    for sub in subdirs {
        fs::create_dir_all(dir.join(sub)).map_err(unavailable)?;
    }

    if fs::metadata(dir).map_err(unavailable)?.permissions().readonly() {
        return Err(ScrubError::TrashUnavailable(format!(
            "{} is read-only",
            dir.display()
        )));
    }
    Ok(())
}

/// Picks the removal backend once at startup. Asking for the trash where
/// none exists is an error, never a silent switch to permanent removal.
pub fn select_backend(permanent: bool) -> Result<Box<dyn RemovalBackend>> {
    if permanent {
        return Ok(Box::new(PermanentBackend));
    }

    let backend = TrashBackend;
    backend.check_available()?;
    Ok(Box::new(backend))
}
