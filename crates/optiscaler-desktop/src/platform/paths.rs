//! Directory resolution.
//!
//! Paths written into the desktop entry must not depend on the caller's
//! working directory, so every installation directory leaves this module
//! canonicalized.

use crate::error::{InstallError, Result};
use std::path::{Path, PathBuf};

/// Applications directory below an explicit home: `{home}/.local/share/applications`.
pub fn apps_dir_in(home: &Path) -> PathBuf {
    home.join(".local").join("share").join("applications")
}

/// Get the user applications directory (XDG data home layout).
pub fn apps_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| InstallError::Config {
        message: "Could not determine home directory".to_string(),
    })?;
    Ok(apps_dir_in(&home))
}

/// Resolve a directory to a canonical absolute path.
///
/// # Errors
/// Returns an error if the directory does not exist or is not a directory.
pub fn resolve_dir(dir: &Path) -> Result<PathBuf> {
    let resolved = dir
        .canonicalize()
        .map_err(|e| InstallError::io_action("resolve directory", e, dir))?;

    if !resolved.is_dir() {
        return Err(InstallError::Config {
            message: format!("Not a directory: {}", resolved.display()),
        });
    }

    Ok(resolved)
}

/// Make a directory absolute without touching the filesystem.
///
/// Relative paths are joined onto the current directory; the directory does
/// not have to exist yet.
pub fn absolute_dir(dir: &Path) -> Result<PathBuf> {
    if dir.is_absolute() {
        return Ok(dir.to_path_buf());
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(dir))
}

/// Directory containing the running executable.
pub fn executable_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    let exe = exe
        .canonicalize()
        .map_err(|e| InstallError::io_with_path(e, &exe))?;

    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| InstallError::Config {
            message: format!("Executable has no parent directory: {}", exe.display()),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_apps_dir_in() {
        let dir = apps_dir_in(Path::new("/home/alice"));
        assert_eq!(dir, PathBuf::from("/home/alice/.local/share/applications"));
    }

    #[test]
    fn test_resolve_dir_is_absolute() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let dotted = nested.join("..").join("b");
        let resolved = resolve_dir(&dotted).unwrap();

        assert!(resolved.is_absolute());
        assert_eq!(resolved, nested.canonicalize().unwrap());
    }

    #[test]
    fn test_absolute_dir() {
        let absolute = absolute_dir(Path::new("/home/alice")).unwrap();
        assert_eq!(absolute, PathBuf::from("/home/alice"));

        let relative = absolute_dir(Path::new("not-created-yet")).unwrap();
        assert!(relative.is_absolute());
        assert!(relative.ends_with("not-created-yet"));
    }

    #[test]
    fn test_resolve_dir_rejects_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("plain.txt");
        std::fs::write(&file, "x").unwrap();

        assert!(matches!(resolve_dir(&file), Err(InstallError::Config { .. })));
    }

    #[test]
    fn test_executable_dir() {
        let dir = executable_dir().unwrap();
        assert!(dir.is_absolute());
        assert!(dir.is_dir());
    }
}
