//! Centralized configuration for the desktop entry installer.
//!
//! `AppConfig` holds the fixed names used by the installer. `InstallerConfig`
//! carries the two locations a run depends on, so tests can point the
//! installer at temporary directories instead of the real home.

use crate::error::{InstallError, Result};
use crate::platform;
use std::path::{Path, PathBuf};

/// Application-level constants.
pub struct AppConfig;

impl AppConfig {
    pub const APP_NAME: &'static str = "OptiScaler Manager";
    pub const DESKTOP_FILE_NAME: &'static str = "optiscaler-manager.desktop";
    pub const REFRESH_COMMAND: &'static str = "update-desktop-database";
    pub const CLI_NAME: &'static str = "optiscaler-desktop";

    // Files shipped next to the installer
    pub const LAUNCH_SCRIPT: &'static str = "launch.sh";
    pub const MANAGER_SCRIPT: &'static str = "optiscaler_manager.py";
    pub const ICON_HELPER: &'static str = "create-icon.py";
    pub const ICON_FILE: &'static str = "optiscaler-icon.svg";

    /// Collaborator scripts made executable on every install, in order.
    pub const COLLABORATORS: [&'static str; 3] =
        [Self::LAUNCH_SCRIPT, Self::MANAGER_SCRIPT, Self::ICON_HELPER];
}

/// Locations an install run operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallerConfig {
    /// Absolute directory holding the collaborator scripts and icon.
    script_dir: PathBuf,
    /// Directory receiving the desktop entry.
    apps_dir: PathBuf,
}

impl InstallerConfig {
    /// Create a configuration from explicit locations.
    ///
    /// Both directories must be absolute: every path written into the
    /// desktop entry is derived from `script_dir`, and `apps_dir` is reported
    /// back to the user.
    pub fn new(script_dir: impl Into<PathBuf>, apps_dir: impl Into<PathBuf>) -> Result<Self> {
        let script_dir = script_dir.into();
        if !script_dir.is_absolute() {
            return Err(InstallError::NotAbsolute(script_dir));
        }

        let apps_dir = apps_dir.into();
        if !apps_dir.is_absolute() {
            return Err(InstallError::NotAbsolute(apps_dir));
        }

        Ok(Self {
            script_dir,
            apps_dir,
        })
    }

    /// Build a configuration from the invoking environment.
    ///
    /// # Arguments
    ///
    /// * `script_dir` - Installation directory; defaults to the directory of
    ///   the running executable. Resolved to a canonical absolute path.
    /// * `home` - Home directory; defaults to the user's home. A relative
    ///   home is taken relative to the current directory.
    pub fn from_environment(script_dir: Option<&Path>, home: Option<&Path>) -> Result<Self> {
        let script_dir = match script_dir {
            Some(dir) => platform::resolve_dir(dir)?,
            None => platform::executable_dir()?,
        };

        let apps_dir = match home {
            Some(home) => platform::apps_dir_in(&platform::absolute_dir(home)?),
            None => platform::apps_dir()?,
        };

        Self::new(script_dir, apps_dir)
    }

    pub fn script_dir(&self) -> &Path {
        &self.script_dir
    }

    pub fn apps_dir(&self) -> &Path {
        &self.apps_dir
    }

    /// Path of the desktop entry this installer owns.
    pub fn desktop_file(&self) -> PathBuf {
        self.apps_dir.join(AppConfig::DESKTOP_FILE_NAME)
    }

    pub fn icon_path(&self) -> PathBuf {
        self.script_dir.join(AppConfig::ICON_FILE)
    }

    pub fn icon_helper(&self) -> PathBuf {
        self.script_dir.join(AppConfig::ICON_HELPER)
    }

    pub fn launch_script(&self) -> PathBuf {
        self.script_dir.join(AppConfig::LAUNCH_SCRIPT)
    }

    /// Absolute paths of the collaborator scripts.
    pub fn collaborators(&self) -> Vec<PathBuf> {
        AppConfig::COLLABORATORS
            .iter()
            .map(|name| self.script_dir.join(name))
            .collect()
    }
}
