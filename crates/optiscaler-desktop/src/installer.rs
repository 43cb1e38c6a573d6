//! Desktop entry installation.
//!
//! Note: Writes XDG desktop entries, so only Linux-style desktops pick the
//! result up. Running it elsewhere still succeeds but has no visible effect.

use crate::config::{AppConfig, InstallerConfig};
use crate::desktop_entry::DesktopEntry;
use crate::error::{InstallError, Result};
use crate::icon::IconAsset;
use crate::platform;
use crate::system::{CommandProbe, CommandRunner};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// What an install run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    /// Desktop entry that was written.
    pub desktop_file: PathBuf,
    /// Collaborator scripts now marked executable.
    pub made_executable: Vec<PathBuf>,
    /// Collaborator scripts whose permissions could not be changed.
    pub skipped: Vec<PathBuf>,
    /// Whether the desktop database refresh ran.
    pub index_refreshed: bool,
    /// Whether the icon helper ran.
    pub icon_generated: bool,
}

/// Current installation state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallState {
    /// Desktop entry path.
    pub desktop_file: PathBuf,
    /// Whether the desktop entry exists.
    pub installed: bool,
    /// Whether the desktop entry matches a fresh render.
    pub up_to_date: bool,
    /// Whether the icon exists.
    pub icon_present: bool,
}

/// Installs and removes the OptiScaler Manager desktop entry.
pub struct Installer<P, R> {
    config: InstallerConfig,
    probe: P,
    runner: R,
}

impl<P: CommandProbe, R: CommandRunner> Installer<P, R> {
    /// Create a new installer.
    ///
    /// # Arguments
    ///
    /// * `config` - Installation and applications directories
    /// * `probe` - Decides whether optional commands are installed
    /// * `runner` - Executes subprocesses
    pub fn new(config: InstallerConfig, probe: P, runner: R) -> Self {
        Self {
            config,
            probe,
            runner,
        }
    }

    pub fn config(&self) -> &InstallerConfig {
        &self.config
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// The desktop entry this installer writes.
    pub fn entry(&self) -> DesktopEntry {
        DesktopEntry::for_install(&self.config)
    }

    /// Install the desktop entry.
    ///
    /// Running it again produces the same files.
    pub fn install(&self) -> Result<InstallReport> {
        info!(
            "Installing {} from {}",
            AppConfig::APP_NAME,
            self.config.script_dir().display()
        );
        if !platform::supports_desktop_entries() {
            warn!("Desktop entries are not used on this platform; the menu entry will not appear");
        }

        let (made_executable, skipped) = self.prepare_collaborators();

        let apps_dir = self.config.apps_dir();
        fs::create_dir_all(apps_dir)
            .map_err(|e| InstallError::io_action("create applications directory", e, apps_dir))?;

        let desktop_file = self.config.desktop_file();
        self.entry().write_to_file(&desktop_file)?;
        info!("Wrote {}", desktop_file.display());

        let index_refreshed = self.refresh_index();

        let icon_generated = IconAsset::for_install(&self.config).ensure(&self.runner)?;

        Ok(InstallReport {
            desktop_file,
            made_executable,
            skipped,
            index_refreshed,
            icon_generated,
        })
    }

    /// Remove the desktop entry.
    ///
    /// Returns `true` if a file was removed. Collaborator scripts and the icon
    /// are left in place.
    pub fn uninstall(&self) -> Result<bool> {
        let desktop_file = self.config.desktop_file();

        let removed = match fs::remove_file(&desktop_file) {
            Ok(()) => {
                info!("Removed {}", desktop_file.display());
                true
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No desktop entry at {}", desktop_file.display());
                false
            }
            Err(e) => {
                return Err(InstallError::io_action("remove desktop file", e, desktop_file));
            }
        };

        if removed {
            self.refresh_index();
        }

        Ok(removed)
    }

    /// Inspect the current installation.
    ///
    /// A missing desktop entry means "not installed"; any other read failure
    /// is returned.
    pub fn state(&self) -> Result<InstallState> {
        let desktop_file = self.config.desktop_file();
        let current = match fs::read_to_string(&desktop_file) {
            Ok(content) => Some(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                return Err(InstallError::io_action("read desktop file", e, desktop_file));
            }
        };

        Ok(InstallState {
            installed: current.is_some(),
            up_to_date: current.as_deref() == Some(self.entry().to_string().as_str()),
            icon_present: IconAsset::for_install(&self.config).exists(),
            desktop_file,
        })
    }

    /// Mark collaborator scripts executable; failures are tolerated.
    fn prepare_collaborators(&self) -> (Vec<PathBuf>, Vec<PathBuf>) {
        let mut made_executable = Vec::new();
        let mut skipped = Vec::new();

        for script in self.config.collaborators() {
            match platform::set_executable(&script) {
                Ok(()) => made_executable.push(script),
                Err(e) => {
                    warn!("Could not make {} executable: {}", script.display(), e);
                    skipped.push(script);
                }
            }
        }

        (made_executable, skipped)
    }

    /// Refresh the desktop database if the tool is installed.
    fn refresh_index(&self) -> bool {
        if !self.probe.is_available(AppConfig::REFRESH_COMMAND) {
            debug!("{} not found, skipping refresh", AppConfig::REFRESH_COMMAND);
            return false;
        }

        let program = Path::new(AppConfig::REFRESH_COMMAND);
        let args = [OsString::from(self.config.apps_dir())];

        match self.runner.run(program, &args, None) {
            Ok(outcome) if outcome.success => {
                debug!("Refreshed desktop database");
            }
            Ok(outcome) => {
                warn!(
                    "{} exited with {}: {}",
                    AppConfig::REFRESH_COMMAND,
                    outcome.status,
                    outcome.stderr.trim()
                );
            }
            Err(e) => {
                warn!("Failed to run {}: {}", AppConfig::REFRESH_COMMAND, e);
            }
        }

        true
    }
}

/// Human-readable lines printed after an install.
pub fn status_lines(report: &InstallReport) -> Vec<String> {
    let path = report.desktop_file.display();
    let mut lines = vec![
        format!("Desktop entry installed: {}", path),
        format!("\"{}\" should now appear in your application menu.", AppConfig::APP_NAME),
    ];

    if !report.index_refreshed {
        lines.push("You may need to log out and back in for it to appear.".to_string());
    }

    lines.push(format!("To uninstall, remove: {}", path));
    lines.push(format!("  or run: {} uninstall", AppConfig::CLI_NAME));
    lines
}
