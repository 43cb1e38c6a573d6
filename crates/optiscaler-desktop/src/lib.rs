//! OptiScaler Desktop - menu entry installation for OptiScaler Manager.
//!
//! Prepares the scripts shipped with OptiScaler Manager and registers the
//! application with the desktop by writing an XDG desktop entry to
//! `~/.local/share/applications`.
//!
//! # Example
//!
//! ```rust,no_run
//! use optiscaler_desktop::{Installer, InstallerConfig, SystemProbe, SystemRunner};
//!
//! fn main() -> optiscaler_desktop::Result<()> {
//!     let config = InstallerConfig::from_environment(None, None)?;
//!     let installer = Installer::new(config, SystemProbe, SystemRunner);
//!
//!     let report = installer.install()?;
//!     for line in optiscaler_desktop::status_lines(&report) {
//!         println!("{}", line);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod desktop_entry;
pub mod error;
pub mod icon;
pub mod installer;
pub mod platform;
pub mod system;

pub use config::{AppConfig, InstallerConfig};
pub use desktop_entry::{DesktopEntry, DesktopEntryBuilder};
pub use error::{InstallError, Result};
pub use icon::IconAsset;
pub use installer::{status_lines, InstallReport, InstallState, Installer};
pub use system::{CommandOutcome, CommandProbe, CommandRunner, SystemProbe, SystemRunner};
