//! OptiScaler Desktop - installs the OptiScaler Manager menu entry.
//!
//! Run from the OptiScaler Manager directory (or pass `--script-dir`) to
//! register the application with the desktop environment.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use optiscaler_desktop::{
    status_lines, AppConfig, Installer, InstallerConfig, SystemProbe, SystemRunner,
};
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "optiscaler-desktop")]
#[command(about = "Install the OptiScaler Manager desktop entry")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// OptiScaler Manager directory (defaults to this executable's directory)
    #[arg(long, global = true)]
    script_dir: Option<PathBuf>,

    /// Home directory used to locate ~/.local/share/applications
    #[arg(long, global = true)]
    home: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Write the desktop entry (default)
    Install,
    /// Remove the desktop entry
    Uninstall,
    /// Show whether the desktop entry is installed and current
    Status,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so stdout only carries status lines
    let log_level = if args.debug { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let config =
        InstallerConfig::from_environment(args.script_dir.as_deref(), args.home.as_deref())
            .context("resolve installation directories")?;
    debug!("Configuration: {:?}", config);

    let installer = Installer::new(config, SystemProbe, SystemRunner);

    match args.command.unwrap_or(Command::Install) {
        Command::Install => {
            let report = installer
                .install()
                .with_context(|| format!("install {} desktop entry", AppConfig::APP_NAME))?;
            for line in status_lines(&report) {
                println!("{}", line);
            }
        }
        Command::Uninstall => {
            let desktop_file = installer.config().desktop_file();
            if installer.uninstall().context("remove desktop entry")? {
                println!("Removed {}", desktop_file.display());
            } else {
                println!("Nothing to remove at {}", desktop_file.display());
            }
        }
        Command::Status => {
            let state = installer.state().context("read desktop entry")?;
            println!("Desktop entry: {}", state.desktop_file.display());
            println!("Installed: {}", if state.installed { "yes" } else { "no" });
            if state.installed {
                println!("Up to date: {}", if state.up_to_date { "yes" } else { "no" });
            }
            println!("Icon present: {}", if state.icon_present { "yes" } else { "no" });
        }
    }

    Ok(())
}
