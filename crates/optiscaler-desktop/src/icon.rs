//! Icon asset handling.
//!
//! The icon itself is produced by the `create-icon.py` helper shipped next to
//! the installer. This module only decides whether the helper has to run.

use crate::config::InstallerConfig;
use crate::error::Result;
use crate::system::CommandRunner;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// The launcher icon and the helper that generates it.
#[derive(Debug, Clone)]
pub struct IconAsset {
    /// Expected icon location.
    path: PathBuf,
    /// Helper script that writes the icon.
    helper: PathBuf,
    /// Working directory for the helper.
    work_dir: PathBuf,
}

impl IconAsset {
    /// Create an icon asset description.
    ///
    /// # Arguments
    ///
    /// * `path` - Where the icon is expected
    /// * `helper` - Executable that generates the icon
    /// * `work_dir` - Directory the helper runs in
    pub fn new(
        path: impl AsRef<Path>,
        helper: impl AsRef<Path>,
        work_dir: impl AsRef<Path>,
    ) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            helper: helper.as_ref().to_path_buf(),
            work_dir: work_dir.as_ref().to_path_buf(),
        }
    }

    /// The icon for an installation directory.
    pub fn for_install(config: &InstallerConfig) -> Self {
        Self::new(config.icon_path(), config.icon_helper(), config.script_dir())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the icon exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Generate the icon if it is missing.
    ///
    /// Returns `true` when the helper was run.
    ///
    /// # Errors
    /// Fails if the helper cannot be spawned or exits unsuccessfully.
    pub fn ensure(&self, runner: &dyn CommandRunner) -> Result<bool> {
        if self.exists() {
            debug!("Icon already present at {:?}", self.path);
            return Ok(false);
        }

        info!("Icon missing, running {}", self.helper.display());
        runner
            .run(&self.helper, &[], Some(self.work_dir.as_path()))?
            .into_result(&self.helper)?;

        if !self.exists() {
            warn!(
                "Icon helper finished but {} is still missing",
                self.path.display()
            );
        }

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::CommandOutcome;
    use std::cell::RefCell;
    use std::ffi::OsString;
    use std::fs;
    use tempfile::TempDir;

    /// Runner that records calls and optionally creates a file.
    struct FakeRunner {
        calls: RefCell<Vec<PathBuf>>,
        creates: Option<PathBuf>,
        success: bool,
    }

    impl CommandRunner for FakeRunner {
        fn run(
            &self,
            program: &Path,
            _args: &[OsString],
            _cwd: Option<&Path>,
        ) -> Result<CommandOutcome> {
            self.calls.borrow_mut().push(program.to_path_buf());
            if let Some(path) = &self.creates {
                fs::write(path, "<svg/>").unwrap();
            }
            Ok(CommandOutcome {
                success: self.success,
                status: "exit status: 0".to_string(),
                stderr: String::new(),
            })
        }
    }

    #[test]
    fn test_existing_icon_skips_helper() {
        let temp_dir = TempDir::new().unwrap();
        let icon = temp_dir.path().join("icon.svg");
        fs::write(&icon, "<svg/>").unwrap();

        let runner = FakeRunner {
            calls: RefCell::new(Vec::new()),
            creates: None,
            success: true,
        };
        let asset = IconAsset::new(&icon, temp_dir.path().join("helper"), temp_dir.path());

        assert!(!asset.ensure(&runner).unwrap());
        assert!(runner.calls.borrow().is_empty());
    }

    #[test]
    fn test_missing_icon_runs_helper_once() {
        let temp_dir = TempDir::new().unwrap();
        let icon = temp_dir.path().join("icon.svg");
        let helper = temp_dir.path().join("helper");

        let runner = FakeRunner {
            calls: RefCell::new(Vec::new()),
            creates: Some(icon.clone()),
            success: true,
        };
        let asset = IconAsset::new(&icon, &helper, temp_dir.path());

        assert!(asset.ensure(&runner).unwrap());
        assert_eq!(*runner.calls.borrow(), vec![helper]);
        assert!(asset.exists());
    }

    #[test]
    fn test_failing_helper_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let runner = FakeRunner {
            calls: RefCell::new(Vec::new()),
            creates: None,
            success: false,
        };
        let asset = IconAsset::new(
            temp_dir.path().join("icon.svg"),
            temp_dir.path().join("helper"),
            temp_dir.path(),
        );

        assert!(asset.ensure(&runner).is_err());
    }
}
