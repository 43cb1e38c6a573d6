//! Platform helpers for locating directories and changing file permissions.
//!
//! All `#[cfg]` blocks for OS-specific behavior live here.
//!
//! - `paths` - home, applications and installation directories
//! - `permissions` - executable bits

pub mod paths;
pub mod permissions;

pub use paths::{absolute_dir, apps_dir, apps_dir_in, executable_dir, resolve_dir};
pub use permissions::{is_executable, set_executable};

/// Returns true if desktop entries are meaningful on this platform.
pub fn supports_desktop_entries() -> bool {
    cfg!(all(unix, not(target_os = "macos")))
}
