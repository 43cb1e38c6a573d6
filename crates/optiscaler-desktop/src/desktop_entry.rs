//! Desktop entry (.desktop file) generation.
//!
//! Implements the subset of the XDG Desktop Entry Specification the
//! OptiScaler Manager launcher needs. Keys are always written in the same
//! order so repeated installs produce byte-identical files.

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::{AppConfig, InstallerConfig};
use crate::error::{InstallError, Result};
use tracing::debug;

/// Group header every desktop entry starts with.
pub const GROUP_HEADER: &str = "[Desktop Entry]";

/// Keys written by [`DesktopEntry`], in file order.
pub const KEYS: [&str; 12] = [
    "Version",
    "Type",
    "Name",
    "Comment",
    "GenericName",
    "Icon",
    "Exec",
    "Terminal",
    "StartupNotify",
    "Categories",
    "Keywords",
    "Path",
];

/// Keys whose values are absolute filesystem paths.
pub const PATH_KEYS: [&str; 3] = ["Icon", "Exec", "Path"];

/// A desktop entry representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopEntry {
    /// Desktop Entry Specification version.
    pub version: String,
    /// Entry type (usually "Application").
    pub entry_type: String,
    /// Entry name (shown in menus).
    pub name: String,
    /// Comment/description.
    pub comment: String,
    /// Generic name, e.g. "Web Browser".
    pub generic_name: String,
    /// Icon path.
    pub icon: PathBuf,
    /// Program to execute.
    pub exec: PathBuf,
    /// Whether to run in a terminal.
    pub terminal: bool,
    /// Whether the launcher supports startup notification.
    pub startup_notify: bool,
    /// Menu categories.
    pub categories: Vec<String>,
    /// Keywords for search.
    pub keywords: Vec<String>,
    /// Working directory for the program.
    pub path: PathBuf,
}

impl Default for DesktopEntry {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            entry_type: "Application".to_string(),
            name: AppConfig::APP_NAME.to_string(),
            comment: "Manage OptiScaler installations for Steam games".to_string(),
            generic_name: "Game Upscaler Manager".to_string(),
            icon: PathBuf::new(),
            exec: PathBuf::new(),
            terminal: false,
            startup_notify: true,
            categories: vec!["Game".to_string(), "Utility".to_string()],
            keywords: ["optiscaler", "fsr", "dlss", "xess", "upscaling", "steam"]
                .iter()
                .map(|k| k.to_string())
                .collect(),
            path: PathBuf::new(),
        }
    }
}

impl DesktopEntry {
    /// Create a new desktop entry builder.
    pub fn builder() -> DesktopEntryBuilder {
        DesktopEntryBuilder::new()
    }

    /// The OptiScaler Manager entry for an installation directory.
    pub fn for_install(config: &InstallerConfig) -> Self {
        Self::builder()
            .icon(config.icon_path())
            .exec(config.launch_script())
            .path(config.script_dir())
            .build()
    }

    /// Key-value pairs in file order.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Version", escape_string(&self.version)),
            ("Type", escape_string(&self.entry_type)),
            ("Name", escape_string(&self.name)),
            ("Comment", escape_string(&self.comment)),
            ("GenericName", escape_string(&self.generic_name)),
            ("Icon", escape_string(&self.icon.display().to_string())),
            ("Exec", escape_string(&quote_exec_arg(&self.exec.display().to_string()))),
            ("Terminal", self.terminal.to_string()),
            ("StartupNotify", self.startup_notify.to_string()),
            ("Categories", escape_string(&join_list(&self.categories))),
            ("Keywords", escape_string(&join_list(&self.keywords))),
            ("Path", escape_string(&self.path.display().to_string())),
        ]
    }

    /// Write the desktop entry, truncating any previous content.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = self.to_string();
        let mut file = fs::File::create(path)
            .map_err(|e| InstallError::io_action("create desktop file", e, path))?;

        file.write_all(content.as_bytes())
            .map_err(|e| InstallError::io_action("write desktop file", e, path))?;

        debug!("Wrote desktop entry to {:?}", path);

        Ok(())
    }
}

impl fmt::Display for DesktopEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", GROUP_HEADER)?;
        for (key, value) in self.fields() {
            writeln!(f, "{}={}", key, value)?;
        }
        Ok(())
    }
}

/// Join a list value, terminated by `;` as the format expects.
fn join_list(items: &[String]) -> String {
    if items.is_empty() {
        String::new()
    } else {
        format!("{};", items.join(";"))
    }
}

/// Apply the string-level escapes every value goes through.
///
/// Backslash, newline, tab and carriage return become `\\`, `\n`, `\t` and
/// `\r`, so a value always stays on one line and decodes back unchanged.
pub fn escape_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            '\r' => escaped.push_str("\\r"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Reverse [`escape_string`]. `\s` decodes to a space; unknown escapes are kept.
pub fn unescape_string(value: &str) -> String {
    let mut decoded = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            decoded.push(c);
            continue;
        }
        match chars.next() {
            Some('s') => decoded.push(' '),
            Some('n') => decoded.push('\n'),
            Some('t') => decoded.push('\t'),
            Some('r') => decoded.push('\r'),
            Some('\\') => decoded.push('\\'),
            Some(other) => {
                decoded.push('\\');
                decoded.push(other);
            }
            None => decoded.push('\\'),
        }
    }
    decoded
}

/// Quote a single Exec argument.
///
/// `%` is doubled so it is never read as a field code. Arguments containing
/// reserved characters are wrapped in double quotes, with `"`, `` ` ``, `$`
/// and `\` escaped by a backslash. The result still needs [`escape_string`]
/// before it is written.
pub fn quote_exec_arg(arg: &str) -> String {
    const RESERVED: &[char] = &[
        ' ', '\t', '\n', '\r', '"', '\'', '\\', '>', '<', '~', '|', '&', ';', '$', '*', '?', '#',
        '(', ')', '`', '%',
    ];

    let arg = arg.replace('%', "%%");
    if !arg.contains(RESERVED) {
        return arg;
    }

    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('"');
    for c in arg.chars() {
        if matches!(c, '"' | '`' | '$' | '\\') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// Parse the `[Desktop Entry]` group of a desktop file into key-value pairs.
///
/// Comments, blank lines and other groups are skipped. Order is preserved
/// and values are passed through [`unescape_string`].
pub fn parse_fields(content: &str) -> Vec<(String, String)> {
    let mut in_group = false;
    let mut fields = Vec::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.starts_with('[') {
            in_group = line == GROUP_HEADER;
            continue;
        }
        if !in_group {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            fields.push((key.trim().to_string(), unescape_string(value.trim())));
        }
    }

    fields
}

/// Builder for desktop entries.
pub struct DesktopEntryBuilder {
    entry: DesktopEntry,
}

impl DesktopEntryBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            entry: DesktopEntry::default(),
        }
    }

    /// Set the icon path.
    pub fn icon(mut self, icon: impl Into<PathBuf>) -> Self {
        self.entry.icon = icon.into();
        self
    }

    /// Set the program to execute.
    pub fn exec(mut self, exec: impl Into<PathBuf>) -> Self {
        self.entry.exec = exec.into();
        self
    }

    /// Set the working directory.
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.entry.path = path.into();
        self
    }

    /// Build the desktop entry.
    pub fn build(self) -> DesktopEntry {
        self.entry
    }
}

impl Default for DesktopEntryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
