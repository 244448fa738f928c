//! Persisted default flags.
//!
//! Config files hold CLI flag tokens, one or more per line, with `#` comments.
//! The effective flags are global ∪ local ∪ command line; for valued options
//! the later source wins.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Auto,
    Light,
    Dark,
}

impl ThemeMode {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "auto" => Some(Self::Auto),
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub sidebar: bool,
    pub no_sidebar: bool,
    pub perf: bool,
    pub theme: Option<ThemeMode>,
    pub payload: Option<PathBuf>,
    pub latency_ms: Option<u64>,
    pub mount_delay_ms: Option<u64>,
    pub render_debug_log: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge `other` over `self`: switches are OR-ed, options from `other` win.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            sidebar: self.sidebar || other.sidebar,
            no_sidebar: self.no_sidebar || other.no_sidebar,
            perf: self.perf || other.perf,
            theme: other.theme.or(self.theme),
            payload: other.payload.clone().or_else(|| self.payload.clone()),
            latency_ms: other.latency_ms.or(self.latency_ms),
            mount_delay_ms: other.mount_delay_ms.or(self.mount_delay_ms),
            render_debug_log: other
                .render_debug_log
                .clone()
                .or_else(|| self.render_debug_log.clone()),
            log_file: other.log_file.clone().or_else(|| self.log_file.clone()),
        }
    }

    /// Sidebar starts visible unless disabled; an explicit `--sidebar` wins.
    pub const fn sidebar_visible(&self) -> bool {
        self.sidebar || !self.no_sidebar
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("pankview").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("pankview")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("pankview").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("pankview")
                .join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".pankviewrc")
}

/// Read flags from a config file. A missing file yields the defaults.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

/// Write `flags` as tokens, creating parent directories.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# pankview defaults (saved with --save)".to_string()];
    if flags.sidebar {
        lines.push("--sidebar".to_string());
    }
    if flags.no_sidebar {
        lines.push("--no-sidebar".to_string());
    }
    if flags.perf {
        lines.push("--perf".to_string());
    }
    if let Some(theme) = flags.theme {
        lines.push(format!("--theme {}", theme.as_str()));
    }
    if let Some(path) = &flags.payload {
        lines.push(format!("--payload {}", path.display()));
    }
    if let Some(ms) = flags.latency_ms {
        lines.push(format!("--latency-ms {ms}"));
    }
    if let Some(ms) = flags.mount_delay_ms {
        lines.push(format!("--mount-delay-ms {ms}"));
    }
    if let Some(path) = &flags.render_debug_log {
        lines.push(format!("--render-debug-log {}", path.display()));
    }
    if let Some(path) = &flags.log_file {
        lines.push(format!("--log-file {}", path.display()));
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

/// Remove a saved config file if present.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be removed.
pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Extract known flags from raw tokens, ignoring everything else.
///
/// Both `--flag value` and `--flag=value` forms are accepted for valued
/// options. Unparseable values are dropped.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        let (name, inline_value) = match token.split_once('=') {
            Some((name, value)) if name.starts_with("--") => (name, Some(value)),
            _ => (token, None),
        };
        let mut value = || {
            inline_value.map(ToOwned::to_owned).or_else(|| {
                let next = tokens.get(i + 1).cloned();
                if next.is_some() {
                    i += 1;
                }
                next
            })
        };
        match name {
            "--sidebar" => flags.sidebar = true,
            "--no-sidebar" => flags.no_sidebar = true,
            "--perf" => flags.perf = true,
            "--theme" => flags.theme = value().as_deref().and_then(ThemeMode::parse),
            "--payload" => flags.payload = value().map(PathBuf::from),
            "--latency-ms" => flags.latency_ms = value().and_then(|v| v.parse().ok()),
            "--mount-delay-ms" => flags.mount_delay_ms = value().and_then(|v| v.parse().ok()),
            "--render-debug-log" => flags.render_debug_log = value().map(PathBuf::from),
            "--log-file" => flags.log_file = value().map(PathBuf::from),
            _ => {}
        }
        i += 1;
    }
    flags
}
