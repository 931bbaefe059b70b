//! Configuration loading with env-var and command-line overrides.
//!
//! Reads `envboot.toml` relative to the current working directory (optional),
//! then applies the `ENVBOOT_LOG_LEVEL` env override and finally any
//! command-line overrides. Every field has a default, so running with no
//! config file at all reproduces the classic `keys.txt` + `.env.sample` ->
//! `.env` layout.

use std::{
    env,
    ffi::OsString,
    fmt, fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::error::AppError;

/// Config file looked up when no `--config` is given.
pub const DEFAULT_CONFIG_PATH: &str = "envboot.toml";

/// How the expanded template lands in the output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Append to the output, creating it if needed. Repeated runs accumulate.
    #[default]
    Append,
    /// Truncate the output and write the expansion. Idempotent.
    Replace,
}

impl fmt::Display for WriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteMode::Append => f.write_str("append"),
            WriteMode::Replace => f.write_str("replace"),
        }
    }
}

/// Fully-resolved bootstrap configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Key-pair file (public key on line 1, private key on line 2).
    pub key_file: PathBuf,
    /// Sample template carrying the marker.
    pub template: PathBuf,
    /// Output env file.
    pub output: PathBuf,
    /// Environment variable whose non-empty value overrides the file secret.
    pub override_var: String,
    /// Marker token expanded with the active secret.
    pub marker: String,
    pub write_mode: WriteMode,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            key_file: PathBuf::from(default_key_file()),
            template: PathBuf::from(default_template()),
            output: PathBuf::from(default_output()),
            override_var: default_override_var(),
            marker: default_marker(),
            write_mode: WriteMode::default(),
            log_level: default_log_level(),
        }
    }
}

/// Values that win over the TOML file. `None` leaves the file value in place.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub key_file: Option<PathBuf>,
    pub template: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub write_mode: Option<WriteMode>,
    pub log_level: Option<String>,
}

/// Raw TOML shape — `serde` target before resolution.
#[derive(Deserialize, Default)]
struct RawConfig {
    #[serde(default)]
    paths: RawPaths,
    #[serde(default)]
    secret: RawSecret,
    #[serde(default)]
    output: RawOutput,
    #[serde(default)]
    log: RawLog,
}

#[derive(Deserialize)]
struct RawPaths {
    #[serde(default = "default_key_file")]
    key_file: String,
    #[serde(default = "default_template")]
    template: String,
    #[serde(default = "default_output")]
    output: String,
}

#[derive(Deserialize)]
struct RawSecret {
    /// Maps to `env_var = "..."` in `[secret]`.
    #[serde(rename = "env_var", default = "default_override_var")]
    override_var: String,
    #[serde(default = "default_marker")]
    marker: String,
}

#[derive(Deserialize, Default)]
struct RawOutput {
    #[serde(default)]
    mode: WriteMode,
}

#[derive(Deserialize)]
struct RawLog {
    #[serde(default = "default_log_level")]
    level: String,
}

impl Default for RawPaths {
    fn default() -> Self {
        Self {
            key_file: default_key_file(),
            template: default_template(),
            output: default_output(),
        }
    }
}

impl Default for RawSecret {
    fn default() -> Self {
        Self { override_var: default_override_var(), marker: default_marker() }
    }
}

impl Default for RawLog {
    fn default() -> Self {
        Self { level: default_log_level() }
    }
}

fn default_key_file() -> String { "keys.txt".to_string() }
fn default_template() -> String { ".env.sample".to_string() }
fn default_output() -> String { ".env".to_string() }
fn default_override_var() -> String { "PRIVATE_KEY".to_string() }
fn default_marker() -> String { "PRIVATE_KEY=".to_string() }
fn default_log_level() -> String { "info".to_string() }

/// Load config from `config_path` (or `envboot.toml` when absent), then apply
/// the `ENVBOOT_LOG_LEVEL` env override and `overrides`.
pub fn load(config_path: Option<&Path>, mut overrides: Overrides) -> Result<Config, AppError> {
    if overrides.log_level.is_none() {
        overrides.log_level = env::var("ENVBOOT_LOG_LEVEL").ok().filter(|l| !l.is_empty());
    }
    match config_path {
        Some(path) => load_from(Some(path), overrides),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_PATH);
            load_from(default_path.exists().then_some(default_path), overrides)
        }
    }
}

/// Read the override variable from the process environment.
///
/// Unset is `None`. A value that is set but not valid UTF-8 is an error
/// rather than being treated as unset.
pub fn read_override(var: &str) -> Result<Option<String>, AppError> {
    override_from(var, env::var_os(var))
}

fn override_from(var: &str, raw: Option<OsString>) -> Result<Option<String>, AppError> {
    raw.map(|value| {
        value
            .into_string()
            .map_err(|_| AppError::Config(format!("{var} is set but not valid UTF-8")))
    })
    .transpose()
}

/// Internal loader — accepts an explicit path and overrides.
/// Tests pass overrides directly instead of mutating env vars.
///
/// `path == None` means "no config file": defaults plus overrides.
pub fn load_from(path: Option<&Path>, overrides: Overrides) -> Result<Config, AppError> {
    let parsed = match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;
            toml::from_str::<RawConfig>(&raw)
                .map_err(|e| AppError::Config(format!("parse error in {}: {e}", path.display())))?
        }
        None => RawConfig::default(),
    };

    if parsed.secret.marker.is_empty() {
        return Err(AppError::Config("[secret].marker must not be empty".into()));
    }
    if parsed.secret.override_var.is_empty() {
        return Err(AppError::Config("[secret].env_var must not be empty".into()));
    }

    Ok(Config {
        key_file: overrides.key_file.unwrap_or_else(|| expand_home(&parsed.paths.key_file)),
        template: overrides.template.unwrap_or_else(|| expand_home(&parsed.paths.template)),
        output: overrides.output.unwrap_or_else(|| expand_home(&parsed.paths.output)),
        override_var: parsed.secret.override_var,
        marker: parsed.secret.marker,
        write_mode: overrides.write_mode.unwrap_or(parsed.output.mode),
        log_level: overrides.log_level.unwrap_or(parsed.log.level),
    })
}

/// Expand a leading `~` to the user's home directory.
/// Absolute or relative paths without `~` are returned unchanged.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

// ── test helpers ──────────────────────────────────────────────────────────────

/// Config rooted in `dir` — every input and output lives under the temp dir.
#[cfg(test)]
impl Config {
    pub fn test_default(dir: &Path) -> Self {
        Self {
            key_file: dir.join("keys.txt"),
            template: dir.join(".env.sample"),
            output: dir.join(".env"),
            ..Self::default()
        }
    }
}
