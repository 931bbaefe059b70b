//! Env bootstrap — resolves the active secret and writes the expanded template.
//!
//! Sequence:
//!   1. Load the key-pair file
//!   2. Resolve the secret (non-empty override beats the file)
//!   3. Load and expand the template
//!   4. Write the output file
//!
//! Every input is read before the output is touched, so a failed run leaves
//! the output file as it was.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::{
    config::{Config, WriteMode},
    env_file,
    error::AppError,
    keypair::KeyPairRecord,
    template::EnvTemplate,
    verify::{self, OutputSummary},
};

/// Where the active private key came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretSource {
    KeyFile(PathBuf),
    Environment { var: String },
}

impl fmt::Display for SecretSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecretSource::KeyFile(path) => write!(f, "key file {}", path.display()),
            SecretSource::Environment { var } => write!(f, "environment variable {var}"),
        }
    }
}

/// Outcome of one bootstrap run.
#[derive(Debug, Clone)]
pub struct BootstrapReport {
    /// Always taken from the key-pair file.
    pub verification_key: String,
    pub source: SecretSource,
    /// First 8 hex chars of `SHA256(active secret)`.
    pub fingerprint: String,
    pub template: PathBuf,
    pub output: PathBuf,
    pub write_mode: WriteMode,
    pub marker: String,
    pub marker_found: bool,
    pub bytes_written: usize,
    /// Dotenv parse of the written file; `None` if it did not parse or the
    /// marker is not a `KEY=` assignment.
    pub output_check: Option<OutputSummary>,
    /// Key looked up by `output_check`.
    pub checked_key: Option<String>,
}

/// Pick the active secret: a non-empty `override_value` wins over the file.
pub fn resolve_secret<'a>(
    record: &'a KeyPairRecord,
    key_file: &Path,
    override_var: &str,
    override_value: Option<&'a str>,
) -> (&'a str, SecretSource) {
    match override_value.filter(|v| !v.is_empty()) {
        Some(value) => (value, SecretSource::Environment { var: override_var.to_string() }),
        None => (record.full_private_key(), SecretSource::KeyFile(key_file.to_path_buf())),
    }
}

/// Derive a short display fingerprint of a secret.
pub fn fingerprint(secret: &str) -> String {
    let digest = Sha256::digest(secret.as_bytes());
    hex::encode(digest)[..8].to_string()
}

/// Run the bootstrap described by `config`.
///
/// `override_value` is the current value of `config.override_var`; the caller
/// reads it from the process environment.
pub fn run(config: &Config, override_value: Option<&str>) -> Result<BootstrapReport, AppError> {
    let record = KeyPairRecord::load(&config.key_file)?;
    debug!(key_file = %config.key_file.display(), "key-pair file loaded");

    let (secret, source) =
        resolve_secret(&record, &config.key_file, &config.override_var, override_value);
    info!(source = %source, "private key resolved");

    let template = EnvTemplate::load(&config.template)?;
    let expansion = template.expand(&config.marker, secret);
    if !expansion.marker_found {
        warn!(
            template = %config.template.display(),
            marker = %config.marker,
            "marker not found; template written unchanged"
        );
    } else if expansion.occurrences > 1 {
        warn!(
            template = %config.template.display(),
            marker = %config.marker,
            occurrences = expansion.occurrences,
            "marker appears more than once; only the first was expanded"
        );
    }

    let bytes_written = env_file::write(&config.output, &expansion.content, config.write_mode)?;
    info!(
        output = %config.output.display(),
        mode = %config.write_mode,
        bytes = bytes_written,
        "env file written"
    );

    let checked_key = config.marker.strip_suffix('=').map(str::to_string);
    let output_check = checked_key.as_deref().and_then(|key| verify::inspect(&config.output, key));

    Ok(BootstrapReport {
        verification_key: record.verification_key().to_string(),
        fingerprint: fingerprint(secret),
        source,
        template: config.template.clone(),
        output: config.output.clone(),
        write_mode: config.write_mode,
        marker: config.marker.clone(),
        marker_found: expansion.marker_found,
        bytes_written,
        output_check,
        checked_key,
    })
}

// ── tests ─────────────────────────────────────────────────────────────────────
