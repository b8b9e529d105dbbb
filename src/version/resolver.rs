use serde::Serialize;
use std::path::{Path, PathBuf};

/// Version baked into packaged builds. Bump on every release.
pub const FROZEN_VERSION: &str = "1.0.1";

/// Returned when no version can be found
pub const DEFAULT_VERSION: &str = "0.0.0";

/// Name of the plain-text version file
pub const VERSION_FILE_NAME: &str = "VERSION";

/// Environment variable the host uses to flag a packaged run
pub const FROZEN_ENV: &str = "POSTBUILD_FROZEN";

/// How the current process is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// Packaged executable; the compiled-in literal wins
    Frozen,
    /// Running from a source checkout; read the version file
    Source,
}

impl RunMode {
    /// Read the host's frozen flag.
    ///
    /// `POSTBUILD_FROZEN` decides when set; otherwise release builds count as
    /// frozen and debug builds as source runs.
    pub fn detect() -> Self {
        match std::env::var(FROZEN_ENV) {
            Ok(value) => Self::from_flag(&value).unwrap_or_else(Self::from_build),
            Err(_) => Self::from_build(),
        }
    }

    /// Parse a boolean-ish flag value
    pub fn from_flag(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(RunMode::Frozen),
            "0" | "false" | "no" | "off" | "" => Some(RunMode::Source),
            _ => None,
        }
    }

    fn from_build() -> Self {
        if cfg!(debug_assertions) {
            RunMode::Source
        } else {
            RunMode::Frozen
        }
    }
}

impl std::fmt::Display for RunMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunMode::Frozen => write!(f, "frozen"),
            RunMode::Source => write!(f, "source"),
        }
    }
}

/// Picks the application version for a run mode
#[derive(Debug, Clone)]
pub struct VersionResolver {
    pub frozen_version: String,
    pub version_file: PathBuf,
}

impl VersionResolver {
    pub fn new(frozen_version: impl Into<String>, version_file: impl Into<PathBuf>) -> Self {
        Self {
            frozen_version: frozen_version.into(),
            version_file: version_file.into(),
        }
    }

    /// Resolver reading `VERSION` from `dir`, with the compiled-in frozen version
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(FROZEN_VERSION, dir.join(VERSION_FILE_NAME))
    }

    /// Resolve the version. Never fails; every miss yields `DEFAULT_VERSION`.
    pub fn resolve(&self, mode: RunMode) -> String {
        match mode {
            RunMode::Frozen => self.frozen_version.clone(),
            RunMode::Source => read_version_file(&self.version_file)
                .unwrap_or_else(|| DEFAULT_VERSION.to_string()),
        }
    }
}

/// Trimmed, non-empty contents of a version file
fn read_version_file(path: &Path) -> Option<String> {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::debug!("No version file at {}: {}", path.display(), e);
            return None;
        }
    };
    let value = contents.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
