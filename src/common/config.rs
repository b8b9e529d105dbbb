use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::common::safety;
use crate::version::FROZEN_VERSION;

/// Name of the per-project config file looked up under the project root
pub const CONFIG_FILE_NAME: &str = "postbuild.toml";

/// Packaging configuration for one application
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PackConfig {
    /// Application name; names the dist folder, the final folder and the executable
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Build workspace directory, relative to the project root
    #[serde(default = "default_workspace")]
    pub workspace: PathBuf,

    /// Build output directory inside the workspace
    #[serde(default = "default_dist_dir")]
    pub dist_dir: PathBuf,

    /// Executable file name inside the final folder (defaults to `<app_name>.exe`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executable: Option<String>,

    /// Launch the executable once packaging is done
    #[serde(default = "default_true")]
    pub launch: bool,

    /// Version reported by packaged builds
    #[serde(default = "default_frozen_version")]
    pub frozen_version: String,

    /// Extra files copied into the final folder
    #[serde(default = "default_files")]
    pub files: Vec<CopyEntry>,

    /// Temporary directories removed after relocation
    #[serde(default)]
    pub purge: PurgeTargets,
}

/// A single manifest entry: source relative to the project root,
/// destination relative to the final application folder
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CopyEntry {
    pub source: PathBuf,
    pub dest: PathBuf,
}

impl CopyEntry {
    pub fn new(source: impl Into<PathBuf>, dest: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            dest: dest.into(),
        }
    }

    /// Same name on both sides
    pub fn same(name: &str) -> Self {
        Self::new(name, name)
    }
}

/// Directory names to purge, grouped by the directory they live in
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PurgeTargets {
    #[serde(default = "default_workspace_purge")]
    pub workspace: Vec<PathBuf>,
    #[serde(default = "default_root_purge")]
    pub root: Vec<PathBuf>,
    #[serde(default = "default_app_purge")]
    pub app: Vec<PathBuf>,
}

impl Default for PurgeTargets {
    fn default() -> Self {
        Self {
            workspace: default_workspace_purge(),
            root: default_root_purge(),
            app: default_app_purge(),
        }
    }
}

fn default_app_name() -> String {
    "Stopwatch".to_string()
}
fn default_workspace() -> PathBuf {
    PathBuf::from("Build_Tools")
}
fn default_dist_dir() -> PathBuf {
    PathBuf::from("dist")
}
fn default_true() -> bool {
    true
}
fn default_frozen_version() -> String {
    FROZEN_VERSION.to_string()
}
fn default_files() -> Vec<CopyEntry> {
    [
        "logo.ico",
        "settings.json",
        "Начал.mp3",
        "Закончил.mp3",
        "Вернись.mp3",
        "Timer-sound.mp3",
        "Stopwatch-sound.mp3",
        "get_coords.exe",
    ]
    .iter()
    .map(|name| CopyEntry::same(name))
    .collect()
}
fn default_workspace_purge() -> Vec<PathBuf> {
    ["build", "dist", "__pycache__"].iter().map(PathBuf::from).collect()
}
fn default_root_purge() -> Vec<PathBuf> {
    ["dist", "build", "__pycache__"].iter().map(PathBuf::from).collect()
}
fn default_app_purge() -> Vec<PathBuf> {
    vec![PathBuf::from("__pycache__")]
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            workspace: default_workspace(),
            dist_dir: default_dist_dir(),
            executable: None,
            launch: true,
            frozen_version: default_frozen_version(),
            files: default_files(),
            purge: PurgeTargets::default(),
        }
    }
}

/// Concrete directories for one packaging run
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub root: PathBuf,
    pub workspace: PathBuf,
    /// `<workspace>/<dist_dir>/<app_name>`
    pub dist_app_dir: PathBuf,
    /// `<root>/<app_name>`
    pub final_app_dir: PathBuf,
}

impl PackConfig {
    /// Default config file path for a project root
    pub fn config_path(root: &Path) -> PathBuf {
        root.join(CONFIG_FILE_NAME)
    }

    /// Load config from file, or fall back to defaults if it does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            let config: PackConfig = toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config: {}", path.display()))?;
            config.validate(path)?;
            Ok(config)
        } else {
            Ok(PackConfig::default())
        }
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config dir: {}", dir.display()))?;
        }
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    fn validate(&self, path: &Path) -> Result<()> {
        let name = self.app_name.trim();
        if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
            return Err(crate::common::errors::PackError::Config {
                path: path.to_path_buf(),
                message: format!("app_name must be a plain folder name, got '{}'", self.app_name),
            }
            .into());
        }

        let invalid = |message: String| -> anyhow::Error {
            crate::common::errors::PackError::Config {
                path: path.to_path_buf(),
                message,
            }
            .into()
        };

        for entry in &self.files {
            if !safety::is_plain_relative(&entry.dest) {
                return Err(invalid(format!(
                    "files: dest for '{}' must be a relative path inside the app folder, got '{}'",
                    entry.source.display(),
                    entry.dest.display()
                )));
            }
        }

        let groups = [
            ("workspace", &self.purge.workspace),
            ("root", &self.purge.root),
            ("app", &self.purge.app),
        ];
        for (group, names) in groups {
            if let Some(bad) = names.iter().find(|n| !safety::is_plain_relative(n)) {
                return Err(invalid(format!(
                    "purge.{}: entries must name something inside the folder, got '{}'",
                    group,
                    bad.display()
                )));
            }
        }
        Ok(())
    }

    /// Executable file name inside the final folder
    pub fn executable_name(&self) -> String {
        self.executable
            .clone()
            .unwrap_or_else(|| format!("{}.exe", self.app_name))
    }

    /// Resolve all run directories against a project root
    pub fn layout(&self, root: &Path) -> Layout {
        let workspace = root.join(&self.workspace);
        Layout {
            root: root.to_path_buf(),
            dist_app_dir: workspace.join(&self.dist_dir).join(&self.app_name),
            final_app_dir: root.join(&self.app_name),
            workspace,
        }
    }

    /// Every temporary directory to purge, in purge order
    pub fn purge_paths(&self, layout: &Layout) -> Vec<PathBuf> {
        let in_dir = |base: &Path, names: &[PathBuf]| -> Vec<PathBuf> {
            names.iter().map(|n| base.join(n)).collect::<Vec<_>>()
        };
        let mut paths = in_dir(&layout.workspace, &self.purge.workspace);
        paths.extend(in_dir(&layout.root, &self.purge.root));
        paths.extend(in_dir(&layout.final_app_dir, &self.purge.app));
        paths
    }
}
