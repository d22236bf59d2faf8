//! Configuration file loader with multi-source merging

use super::file_config::{FileConfig, FilePolicyConfig};
use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// Prefix of environment variable overrides (`BLOCKAGENT_RPC__TIMEOUT_SECS`)
pub const ENV_PREFIX: &str = "BLOCKAGENT_";

const PROJECT_FILES: [&str; 2] = ["blockagent.toml", ".blockagent.toml"];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `BLOCKAGENT_*` environment variables (`__` separates nesting)
    /// 2. JSON policy file named by `policy_file` (policy section only)
    /// 3. Explicit config path (if provided)
    /// 4. Project root: `./blockagent.toml` or `./.blockagent.toml`
    /// 5. Global: `<config dir>/blockagent/config.toml`
    /// 6. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let figment = Self::file_figment(config_path);

        // The policy file location may itself come from env or any file
        let located: FileConfig = figment
            .clone()
            .merge(Self::env())
            .extract()
            .map_err(Box::new)?;

        let figment = match &located.policy_file {
            Some(path) => {
                let policy = Self::load_policy_file(path)?;
                tracing::debug!(path = %path.display(), "Loaded policy file");
                figment.merge(Serialized::global("policy", policy))
            }
            None => figment,
        };

        figment.merge(Self::env()).extract().map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Read a JSON policy file (`allowedTools`, `maxAmountEther`,
    /// `blockedMethods`).
    pub fn load_policy_file(path: &Path) -> Result<FilePolicyConfig, Box<figment::Error>> {
        // Figment treats a missing file as empty; a named policy file must exist
        if !path.exists() {
            return Err(Box::new(figment::Error::from(format!(
                "policy file {} does not exist",
                path.display()
            ))));
        }
        Figment::from(Json::file(path))
            .extract()
            .map_err(Box::new)
    }

    fn file_figment(config_path: Option<&PathBuf>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        // Add global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        // Add project-level config file (first name found)
        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&path));
        }

        // Add explicit config path (highest priority for files)
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment
    }

    fn env() -> Env {
        Env::prefixed(ENV_PREFIX).split("__")
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("blockagent").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Describe the config sources, in priority order, for the `config`
    /// command. Each entry is `(found, label, location)`.
    pub fn config_sources(config_path: Option<&PathBuf>) -> Vec<(bool, &'static str, String)> {
        let mut sources = Vec::new();

        if let Some(path) = config_path {
            sources.push((path.exists(), "Explicit", path.display().to_string()));
        }

        match Self::project_config_path() {
            Some(path) => sources.push((true, "Project", path.display().to_string())),
            None => sources.push((
                false,
                "Project",
                "./blockagent.toml or ./.blockagent.toml".to_string(),
            )),
        }

        if let Some(path) = Self::global_config_path() {
            sources.push((path.exists(), "Global", path.display().to_string()));
        }

        sources.push((true, "Default", "built-in defaults".to_string()));
        sources
    }
}
