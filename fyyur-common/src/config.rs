//! Configuration loading and root folder resolution

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Environment variable naming the root folder
pub const ROOT_FOLDER_ENV: &str = "FYYUR_ROOT_FOLDER";

/// Database file name inside the root folder
pub const DATABASE_FILE: &str = "fyyur.db";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;

/// Optional TOML configuration file contents
///
/// ```toml
/// root_folder = "/srv/fyyur"
/// host = "0.0.0.0"
/// port = 8080
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub root_folder: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl TomlConfig {
    /// Parse a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Load the platform config file if one exists
    ///
    /// A missing file is normal; an unreadable or malformed one is logged and
    /// ignored so startup falls through to the defaults.
    pub fn load_default() -> Option<Self> {
        let path = config_file_path()?;
        match Self::load(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!("Ignoring config file: {}", e);
                None
            }
        }
    }
}

/// Values supplied on the command line (or via their env fallbacks)
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub root_folder: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Resolved server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub root_folder: PathBuf,
    pub database_path: PathBuf,
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Merge command-line overrides, the config file and compiled defaults
    pub fn resolve(overrides: Overrides, file: Option<TomlConfig>) -> Self {
        let file = file.unwrap_or_default();
        let root_folder =
            resolve_root_folder(overrides.root_folder.as_deref(), ROOT_FOLDER_ENV, Some(&file));
        let database_path = root_folder.join(DATABASE_FILE);

        Self {
            root_folder,
            database_path,
            host: overrides
                .host
                .or(file.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: overrides.port.or(file.port).unwrap_or(DEFAULT_PORT),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Create the root folder if needed
    pub fn ensure_root_folder(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root_folder)?;
        Ok(())
    }
}

/// Root folder resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_root_folder(
    cli_arg: Option<&Path>,
    env_var_name: &str,
    file: Option<&TomlConfig>,
) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(env_var_name) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Some(root_folder) = file.and_then(|f| f.root_folder.clone()) {
        return root_folder;
    }

    default_root_folder()
}

/// Platform config file location, if present
pub fn config_file_path() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("fyyur").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/fyyur/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// Get OS-dependent default root folder path
pub fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("fyyur"))
        .unwrap_or_else(|| PathBuf::from("./fyyur_data"))
}
