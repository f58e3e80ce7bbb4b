use crate::error::{Result, SniError};
use directories::BaseDirs;
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the storage directory.
pub const CONFIG_DIR_ENV: &str = "SNI_CONFIG_DIR";
pub const SNIPPET_FILENAME: &str = "snippets.yaml";
pub const DEFAULT_SERVER_PORT: u16 = 8080;

const PROJECT_DIR_NAME: &str = ".sni";

/// Where the storage directory came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    Env,
    Project,
    Home,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Env => write!(f, "from {}", CONFIG_DIR_ENV),
            ConfigSource::Project => write!(f, "default"),
            ConfigSource::Home => write!(f, "fallback"),
        }
    }
}

/// Resolved runtime configuration.
///
/// Built once at startup and handed to the store, so nothing below the CLI
/// looks at the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SniConfig {
    pub config_dir: PathBuf,
    pub snippet_file: PathBuf,
    pub server_port: u16,
    pub source: ConfigSource,
}

impl SniConfig {
    /// Configuration rooted at an explicit directory.
    pub fn new<P: AsRef<Path>>(config_dir: P, source: ConfigSource) -> Self {
        let config_dir = config_dir.as_ref().to_path_buf();
        Self {
            snippet_file: config_dir.join(SNIPPET_FILENAME),
            config_dir,
            server_port: DEFAULT_SERVER_PORT,
            source,
        }
    }

    /// Resolve from the process environment: `SNI_CONFIG_DIR`, then
    /// `<cwd>/.sni`, then `~/.config/sni`.
    pub fn from_env() -> Result<Self> {
        let override_dir = env::var_os(CONFIG_DIR_ENV).map(PathBuf::from);
        let cwd = env::current_dir().ok();
        let home = BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf());
        Self::resolve(override_dir, cwd, home)
    }

    pub fn resolve(
        override_dir: Option<PathBuf>,
        cwd: Option<PathBuf>,
        home: Option<PathBuf>,
    ) -> Result<Self> {
        if let Some(dir) = override_dir.filter(|d| !d.as_os_str().is_empty()) {
            return Ok(Self::new(dir, ConfigSource::Env));
        }
        if let Some(cwd) = cwd {
            return Ok(Self::new(cwd.join(PROJECT_DIR_NAME), ConfigSource::Project));
        }
        if let Some(home) = home {
            return Ok(Self::new(
                home.join(".config").join("sni"),
                ConfigSource::Home,
            ));
        }
        Err(SniError::InvalidInput(format!(
            "could not determine a storage directory; set {}",
            CONFIG_DIR_ENV
        )))
    }

    pub fn with_server_port(mut self, port: u16) -> Self {
        self.server_port = port;
        self
    }

    /// Human readable location, e.g. `/work/.sni (default)`.
    pub fn describe(&self) -> String {
        format!("{} ({})", self.config_dir.display(), self.source)
    }
}
