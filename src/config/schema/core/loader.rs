use super::Config;
use anyhow::{Context, Result, bail};
use directories::UserDirs;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR_NAME: &str = ".orchestrate";
const CONFIG_FILE_NAME: &str = "config.toml";

impl Config {
    /// `~/.orchestrate/config.toml`
    pub fn default_path() -> Result<PathBuf> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .context("Could not find home directory")?;
        Ok(home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load the effective configuration.
    ///
    /// An explicit path must exist. The default path may be missing, in which
    /// case built-in defaults are used. Environment overrides are applied on
    /// top and the result is validated.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => {
                let path = PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).as_ref());
                if !path.exists() {
                    bail!("Config file {} does not exist", path.display());
                }
                Self::read_file(&path)?
            }
            None => {
                let path = Self::default_path()?;
                if path.exists() {
                    Self::read_file(&path)?
                } else {
                    tracing::debug!(path = %path.display(), "no config file, using defaults");
                    Self {
                        config_path: path,
                        ..Self::default()
                    }
                }
            }
        };

        config.apply_env_overrides();
        config
            .validate()
            .context("Invalid configuration after environment overrides")?;
        Ok(config)
    }

    /// Parse and validate a config file without consulting the environment.
    pub fn read_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.config_path = path.to_path_buf();
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.config_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory {}", parent.display())
            })?;
        }
        let toml_str = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&self.config_path, toml_str).context("Failed to write config file")?;
        Ok(())
    }
}
