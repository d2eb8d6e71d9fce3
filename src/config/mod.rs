use crate::errors::{AppError, AppResult};
use crate::models::UserProfile;
use crate::models::profile::validate_rate;
use crate::store::ProfileSource;
use crate::utils::path::resolve_in;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

const APP_DIR: &str = ".timepay";
const CONFIG_NAME: &str = "timepay.conf";
const DB_NAME: &str = "timepay.sqlite";

/// Full path of the config file, overriding the default location.
pub const CONFIG_ENV: &str = "TIMEPAY_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default)]
    pub salary_rate: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_currency() -> String {
    "USD".to_string()
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            salary_rate: 0.0,
            currency: default_currency(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory (`~/.timepay`)
    pub fn config_dir() -> PathBuf {
        if let Ok(custom) = env::var(CONFIG_ENV)
            && let Some(parent) = Path::new(&custom).parent()
            && !parent.as_os_str().is_empty()
        {
            return parent.to_path_buf();
        }

        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        match env::var(CONFIG_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => Self::config_dir().join(CONFIG_NAME),
        }
    }

    /// Return the full path of the default SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join(DB_NAME)
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let cfg: Config = serde_yaml::from_str(&content).map_err(|e| {
            AppError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        cfg.profile_settings()?;
        Ok(cfg)
    }

    pub fn save(&self) -> AppResult<()> {
        self.save_to(&Self::config_file())
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }

        let yaml = serde_yaml::to_string(self)
            .map_err(|e| AppError::Config(format!("Failed to serialize config: {}", e)))?;
        let mut file = fs::File::create(path)?;
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }

    /// Initialize configuration and database paths.
    ///
    /// `custom_name` may be an absolute path or a bare file name placed in
    /// the config directory. In test mode the config file is not written.
    pub fn init_all(custom_name: Option<&str>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let db_path = match custom_name {
            Some(name) => resolve_in(&dir, name),
            None => dir.join(DB_NAME),
        };

        let mut config = if is_test {
            Self::default()
        } else {
            Self::load()?
        };
        config.database = db_path.to_string_lossy().to_string();

        if !is_test {
            config.save()?;
        }

        Ok(config)
    }

    pub fn set_rate(&mut self, rate: f64) -> AppResult<()> {
        validate_rate(rate)?;
        self.salary_rate = rate;
        Ok(())
    }

    pub fn set_currency(&mut self, currency: &str) -> AppResult<()> {
        let profile = UserProfile::new(self.salary_rate, currency)?;
        self.currency = profile.currency;
        Ok(())
    }

    /// The pay settings, validated.
    pub fn profile_settings(&self) -> AppResult<UserProfile> {
        UserProfile::new(self.salary_rate, self.currency.as_str())
    }
}

#[async_trait]
impl ProfileSource for Config {
    async fn profile(&self) -> AppResult<UserProfile> {
        self.profile_settings()
    }
}
