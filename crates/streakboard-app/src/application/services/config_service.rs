use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, RwLock};
use tracing::{info, warn};

use streakboard_domain::shared::UserId;

/// Log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error = 1,
    Warn = 2,
    #[default]
    Info = 3,
    Debug = 4,
    Trace = 5,
}

impl LogLevel {
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => LogLevel::Error,
            2 => LogLevel::Warn,
            3 => LogLevel::Info,
            4 => LogLevel::Debug,
            5 => LogLevel::Trace,
            _ => LogLevel::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl FromStr for LogLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(anyhow::anyhow!("Unknown log level: {}", other)),
        }
    }
}

/// Persistent configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: LogLevel,
    pub database_path: Option<PathBuf>,
    pub user_id: Option<String>,
}

/// Application configuration service, backed by a JSON file
pub struct ConfigService {
    log_level: Arc<AtomicU8>,
    config: RwLock<AppConfig>,
    config_path: PathBuf,
}

impl ConfigService {
    /// `<config dir>/streakboard/config.json`
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Failed to get config dir")?;
        Ok(config_dir.join("streakboard").join("config.json"))
    }

    /// Load the config at `config_path`. A missing or unreadable file yields defaults.
    pub fn load(config_path: &Path) -> Self {
        let config = match std::fs::read_to_string(config_path) {
            Ok(content) => serde_json::from_str::<AppConfig>(&content).unwrap_or_else(|e| {
                warn!("Ignoring malformed config {:?}: {}", config_path, e);
                AppConfig::default()
            }),
            Err(_) => AppConfig::default(),
        };

        info!("Config loaded from: {:?}", config_path);
        info!("Initial log level: {}", config.log_level.as_str());

        Self {
            log_level: Arc::new(AtomicU8::new(config.log_level as u8)),
            config: RwLock::new(config),
            config_path: config_path.to_path_buf(),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Snapshot of the current configuration
    pub fn snapshot(&self) -> AppConfig {
        let mut config = self.read().clone();
        config.log_level = self.get_log_level();
        config
    }

    /// Get current log level
    pub fn get_log_level(&self) -> LogLevel {
        LogLevel::from_u8(self.log_level.load(Ordering::Relaxed))
    }

    /// Set log level and persist to disk
    pub fn set_log_level(&self, level: LogLevel) -> Result<()> {
        info!("Changing log level to: {}", level.as_str());
        self.log_level.store(level as u8, Ordering::Relaxed);
        self.write().log_level = level;
        self.persist()?;

        info!("Log level will take effect on next run");
        Ok(())
    }

    pub fn database_path(&self) -> Option<PathBuf> {
        self.read().database_path.clone()
    }

    pub fn set_database_path(&self, path: PathBuf) -> Result<()> {
        self.write().database_path = Some(path);
        self.persist()
    }

    /// Configured user, or a freshly generated one that is saved for later runs
    pub fn ensure_user_id(&self) -> Result<UserId> {
        if let Some(id) = self.read().user_id.as_deref() {
            return Ok(UserId::from_string(id));
        }

        let user_id = UserId::new();
        info!("Generated new user id: {}", user_id);
        self.write().user_id = Some(user_id.as_str().to_string());
        self.persist()?;

        Ok(user_id)
    }

    fn persist(&self) -> Result<()> {
        if let Some(dir) = self.config_path.parent() {
            std::fs::create_dir_all(dir)?;
        }

        let content = serde_json::to_string_pretty(&self.snapshot())?;
        std::fs::write(&self.config_path, content)
            .with_context(|| format!("Failed to write config to {:?}", self.config_path))?;

        info!("Config saved to: {:?}", self.config_path);
        Ok(())
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, AppConfig> {
        self.config.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, AppConfig> {
        self.config.write().unwrap_or_else(|e| e.into_inner())
    }
}
