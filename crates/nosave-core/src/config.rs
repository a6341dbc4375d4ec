use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::constants;
use crate::models::TimestampFormatter;

/// Core configuration, loadable from a camelCase JSON file.
/// Every field has a default so partial files are fine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoreConfig {
    pub data_dir: PathBuf,
    /// Call-history database; `<dataDir>/call_history.db` when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_db: Option<PathBuf>,
    /// chrono pattern for call timestamps
    pub date_format: String,
    pub chat_app: ChatAppConfig,
}

/// The external chat application and where to send users who lack it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatAppConfig {
    pub display_name: String,
    pub package: String,
    pub deep_link_base: String,
    pub market_uri_base: String,
    pub store_web_base: String,
    /// Executable that counts as "installed" on desktop
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desktop_command: Option<String>,
}

impl ChatAppConfig {
    pub fn market_uri(&self) -> String {
        format!("{}{}", self.market_uri_base, self.package)
    }

    pub fn store_web_url(&self) -> String {
        format!("{}{}", self.store_web_base, self.package)
    }
}

impl Default for ChatAppConfig {
    fn default() -> Self {
        Self {
            display_name: constants::CHAT_APP_NAME.to_string(),
            package: constants::CHAT_APP_PACKAGE.to_string(),
            deep_link_base: constants::CHAT_DEEP_LINK_BASE.to_string(),
            market_uri_base: constants::MARKET_URI_BASE.to_string(),
            store_web_base: constants::STORE_WEB_BASE.to_string(),
            desktop_command: Some(constants::DESKTOP_CHAT_COMMAND.to_string()),
        }
    }
}

impl CoreConfig {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            history_db: None,
            date_format: constants::DEFAULT_DATE_FORMAT.to_string(),
            chat_app: ChatAppConfig::default(),
        }
    }

    /// Load config from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: CoreConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Explicit path if given, else the per-user config file when it exists, else defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match default_config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn history_db_path(&self) -> PathBuf {
        self.history_db
            .clone()
            .unwrap_or_else(|| self.data_dir.join(constants::HISTORY_DB_FILE))
    }

    pub fn timestamp_formatter(&self) -> TimestampFormatter {
        TimestampFormatter::new(&self.date_format)
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self::new(default_data_dir())
    }
}

/// `$NOSAVE_BASE_DIR`, else `<platform data dir>/nosave`
pub fn default_data_dir() -> PathBuf {
    if let Ok(base_dir) = std::env::var("NOSAVE_BASE_DIR") {
        return PathBuf::from(base_dir);
    }
    let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("nosave")
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("nosave").join("config.json"))
}
