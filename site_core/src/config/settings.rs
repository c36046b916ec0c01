use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_ADMIN_PASSWORD: &str = "admin2024";
pub const MAX_TOAST_DURATION_MS: u64 = 60_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub admin: AdminConfig,
    pub chat: ChatConfig,
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub local_path: PathBuf,
    pub messages_key: String,
    pub session_flag_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    pub api_base_url: String,
    pub model: String,
    pub api_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub toast_duration_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            admin: AdminConfig::default(),
            chat: ChatConfig::default(),
            dashboard: DashboardConfig::default(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            local_path: PathBuf::from("./site_storage.json"),
            messages_key: "contact_messages".to_string(),
            session_flag_key: "admin_authenticated".to_string(),
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            password: DEFAULT_ADMIN_PASSWORD.to_string(),
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-1.5-flash".to_string(),
            api_key: String::new(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            toast_duration_ms: 3000,
        }
    }
}

impl AppConfig {
    /// Defaults, then `site.toml` if present, then `SITE_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(Config::try_from(&AppConfig::default())?);

        if std::path::Path::new("site.toml").exists() {
            builder = builder.add_source(File::with_name("site"));
        }

        builder = builder.add_source(
            Environment::with_prefix("SITE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let app_config: AppConfig = config.try_deserialize()?;

        app_config.validate()?;

        Ok(app_config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.messages_key.is_empty() {
            return Err(ConfigError::Message(
                "Messages storage key cannot be empty".to_string(),
            ));
        }

        if self.storage.session_flag_key.is_empty() {
            return Err(ConfigError::Message(
                "Session flag key cannot be empty".to_string(),
            ));
        }

        if self.storage.messages_key == self.storage.session_flag_key {
            return Err(ConfigError::Message(
                "Messages key and session flag key must differ".to_string(),
            ));
        }

        if self.admin.password.is_empty() {
            return Err(ConfigError::Message(
                "Admin password cannot be empty".to_string(),
            ));
        }

        if self.admin.password == DEFAULT_ADMIN_PASSWORD {
            tracing::warn!("Using default admin password - change this in production!");
        }

        if self.chat.api_base_url.is_empty() || self.chat.model.is_empty() {
            return Err(ConfigError::Message(
                "Chat API base URL and model must be set".to_string(),
            ));
        }

        if self.dashboard.toast_duration_ms == 0
            || self.dashboard.toast_duration_ms > MAX_TOAST_DURATION_MS
        {
            return Err(ConfigError::Message(format!(
                "Toast duration must be between 1 and {} ms",
                MAX_TOAST_DURATION_MS
            )));
        }

        Ok(())
    }

    pub fn chat_enabled(&self) -> bool {
        !self.chat.api_key.is_empty()
    }
}
