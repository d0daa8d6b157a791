use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub invites: InviteConfig,
    pub club_auth: ClubAuthConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Invite defaults applied when a request leaves fields unset
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InviteConfig {
    /// Uses granted when the request omits `uses_left` or sends a negative sentinel
    pub default_uses: u32,
    /// Expiry window in days applied when `days_valid` is zero; negative disables expiry
    pub default_valid_days: f64,
}

/// Validity windows for the passwordless club login flow
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClubAuthConfig {
    /// How long an emailed magic link stays redeemable, in days
    pub magic_link_valid_days: f64,
    /// How long a session created from a magic link stays valid, in days
    pub session_valid_days: f64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for InviteConfig {
    fn default() -> Self {
        Self {
            default_uses: 10,
            default_valid_days: 7.0,
        }
    }
}

impl Default for ClubAuthConfig {
    fn default() -> Self {
        Self {
            magic_link_valid_days: 7.0,
            session_valid_days: 180.0,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
