//! Application configuration loading

mod app_config;

pub use app_config::{
    AppConfig, ClubAuthConfig, InviteConfig, LogFormat, LoggingConfig, ServerConfig,
};
