//! Configuration types for the resolution system

use crate::core::{ResolveError, Result};
use std::time::Duration;

/// Configuration for the CurseForge client
#[derive(Debug, Clone)]
pub struct CurseForgeConfig {
    pub base_url: String,
    pub api_key: String,
    /// CurseForge game id for Minecraft
    pub game_id: u32,
    /// Class id of the mods section within the game
    pub mod_class_id: u32,
    /// Version-type group that carries mainline Minecraft releases
    pub game_version_type_id: u32,
    /// CDN host that constructed download URLs point at
    pub cdn_base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for CurseForgeConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.curseforge.com/v1".to_string(),
            api_key: String::new(),
            game_id: 432, // Minecraft
            mod_class_id: 6, // Mods
            game_version_type_id: 1,
            cdn_base_url: "https://mediafilez.forgecdn.net".to_string(),
            user_agent: "resolver/0.1.0".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl CurseForgeConfig {
    /// Build a config from the environment, loading `.env` when present.
    /// `CURSEFORGE_API_KEY` is required; everything else keeps its default.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok(); // Ignore error if .env not present

        let api_key = std::env::var("CURSEFORGE_API_KEY").map_err(|_| {
            ResolveError::Configuration {
                message: "CURSEFORGE_API_KEY environment variable not set".to_string(),
                field: Some("api_key".to_string()),
                suggestion: Some(
                    "Set CURSEFORGE_API_KEY or put it in a .env file".to_string(),
                ),
            }
        })?;

        Ok(Self {
            api_key,
            ..Self::default()
        })
    }

    pub fn with_api_key<S: Into<String>>(mut self, api_key: S) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_cdn_base_url<S: Into<String>>(mut self, cdn_base_url: S) -> Self {
        self.cdn_base_url = cdn_base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Reject configs that cannot produce authenticated requests
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(ResolveError::Configuration {
                message: "CurseForge API key is empty".to_string(),
                field: Some("api_key".to_string()),
                suggestion: Some("Pass an API key or use CurseForgeConfig::from_env".to_string()),
            });
        }
        Ok(())
    }
}

/// Configuration for the Modrinth client
#[derive(Debug, Clone)]
pub struct ModrinthConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for ModrinthConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.modrinth.com/v2".to_string(),
            user_agent: "resolver/0.1.0".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ModrinthConfig {
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curseforge_defaults_target_minecraft_mods() {
        let config = CurseForgeConfig::default();
        assert_eq!(config.game_id, 432);
        assert_eq!(config.mod_class_id, 6);
        assert_eq!(config.base_url, "https://api.curseforge.com/v1");
    }

    #[test]
    fn curseforge_validate_requires_api_key() {
        let config = CurseForgeConfig::default();
        assert!(config.validate().is_err());
        assert!(config.with_api_key("test-key").validate().is_ok());
    }

    #[test]
    fn builders_override_defaults() {
        let config = ModrinthConfig::default()
            .with_base_url("http://localhost:9999")
            .with_user_agent("tests/1.0")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.base_url, "http://localhost:9999");
        assert_eq!(config.user_agent, "tests/1.0");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
