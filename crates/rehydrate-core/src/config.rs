//! Lightweight configuration loader.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env vars.
//! Nested keys in env vars are separated by `__`, so `APP_HYDRATE__CLASSIFIER`
//! overrides `hydrate.classifier`.
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;

use crate::error::{Error, Result};

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::new().merge(Toml::file("config.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        Ok(Self { figment })
    }

    pub fn from_figment(figment: Figment) -> Self {
        Self { figment }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.figment.contains(key)
    }

    pub fn get<T>(&self, key: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| Error::InvalidConfig(format!("Failed to get '{}': {}", key, e)))
    }
}

/// Which built-in classifier decides the entity type of a hit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierKind {
    /// Index name and type tag must both match.
    #[default]
    IndexAndType,
    /// Only the type tag must match; the first registered type wins.
    TypeOnly,
}

/// The `[hydrate]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HydrateSettings {
    #[serde(default)]
    pub classifier: ClassifierKind,
}

impl HydrateSettings {
    pub const SECTION: &'static str = "hydrate";

    /// Reads `[hydrate]`, falling back to defaults when the section is absent.
    pub fn from_config(config: &Config) -> Result<Self> {
        if !config.contains(Self::SECTION) {
            return Ok(Self::default());
        }
        config.get(Self::SECTION)
    }
}
