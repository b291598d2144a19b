//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del cliente: URL base de la API,
//! nivel de log y ruta inicial.

use std::env;
use std::str::FromStr;

use thiserror::Error;
use tracing::Level;

use crate::routes::Route;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api/v1";

/// Errores de configuración
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: '{value}'")]
    InvalidValue { name: &'static str, value: String },
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub api_base_url: String,
    pub log_level: Level,
    pub start_route: Route,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            log_level: Level::INFO,
            start_route: Route::TruckList,
        }
    }
}

impl EnvironmentConfig {
    /// Leer la configuración de las variables de entorno
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Construir la configuración a partir de una función de búsqueda
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_base_url = lookup("FLEET_API_BASE_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or(defaults.api_base_url);

        let log_level = match lookup("LOG_LEVEL") {
            Some(value) => Level::from_str(value.trim()).map_err(|_| ConfigError::InvalidValue {
                name: "LOG_LEVEL",
                value,
            })?,
            None => defaults.log_level,
        };

        let start_route = lookup("START_ROUTE")
            .map(|path| Route::parse(&path))
            .unwrap_or(defaults.start_route);

        Ok(Self {
            api_base_url,
            log_level,
            start_route,
        })
    }
}
