//! Shared application state
//!
//! Este módulo define el estado compartido que reciben todas las vistas:
//! configuración, canal de toasts y servicio de camiones.

use std::sync::Arc;

use crate::clients::{FleetApi, FleetApiClient};
use crate::config::environment::EnvironmentConfig;
use crate::services::{ToastService, TruckService};

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub toasts: ToastService,
    pub trucks: TruckService,
}

impl AppState {
    /// Estado con el cliente HTTP real
    pub fn new(config: EnvironmentConfig) -> Result<Self, reqwest::Error> {
        let client = FleetApiClient::new(config.api_base_url.clone())?;
        Ok(Self::with_api(config, Arc::new(client)))
    }

    /// Estado sobre cualquier implementación de la API
    pub fn with_api(config: EnvironmentConfig, api: Arc<dyn FleetApi>) -> Self {
        let toasts = ToastService::new();
        let trucks = TruckService::new(api, toasts.clone());
        Self {
            config,
            toasts,
            trucks,
        }
    }
}
