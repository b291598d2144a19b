//! Clients - HTTP Clients for External APIs
//!
//! This module contains the contract of the fleet REST API and its HTTP
//! implementation.

pub mod fleet_api_client;

use async_trait::async_trait;

use crate::dto::{CreateTruckRequest, UpdateTruckRequest};
use crate::models::{NamedCode, Truck};
use crate::utils::errors::ApiResult;

pub use fleet_api_client::FleetApiClient;

/// Contrato de la API de flota: un método por recurso remoto
///
/// Cada llamada hace un único round trip y devuelve el payload decodificado
/// o un `ApiFailure` ya normalizado.
#[async_trait]
pub trait FleetApi: Send + Sync {
    async fn list_trucks(&self) -> ApiResult<Vec<Truck>>;

    async fn get_truck(&self, id: i64) -> ApiResult<Truck>;

    async fn create_truck(&self, request: &CreateTruckRequest) -> ApiResult<Truck>;

    async fn update_truck(&self, id: i64, request: &UpdateTruckRequest) -> ApiResult<Truck>;

    async fn delete_truck(&self, id: i64) -> ApiResult<()>;

    async fn list_brands(&self) -> ApiResult<Vec<NamedCode>>;

    async fn list_models(&self, brand_code: &str) -> ApiResult<Vec<NamedCode>>;

    async fn list_years(&self, brand_code: &str, model_code: &str) -> ApiResult<Vec<NamedCode>>;
}
