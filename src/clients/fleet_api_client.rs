//! Cliente HTTP para la API de flota
//!
//! Este módulo contiene el cliente reqwest de los endpoints de camiones y de
//! la tabla de referencia FIPE, y la normalización de sus fallos.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::FleetApi;
use crate::dto::{CreateTruckRequest, UpdateTruckRequest};
use crate::models::{NamedCode, Truck};
use crate::utils::errors::{ApiFailure, ApiResult};

/// Cliente HTTP para la API REST de flota
#[derive(Clone)]
pub struct FleetApiClient {
    pub client: Client,
    pub base_url: String,
}

impl FleetApiClient {
    /// Crear nuevo cliente HTTP con URL base configurable
    ///
    /// Sin timeout explícito: se usa el comportamiento por defecto del transporte.
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Ejecutar la petición y decodificar el cuerpo JSON
    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = self.send(request).await?;
        let status = response.status();
        response.json::<T>().await.map_err(|e| {
            warn!("⚠️ Undecodable response body ({}): {}", status, e);
            ApiFailure::undecodable(status, e)
        })
    }

    /// Ejecutar la petición y comprobar solo el estado
    async fn send(&self, request: RequestBuilder) -> ApiResult<reqwest::Response> {
        let response = request.send().await.map_err(|e| {
            warn!("🌐 Transport failure: {}", e);
            ApiFailure::transport(e)
        })?;

        let status = response.status();
        debug!("📡 {} {}", status, response.url());

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiFailure::from_response(status, &body));
        }

        Ok(response)
    }
}

#[async_trait]
impl FleetApi for FleetApiClient {
    async fn list_trucks(&self) -> ApiResult<Vec<Truck>> {
        self.fetch(self.client.get(self.url("/trucks"))).await
    }

    async fn get_truck(&self, id: i64) -> ApiResult<Truck> {
        self.fetch(self.client.get(self.url(&format!("/trucks/{}", id)))).await
    }

    async fn create_truck(&self, request: &CreateTruckRequest) -> ApiResult<Truck> {
        self.fetch(self.client.post(self.url("/trucks")).json(request)).await
    }

    async fn update_truck(&self, id: i64, request: &UpdateTruckRequest) -> ApiResult<Truck> {
        self.fetch(self.client.put(self.url(&format!("/trucks/{}", id))).json(request))
            .await
    }

    async fn delete_truck(&self, id: i64) -> ApiResult<()> {
        self.send(self.client.delete(self.url(&format!("/trucks/{}", id))))
            .await
            .map(|_| ())
    }

    async fn list_brands(&self) -> ApiResult<Vec<NamedCode>> {
        self.fetch(self.client.get(self.url("/fipe/brands"))).await
    }

    async fn list_models(&self, brand_code: &str) -> ApiResult<Vec<NamedCode>> {
        let path = format!("/fipe/brands/{}/models", urlencoding::encode(brand_code));
        self.fetch(self.client.get(self.url(&path))).await
    }

    async fn list_years(&self, brand_code: &str, model_code: &str) -> ApiResult<Vec<NamedCode>> {
        let path = format!(
            "/fipe/brands/{}/models/{}/years",
            urlencoding::encode(brand_code),
            urlencoding::encode(model_code)
        );
        self.fetch(self.client.get(self.url(&path))).await
    }
}
