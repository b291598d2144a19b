//! Servicio de camiones
//!
//! Envuelve cualquier implementación de `FleetApi`: cada fallo se registra y
//! se publica como toast de error antes de devolverse, de modo que las vistas
//! no tienen que mostrar errores HTTP por su cuenta. También contiene las
//! funciones puras que traducen códigos FIPE a nombres y años.

use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{error, info};

use crate::clients::FleetApi;
use crate::dto::{CreateTruckRequest, UpdateTruckRequest};
use crate::models::fipe::find_by_code;
use crate::models::{NamedCode, Truck};
use crate::services::toast_service::ToastService;
use crate::utils::errors::{ApiFailure, ApiResult};

lazy_static! {
    static ref YEAR_REGEX: Regex = Regex::new(r"\d{4}").unwrap();
}

const API_ERROR_TITLE: &str = "API Error";

#[derive(Clone)]
pub struct TruckService {
    api: Arc<dyn FleetApi>,
    toasts: ToastService,
}

impl TruckService {
    pub fn new(api: Arc<dyn FleetApi>, toasts: ToastService) -> Self {
        Self { api, toasts }
    }

    pub fn toasts(&self) -> &ToastService {
        &self.toasts
    }

    pub async fn list_trucks(&self) -> ApiResult<Vec<Truck>> {
        let result = self.api.list_trucks().await;
        self.report(result)
    }

    pub async fn get_truck(&self, id: i64) -> ApiResult<Truck> {
        let result = self.api.get_truck(id).await;
        self.report(result)
    }

    pub async fn create_truck(&self, request: &CreateTruckRequest) -> ApiResult<Truck> {
        let result = self.api.create_truck(request).await;
        if let Ok(truck) = &result {
            info!("✅ Truck {} created with id {}", truck.license_plate, truck.id);
        }
        self.report(result)
    }

    pub async fn update_truck(&self, id: i64, request: &UpdateTruckRequest) -> ApiResult<Truck> {
        let result = self.api.update_truck(id, request).await;
        if result.is_ok() {
            info!("✅ Truck {} updated", id);
        }
        self.report(result)
    }

    pub async fn delete_truck(&self, id: i64) -> ApiResult<()> {
        let result = self.api.delete_truck(id).await;
        if result.is_ok() {
            info!("🗑️ Truck {} deleted", id);
        }
        self.report(result)
    }

    pub async fn list_brands(&self) -> ApiResult<Vec<NamedCode>> {
        let result = self.api.list_brands().await;
        self.report(result)
    }

    pub async fn list_models(&self, brand_code: &str) -> ApiResult<Vec<NamedCode>> {
        let result = self.api.list_models(brand_code).await;
        self.report(result)
    }

    pub async fn list_years(&self, brand_code: &str, model_code: &str) -> ApiResult<Vec<NamedCode>> {
        let result = self.api.list_years(brand_code, model_code).await;
        self.report(result)
    }

    /// Registrar y notificar un fallo antes de devolverlo
    fn report<T>(&self, result: ApiResult<T>) -> ApiResult<T> {
        if let Err(failure) = &result {
            self.notify_failure(failure);
        }
        result
    }

    fn notify_failure(&self, failure: &ApiFailure) {
        error!(
            "❌ API error (status {}): {} {}",
            failure.status,
            failure.message,
            failure.details.as_deref().unwrap_or("")
        );
        self.toasts
            .show_error(API_ERROR_TITLE, &failure.message, failure.details.clone());
    }
}

/// Nombre de la marca para un código; el propio código si no está en la lista
pub fn brand_name_by_code(brand_code: &str, brands: &[NamedCode]) -> String {
    name_by_code(brand_code, brands)
}

/// Nombre del modelo para un código; el propio código si no está en la lista
pub fn model_name_by_code(model_code: &str, models: &[NamedCode]) -> String {
    name_by_code(model_code, models)
}

fn name_by_code(code: &str, entries: &[NamedCode]) -> String {
    find_by_code(entries, code)
        .map(|entry| entry.name.clone())
        .unwrap_or_else(|| code.to_string())
}

/// Año de 4 dígitos incluido en el nombre de una entrada FIPE ("2012 gasolina")
pub fn year_of(entry: &NamedCode) -> Option<i32> {
    YEAR_REGEX
        .find(&entry.name)
        .and_then(|found| found.as_str().parse().ok())
}

/// Año numérico de un código de año
///
/// Se extrae del nombre de la entrada; si el código no está en la lista o el
/// nombre no contiene un año, se interpreta el propio código como entero.
pub fn year_value_by_code(year_code: &str, years: &[NamedCode]) -> Option<i32> {
    find_by_code(years, year_code)
        .and_then(year_of)
        .or_else(|| parse_leading_int(year_code))
}

/// Entero formado por los dígitos iniciales ("2020-1" → 2020)
fn parse_leading_int(text: &str) -> Option<i32> {
    let trimmed = text.trim_start();
    let (sign, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse::<i32>().ok().map(|value| sign * value)
}
