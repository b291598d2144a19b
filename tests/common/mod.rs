//! API de flota en memoria para los tests de las vistas
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;

use fleet_manager::clients::FleetApi;
use fleet_manager::dto::{CreateTruckRequest, UpdateTruckRequest};
use fleet_manager::models::{NamedCode, Truck};
use fleet_manager::services::{ToastService, TruckService};
use fleet_manager::utils::errors::{ApiFailure, ApiResult};

#[derive(Default)]
pub struct FakeFleetApi {
    trucks: Mutex<Vec<Truck>>,
    brands: Vec<NamedCode>,
    models: HashMap<String, Vec<NamedCode>>,
    years: HashMap<(String, String), Vec<NamedCode>>,
    failing: Mutex<HashSet<&'static str>>,
    calls: Mutex<Vec<String>>,
    created: Mutex<Vec<CreateTruckRequest>>,
    updated: Mutex<Vec<(i64, UpdateTruckRequest)>>,
    delay: Option<Duration>,
}

impl FakeFleetApi {
    /// Catálogo FIPE con Volvo/FH/2020 y Scania/R 450
    pub fn with_catalog() -> Self {
        let mut models = HashMap::new();
        models.insert(
            "59".to_string(),
            vec![NamedCode::new("5913", "FH"), NamedCode::new("5920", "VM 270")],
        );
        models.insert("102".to_string(), vec![NamedCode::new("10210", "R 450")]);

        let mut years = HashMap::new();
        years.insert(
            ("59".to_string(), "5913".to_string()),
            vec![
                NamedCode::new("2021-3", "2021 Diesel"),
                NamedCode::new("2020-1", "2020 Diesel"),
            ],
        );
        years.insert(
            ("102".to_string(), "10210".to_string()),
            vec![NamedCode::new("2019-3", "2019 Diesel")],
        );

        Self {
            brands: vec![NamedCode::new("59", "Volvo"), NamedCode::new("102", "Scania")],
            models,
            years,
            ..Self::default()
        }
    }

    pub fn with_trucks(self, trucks: Vec<Truck>) -> Self {
        *self.trucks.lock().unwrap() = trucks;
        self
    }

    /// Reemplazar los años FIPE de una marca+modelo
    pub fn with_years(mut self, brand: &str, model: &str, years: Vec<NamedCode>) -> Self {
        self.years
            .insert((brand.to_string(), model.to_string()), years);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn fail(&self, operation: &'static str) {
        self.failing.lock().unwrap().insert(operation);
    }

    pub fn recover(&self, operation: &'static str) {
        self.failing.lock().unwrap().remove(operation);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count_calls(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|call| call.starts_with(prefix)).count()
    }

    pub fn created(&self) -> Vec<CreateTruckRequest> {
        self.created.lock().unwrap().clone()
    }

    pub fn updated(&self) -> Vec<(i64, UpdateTruckRequest)> {
        self.updated.lock().unwrap().clone()
    }

    async fn enter(&self, operation: &'static str, call: String) -> ApiResult<()> {
        self.calls.lock().unwrap().push(call);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing.lock().unwrap().contains(operation) {
            return Err(ApiFailure {
                message: "Error 500: Internal Server Error".to_string(),
                details: None,
                status: 500,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl FleetApi for FakeFleetApi {
    async fn list_trucks(&self) -> ApiResult<Vec<Truck>> {
        self.enter("list_trucks", "list_trucks".to_string()).await?;
        Ok(self.trucks.lock().unwrap().clone())
    }

    async fn get_truck(&self, id: i64) -> ApiResult<Truck> {
        self.enter("get_truck", format!("get_truck:{}", id)).await?;
        self.trucks
            .lock()
            .unwrap()
            .iter()
            .find(|truck| truck.id == id)
            .cloned()
            .ok_or_else(|| ApiFailure {
                message: "Truck not found".to_string(),
                details: None,
                status: 404,
            })
    }

    async fn create_truck(&self, request: &CreateTruckRequest) -> ApiResult<Truck> {
        self.enter("create_truck", "create_truck".to_string()).await?;
        self.created.lock().unwrap().push(request.clone());
        let mut trucks = self.trucks.lock().unwrap();
        let truck = Truck {
            id: trucks.iter().map(|t| t.id).max().unwrap_or(0) + 1,
            license_plate: request.license_plate.clone(),
            brand: request.brand.clone(),
            model: request.model.clone(),
            manufacturing_year: request.manufacturing_year,
            fipe_price: Decimal::new(45000000, 2),
        };
        trucks.push(truck.clone());
        Ok(truck)
    }

    async fn update_truck(&self, id: i64, request: &UpdateTruckRequest) -> ApiResult<Truck> {
        self.enter("update_truck", format!("update_truck:{}", id)).await?;
        self.updated.lock().unwrap().push((id, request.clone()));
        let mut trucks = self.trucks.lock().unwrap();
        let truck = trucks
            .iter_mut()
            .find(|truck| truck.id == id)
            .ok_or_else(|| ApiFailure {
                message: "Truck not found".to_string(),
                details: None,
                status: 404,
            })?;
        truck.brand = request.brand.clone();
        truck.model = request.model.clone();
        truck.manufacturing_year = request.manufacturing_year;
        Ok(truck.clone())
    }

    async fn delete_truck(&self, id: i64) -> ApiResult<()> {
        self.enter("delete_truck", format!("delete_truck:{}", id)).await?;
        self.trucks.lock().unwrap().retain(|truck| truck.id != id);
        Ok(())
    }

    async fn list_brands(&self) -> ApiResult<Vec<NamedCode>> {
        self.enter("list_brands", "list_brands".to_string()).await?;
        Ok(self.brands.clone())
    }

    async fn list_models(&self, brand_code: &str) -> ApiResult<Vec<NamedCode>> {
        self.enter("list_models", format!("list_models:{}", brand_code))
            .await?;
        Ok(self.models.get(brand_code).cloned().unwrap_or_default())
    }

    async fn list_years(&self, brand_code: &str, model_code: &str) -> ApiResult<Vec<NamedCode>> {
        self.enter("list_years", format!("list_years:{}/{}", brand_code, model_code))
            .await?;
        Ok(self
            .years
            .get(&(brand_code.to_string(), model_code.to_string()))
            .cloned()
            .unwrap_or_default())
    }
}

pub fn truck(id: i64, plate: &str, brand: &str, model: &str, year: i32) -> Truck {
    Truck {
        id,
        license_plate: plate.to_string(),
        brand: brand.to_string(),
        model: model.to_string(),
        manufacturing_year: year,
        fipe_price: Decimal::new(51234550, 2),
    }
}

/// Servicio de camiones sobre la API falsa, con su canal de toasts
pub fn service_over(api: &Arc<FakeFleetApi>) -> (TruckService, ToastService) {
    let toasts = ToastService::new();
    let service = TruckService::new(api.clone() as Arc<dyn FleetApi>, toasts.clone());
    (service, toasts)
}
