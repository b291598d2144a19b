//! Vista de listado de camiones

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::guarded;
use crate::models::Truck;
use crate::routes::Route;
use crate::services::TruckService;
use crate::utils::errors::{ApiFailure, ViewError, ViewResult};

/// Resultado de una eliminación
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    Deleted,
    Declined,
    Failed(ApiFailure),
    UnknownTruck,
}

pub struct TruckList {
    service: TruckService,
    trucks: Vec<Truck>,
    loading: bool,
    error: Option<ApiFailure>,
    cancel: CancellationToken,
}

impl TruckList {
    pub fn new(service: TruckService) -> Self {
        Self {
            service,
            trucks: Vec::new(),
            loading: false,
            error: None,
            cancel: CancellationToken::new(),
        }
    }

    pub fn trucks(&self) -> &[Truck] {
        &self.trucks
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Error retenido para mostrar el botón de reintento
    pub fn error(&self) -> Option<&ApiFailure> {
        self.error.as_ref()
    }

    pub fn cancellation(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Desmontar la vista: las respuestas tardías se descartan
    pub fn teardown(&self) {
        self.cancel.cancel();
    }

    /// Cargar todos los camiones
    pub async fn load(&mut self) -> ViewResult<()> {
        self.loading = true;
        self.error = None;

        match guarded(&self.cancel, self.service.list_trucks()).await {
            Ok(trucks) => {
                debug!("📋 Loaded {} trucks", trucks.len());
                self.trucks = trucks;
                self.loading = false;
                Ok(())
            }
            Err(ViewError::Api(failure)) => {
                self.error = Some(failure.clone());
                self.loading = false;
                Err(ViewError::Api(failure))
            }
            Err(ViewError::Cancelled) => Err(ViewError::Cancelled),
        }
    }

    pub async fn retry(&mut self) -> ViewResult<()> {
        self.load().await
    }

    /// Texto de confirmación para eliminar un camión
    pub fn delete_prompt(&self, id: i64) -> Option<String> {
        self.find(id).map(|truck| {
            format!(
                "Are you sure you want to delete truck {}?",
                truck.license_plate
            )
        })
    }

    /// Eliminar un camión tras la confirmación explícita del usuario
    ///
    /// Si la API confirma, el camión se quita de la lista local sin recargarla.
    pub async fn delete<F>(&mut self, id: i64, confirm: F) -> ViewResult<DeleteOutcome>
    where
        F: FnOnce(&str) -> bool,
    {
        let Some(prompt) = self.delete_prompt(id) else {
            return Ok(DeleteOutcome::UnknownTruck);
        };
        if !confirm(&prompt) {
            debug!("🚫 Deletion of truck {} declined", id);
            return Ok(DeleteOutcome::Declined);
        }

        match guarded(&self.cancel, self.service.delete_truck(id)).await {
            Ok(()) => {
                self.trucks.retain(|truck| truck.id != id);
                self.service
                    .toasts()
                    .show_success("Success!", "Truck deleted successfully", None);
                info!("🗑️ Truck {} removed from list", id);
                Ok(DeleteOutcome::Deleted)
            }
            Err(ViewError::Api(failure)) => {
                self.error = Some(failure.clone());
                Ok(DeleteOutcome::Failed(failure))
            }
            Err(ViewError::Cancelled) => Err(ViewError::Cancelled),
        }
    }

    pub fn edit_route(&self, truck: &Truck) -> Route {
        Route::EditTruck(truck.id)
    }

    pub fn new_route(&self) -> Route {
        Route::NewTruck
    }

    fn find(&self, id: i64) -> Option<&Truck> {
        self.trucks.iter().find(|truck| truck.id == id)
    }
}
