//! Formulario de alta/edición de camiones
//!
//! Gestiona el modo (alta o edición), la cascada de listas FIPE
//! marca → modelo → año, la resolución inversa de los nombres guardados a
//! códigos en modo edición, la validación y el envío.
//!
//! En modo edición `loading_inputs` es verdadero desde la construcción hasta
//! que termina la resolución inversa, con éxito o no; mientras tanto el
//! formulario no acepta cambios ni envíos.

use std::collections::HashSet;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use validator::{Validate, ValidationError, ValidationErrors};

use super::guarded;
use crate::dto::{CreateTruckRequest, UpdateTruckRequest};
use crate::models::fipe::find_by_name;
use crate::models::{NamedCode, Truck};
use crate::routes::Route;
use crate::services::{
    brand_name_by_code, model_name_by_code, year_of, year_value_by_code, TruckService,
};
use crate::utils::errors::{ApiFailure, ViewError, ViewResult};
use crate::utils::validation::{
    validate_license_plate, validate_required, validation_message,
};

/// Modo del formulario, fijo durante toda su vida
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: i64 },
}

impl FormMode {
    pub fn from_route(route: &Route) -> Option<Self> {
        match route {
            Route::NewTruck => Some(FormMode::Create),
            Route::EditTruck(id) => Some(FormMode::Edit { id: *id }),
            Route::TruckList => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    LicensePlate,
    Brand,
    Model,
    ManufacturingYear,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::LicensePlate,
        FormField::Brand,
        FormField::Model,
        FormField::ManufacturingYear,
    ];

    /// Nombre del campo en `TruckFormValues`
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::LicensePlate => "license_plate",
            FormField::Brand => "brand",
            FormField::Model => "model",
            FormField::ManufacturingYear => "manufacturing_year",
        }
    }
}

/// Valores actuales del formulario (códigos FIPE, no nombres)
///
/// `license_plate` es `None` en modo edición: el campo no existe.
#[derive(Debug, Clone, Default, Validate)]
pub struct TruckFormValues {
    #[validate(custom = "validate_license_plate")]
    pub license_plate: Option<String>,
    #[validate(custom = "validate_required")]
    pub brand: String,
    #[validate(custom = "validate_required")]
    pub model: String,
    #[validate(custom = "validate_required")]
    pub manufacturing_year: String,
}

/// Resultado de un envío
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Guardado; navegar a `next`
    Saved { truck: Truck, next: Route },
    /// Validación fallida; no hubo llamada a la red
    Invalid,
    /// La API rechazó la petición (ya notificada); se puede reintentar
    Failed(ApiFailure),
    /// Envío en curso o entradas aún cargando
    Busy,
}

pub struct TruckForm {
    service: TruckService,
    mode: FormMode,
    values: TruckFormValues,
    touched: HashSet<FormField>,
    brands: Vec<NamedCode>,
    models: Vec<NamedCode>,
    years: Vec<NamedCode>,
    loading: bool,
    loading_inputs: bool,
    submitting: bool,
    current_truck: Option<Truck>,
    cancel: CancellationToken,
}

impl TruckForm {
    pub fn new(service: TruckService, mode: FormMode) -> Self {
        let (license_plate, loading_inputs) = match mode {
            FormMode::Create => (Some(String::new()), false),
            FormMode::Edit { .. } => (None, true),
        };

        Self {
            service,
            mode,
            values: TruckFormValues {
                license_plate,
                ..TruckFormValues::default()
            },
            touched: HashSet::new(),
            brands: Vec::new(),
            models: Vec::new(),
            years: Vec::new(),
            loading: false,
            loading_inputs,
            submitting: false,
            current_truck: None,
            cancel: CancellationToken::new(),
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn is_edit_mode(&self) -> bool {
        matches!(self.mode, FormMode::Edit { .. })
    }

    pub fn values(&self) -> &TruckFormValues {
        &self.values
    }

    pub fn brands(&self) -> &[NamedCode] {
        &self.brands
    }

    pub fn models(&self) -> &[NamedCode] {
        &self.models
    }

    pub fn years(&self) -> &[NamedCode] {
        &self.years
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_loading_inputs(&self) -> bool {
        self.loading_inputs
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Camión cargado en modo edición (para mostrar la placa)
    pub fn current_truck(&self) -> Option<&Truck> {
        self.current_truck.as_ref()
    }

    pub fn cancellation(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Desmontar la vista: las respuestas tardías se descartan
    pub fn teardown(&self) {
        self.cancel.cancel();
    }

    /// Inicializar: marcas siempre y, en edición, la resolución inversa
    pub async fn init(&mut self) -> ViewResult<()> {
        match guarded(&self.cancel, self.service.list_brands()).await {
            Ok(brands) => self.brands = brands,
            Err(ViewError::Cancelled) => return Err(ViewError::Cancelled),
            Err(ViewError::Api(failure)) => debug!("⚠️ Brands unavailable: {}", failure),
        }

        if let FormMode::Edit { id } = self.mode {
            let resolution = self.resolve_edit_selections(id).await;
            if let Err(ViewError::Cancelled) = resolution {
                return Err(ViewError::Cancelled);
            }
            self.loading_inputs = false;
            if let Err(e) = resolution {
                debug!("⚠️ Edit setup for truck {} stopped early: {}", id, e);
            }
        }

        Ok(())
    }

    /// Traducir marca/modelo/año guardados a los códigos de las listas
    ///
    /// Cada paso sin coincidencia corta la cadena con `Ok(())`; los fallos de
    /// la API se devuelven. En ambos casos los campos más profundos quedan
    /// sin seleccionar.
    async fn resolve_edit_selections(&mut self, id: i64) -> ViewResult<()> {
        self.loading = true;
        let fetched = guarded(&self.cancel, self.service.get_truck(id)).await;
        if !matches!(fetched, Err(ViewError::Cancelled)) {
            self.loading = false;
        }
        let truck = fetched?;
        self.current_truck = Some(truck.clone());

        if self.brands.is_empty() {
            self.brands = guarded(&self.cancel, self.service.list_brands()).await?;
        }

        let Some(brand_code) = find_by_name(&self.brands, &truck.brand).map(|b| b.code.clone()) else {
            warn!("🔍 Brand '{}' not found in FIPE brands", truck.brand);
            return Ok(());
        };
        self.values.brand = brand_code.clone();
        self.models = guarded(&self.cancel, self.service.list_models(&brand_code)).await?;

        let Some(model_code) = find_by_name(&self.models, &truck.model).map(|m| m.code.clone()) else {
            warn!("🔍 Model '{}' not found for brand {}", truck.model, brand_code);
            return Ok(());
        };
        self.values.model = model_code.clone();
        self.years = guarded(
            &self.cancel,
            self.service.list_years(&brand_code, &model_code),
        )
        .await?;

        match self
            .years
            .iter()
            .find(|year| year_of(year) == Some(truck.manufacturing_year))
        {
            Some(year) => self.values.manufacturing_year = year.code.clone(),
            None => warn!(
                "🔍 Year {} not found for model {}",
                truck.manufacturing_year, model_code
            ),
        }

        info!("✏️ Edit form ready for truck {}", truck.license_plate);
        Ok(())
    }

    /// Editar la placa (solo en alta)
    pub fn set_license_plate(&mut self, plate: &str) {
        if let Some(current) = self.values.license_plate.as_mut() {
            *current = plate.trim().to_string();
            self.touched.insert(FormField::LicensePlate);
        }
    }

    /// Cambiar la marca: limpia modelo y año, y carga los modelos
    pub async fn select_brand(&mut self, brand_code: &str) -> ViewResult<()> {
        if self.loading_inputs {
            debug!("⏳ Brand change ignored while inputs are loading");
            return Ok(());
        }

        self.touched.insert(FormField::Brand);
        self.values.brand = brand_code.to_string();
        self.values.model.clear();
        self.values.manufacturing_year.clear();
        self.models.clear();
        self.years.clear();

        if brand_code.is_empty() {
            return Ok(());
        }

        self.models = guarded(&self.cancel, self.service.list_models(brand_code)).await?;
        Ok(())
    }

    /// Cambiar el modelo: limpia el año y carga los años de marca+modelo
    pub async fn select_model(&mut self, model_code: &str) -> ViewResult<()> {
        if self.loading_inputs {
            debug!("⏳ Model change ignored while inputs are loading");
            return Ok(());
        }

        self.touched.insert(FormField::Model);
        self.values.model = model_code.to_string();
        self.values.manufacturing_year.clear();
        self.years.clear();

        if model_code.is_empty() || self.values.brand.is_empty() {
            return Ok(());
        }

        let brand_code = self.values.brand.clone();
        self.years = guarded(
            &self.cancel,
            self.service.list_years(&brand_code, model_code),
        )
        .await?;
        Ok(())
    }

    /// Cambiar el año (sin cascada)
    pub fn select_year(&mut self, year_code: &str) {
        if self.loading_inputs {
            return;
        }
        self.touched.insert(FormField::ManufacturingYear);
        self.values.manufacturing_year = year_code.to_string();
    }

    pub fn is_touched(&self, field: FormField) -> bool {
        self.touched.contains(&field)
    }

    /// Errores de validación actuales, `None` si el formulario es válido
    ///
    /// El año solo se exige: el código viene de la lista FIPE, y su valor
    /// numérico se resuelve al enviar.
    fn validation_errors(&self) -> Option<ValidationErrors> {
        self.values.validate().err()
    }

    fn field_validation_error(&self, field: FormField) -> Option<ValidationError> {
        if field == FormField::LicensePlate && self.values.license_plate.is_none() {
            return None;
        }
        let errors = self.validation_errors()?;
        errors
            .field_errors()
            .get(field.as_str())
            .and_then(|list| list.first())
            .cloned()
    }

    /// Campo inválido y ya tocado por el usuario
    pub fn is_field_invalid(&self, field: FormField) -> bool {
        self.is_touched(field) && self.field_validation_error(field).is_some()
    }

    /// Mensaje de error visible de un campo (vacío si no aplica)
    pub fn field_error(&self, field: FormField) -> String {
        if !self.is_touched(field) {
            return String::new();
        }
        self.field_validation_error(field)
            .map(|error| validation_message(&error))
            .unwrap_or_default()
    }

    pub fn is_valid(&self) -> bool {
        self.validation_errors().is_none()
    }

    fn mark_all_touched(&mut self) {
        for field in FormField::ALL {
            if field == FormField::LicensePlate && self.values.license_plate.is_none() {
                continue;
            }
            self.touched.insert(field);
        }
    }

    /// Enviar el formulario
    pub async fn submit(&mut self) -> ViewResult<SubmitOutcome> {
        if self.submitting || self.loading_inputs {
            return Ok(SubmitOutcome::Busy);
        }

        if !self.is_valid() {
            self.mark_all_touched();
            debug!("📝 Submission rejected by validation");
            return Ok(SubmitOutcome::Invalid);
        }

        let brand = brand_name_by_code(&self.values.brand, &self.brands);
        let model = model_name_by_code(&self.values.model, &self.models);
        let Some(manufacturing_year) =
            year_value_by_code(&self.values.manufacturing_year, &self.years)
        else {
            warn!(
                "📅 Year code '{}' has no numeric year",
                self.values.manufacturing_year
            );
            self.mark_all_touched();
            return Ok(SubmitOutcome::Invalid);
        };

        self.submitting = true;

        let (result, success_message) = match self.mode {
            FormMode::Create => {
                let request = CreateTruckRequest {
                    license_plate: self.values.license_plate.clone().unwrap_or_default(),
                    brand,
                    model,
                    manufacturing_year,
                };
                (
                    guarded(&self.cancel, self.service.create_truck(&request)).await,
                    "Truck created successfully",
                )
            }
            FormMode::Edit { id } => {
                let request = UpdateTruckRequest {
                    brand,
                    model,
                    manufacturing_year,
                };
                (
                    guarded(&self.cancel, self.service.update_truck(id, &request)).await,
                    "Truck updated successfully",
                )
            }
        };

        match result {
            Ok(truck) => {
                self.submitting = false;
                self.service
                    .toasts()
                    .show_success("Success!", success_message, None);
                Ok(SubmitOutcome::Saved {
                    truck,
                    next: Route::TruckList,
                })
            }
            Err(ViewError::Api(failure)) => {
                self.submitting = false;
                Ok(SubmitOutcome::Failed(failure))
            }
            Err(ViewError::Cancelled) => Err(ViewError::Cancelled),
        }
    }

    /// Cancelar: volver al listado
    pub fn cancel(&self) -> Route {
        Route::TruckList
    }
}
