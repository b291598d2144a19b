//! Cuerpo de error de la API REST
//!
//! Todos los campos son opcionales al decodificar: solo `message`,
//! `details` y `validationErrors` influyen en el comportamiento.

use serde::{Deserialize, Serialize};

/// Error de validación por campo reportado por el servidor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
    #[serde(default)]
    pub rejected_value: serde_json::Value,
}

/// Error estructurado devuelto por la API
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiError {
    pub code: Option<String>,
    pub message: Option<String>,
    pub details: Option<String>,
    pub timestamp: Option<String>,
    pub path: Option<String>,
    pub validation_errors: Option<Vec<FieldValidationError>>,
}
