//! Sistema de manejo de errores
//!
//! Este módulo define los errores que ven las vistas: el fallo normalizado
//! de la API REST y el error de una operación de vista (fallo o cancelación).

use http::StatusCode;
use thiserror::Error;

use crate::models::api_error::ApiError;

/// Fallo normalizado de una llamada a la API
///
/// `status` es el código HTTP de la respuesta, o `0` cuando no hubo
/// respuesta (fallo de transporte).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ApiFailure {
    pub message: String,
    pub details: Option<String>,
    pub status: u16,
}

/// Errores de las operaciones de vista
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    #[error("API error: {0}")]
    Api(#[from] ApiFailure),

    #[error("View was torn down before the response arrived")]
    Cancelled,
}

/// Resultado tipado para llamadas a la API
pub type ApiResult<T> = Result<T, ApiFailure>;

/// Resultado tipado para operaciones de vista
pub type ViewResult<T> = Result<T, ViewError>;

impl ApiFailure {
    /// Fallo sin respuesta del servidor
    pub fn transport(error: impl std::fmt::Display) -> Self {
        Self {
            message: format!("Error: {}", error),
            details: None,
            status: 0,
        }
    }

    /// Respuesta 2xx cuyo cuerpo no se pudo decodificar
    pub fn undecodable(status: StatusCode, error: impl std::fmt::Display) -> Self {
        Self {
            message: format!("Error: {}", error),
            details: None,
            status: status.as_u16(),
        }
    }

    /// Normalizar una respuesta de error del servidor
    ///
    /// Si el cuerpo es un objeto JSON se interpreta como `ApiError`; el primer
    /// error de validación, si existe, tiene prioridad sobre el mensaje general.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let fallback = status_message(status);

        let api_error = match serde_json::from_str::<serde_json::Value>(body) {
            Ok(value @ serde_json::Value::Object(_)) => serde_json::from_value::<ApiError>(value).ok(),
            _ => None,
        };

        let Some(api_error) = api_error else {
            return Self {
                message: fallback,
                details: None,
                status: status.as_u16(),
            };
        };

        if let Some(first) = api_error.validation_errors.as_ref().and_then(|errors| errors.first()) {
            return Self {
                message: format!("Validation error: {}", first.message),
                details: Some(format!("Field: {}", first.field)),
                status: status.as_u16(),
            };
        }

        Self {
            message: api_error.message.unwrap_or(fallback),
            details: api_error.details,
            status: status.as_u16(),
        }
    }

    pub fn is_transport(&self) -> bool {
        self.status == 0
    }
}

/// Mensaje genérico "Error {código}: {texto}"
fn status_message(status: StatusCode) -> String {
    format!(
        "Error {}: {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_error_uses_message_and_details() {
        let body = r#"{"code":"NOT_FOUND","message":"Truck not found","details":"id 9","timestamp":"2024-01-01T00:00:00","path":"/api/v1/trucks/9"}"#;
        let failure = ApiFailure::from_response(StatusCode::NOT_FOUND, body);

        assert_eq!(failure.message, "Truck not found");
        assert_eq!(failure.details.as_deref(), Some("id 9"));
        assert_eq!(failure.status, 404);
    }

    #[test]
    fn test_first_validation_error_wins() {
        let body = r#"{
            "code": "VALIDATION_ERROR",
            "message": "Invalid request",
            "details": "ignored",
            "validationErrors": [
                {"field": "licensePlate", "message": "already registered", "rejectedValue": "ABC1D23"},
                {"field": "brand", "message": "must not be blank", "rejectedValue": ""}
            ]
        }"#;
        let failure = ApiFailure::from_response(StatusCode::BAD_REQUEST, body);

        assert_eq!(failure.message, "Validation error: already registered");
        assert_eq!(failure.details.as_deref(), Some("Field: licensePlate"));
    }

    #[test]
    fn test_object_without_message_falls_back_to_status() {
        let failure = ApiFailure::from_response(StatusCode::CONFLICT, r#"{"code":"X"}"#);
        assert_eq!(failure.message, "Error 409: Conflict");
        assert!(failure.details.is_none());
    }

    #[test]
    fn test_non_json_body_falls_back_to_status() {
        let failure = ApiFailure::from_response(StatusCode::BAD_GATEWAY, "<html>upstream</html>");
        assert_eq!(failure.message, "Error 502: Bad Gateway");
        assert_eq!(failure.status, 502);
    }

    #[test]
    fn test_transport_failure_has_no_status() {
        let failure = ApiFailure::transport("connection refused");
        assert_eq!(failure.message, "Error: connection refused");
        assert!(failure.is_transport());
        assert!(failure.details.is_none());
    }
}
