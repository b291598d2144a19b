//! Utilidades de validación
//!
//! Este módulo contiene las reglas de validación del formulario de camiones
//! y la conversión de errores de validación a mensajes para el usuario.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// 3 letras mayúsculas + 1 dígito + 1 alfanumérico + 2 dígitos
    pub static ref LICENSE_PLATE_REGEX: Regex =
        Regex::new(r"^[A-Z]{3}[0-9][0-9A-Z][0-9]{2}$").unwrap();
}

/// Validar que un campo obligatorio no esté vacío
pub fn validate_required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

/// Validar formato de placa de camión
///
/// Un valor vacío se reporta como `required`, no como formato inválido.
pub fn validate_license_plate(value: &str) -> Result<(), ValidationError> {
    validate_required(value)?;
    if !LICENSE_PLATE_REGEX.is_match(value) {
        let mut error = ValidationError::new("pattern");
        error.add_param("pattern".into(), &LICENSE_PLATE_REGEX.as_str());
        return Err(error);
    }
    Ok(())
}

/// Validar un valor mínimo
pub fn validate_min(value: i64, min: i64) -> Result<(), ValidationError> {
    if value < min {
        let mut error = ValidationError::new("min");
        error.add_param("min".into(), &min);
        error.add_param("actual".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar un valor máximo
pub fn validate_max(value: i64, max: i64) -> Result<(), ValidationError> {
    if value > max {
        let mut error = ValidationError::new("max");
        error.add_param("max".into(), &max);
        error.add_param("actual".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Mensaje para el usuario a partir de un error de validación
pub fn validation_message(error: &ValidationError) -> String {
    match error.code.as_ref() {
        "required" => "Required field".to_string(),
        "pattern" => "Invalid format".to_string(),
        "min" => format!("Minimum value: {}", param_text(error, "min")),
        "max" => format!("Maximum value: {}", param_text(error, "max")),
        other => format!("Invalid value ({})", other),
    }
}

fn param_text(error: &ValidationError, name: &str) -> String {
    match error.params.get(name) {
        Some(serde_json::Value::String(text)) => text.clone(),
        Some(value) => value.to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_license_plate() {
        for plate in ["ABC1D23", "ABC1234", "XYZ9Z99", "QWE0A00"] {
            assert!(validate_license_plate(plate).is_ok(), "{} should be valid", plate);
        }
    }

    #[test]
    fn test_invalid_license_plates_report_pattern() {
        for plate in ["abc1d23", "ABC1D2", "ABC1D234", "AB12D23", "ABCDD23", "ABC1D2X", "ABC-1D23", "ABC1d23"] {
            let error = validate_license_plate(plate).unwrap_err();
            assert_eq!(error.code, "pattern", "{} should fail with pattern", plate);
            assert_eq!(validation_message(&error), "Invalid format");
        }
    }

    #[test]
    fn test_empty_license_plate_is_required() {
        let error = validate_license_plate("").unwrap_err();
        assert_eq!(error.code, "required");
        assert_eq!(validation_message(&error), "Required field");
    }

    #[test]
    fn test_validate_required() {
        assert!(validate_required("59").is_ok());
        assert!(validate_required("").is_err());
        assert!(validate_required("   ").is_err());
    }

    #[test]
    fn test_range_messages() {
        let min_error = validate_min(1800, 1900).unwrap_err();
        assert_eq!(validation_message(&min_error), "Minimum value: 1900");

        let max_error = validate_max(2200, 2100).unwrap_err();
        assert_eq!(validation_message(&max_error), "Maximum value: 2100");

        assert!(validate_min(1950, 1900).is_ok());
        assert!(validate_max(2024, 2100).is_ok());
    }
}
