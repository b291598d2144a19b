//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que devuelve la API de flota.

pub mod api_error;
pub mod fipe;
pub mod truck;

pub use api_error::{ApiError, FieldValidationError};
pub use fipe::NamedCode;
pub use truck::Truck;
