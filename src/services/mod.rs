//! Services module
//!
//! Este módulo contiene los servicios compartidos por las vistas: el servicio
//! de camiones (gateway con notificación de errores) y el canal de toasts.

pub mod toast_service;
pub mod truck_service;

pub use toast_service::{Toast, ToastKind, ToastService};
pub use truck_service::{
    brand_name_by_code, model_name_by_code, year_of, year_value_by_code, TruckService,
};
