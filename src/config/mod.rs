//! Configuración del proyecto
//!
//! Este módulo contiene la configuración del cliente leída de variables
//! de entorno.

pub mod environment;

pub use environment::*;
