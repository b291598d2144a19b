//! Fleet Manager
//!
//! Front end de terminal para la gestión de una flota de camiones sobre la
//! API REST de flota y su tabla de referencia FIPE.

pub mod clients;
pub mod config;
pub mod dto;
pub mod models;
pub mod routes;
pub mod services;
pub mod shell;
pub mod state;
pub mod utils;
pub mod views;
