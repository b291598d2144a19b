pub mod truck_dto;

pub use truck_dto::{CreateTruckRequest, UpdateTruckRequest};
