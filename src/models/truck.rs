//! Modelo de Truck
//!
//! Copia transitoria del camión tal como la devuelve la API; no hay
//! persistencia del lado del cliente.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Camión de la flota
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Truck {
    pub id: i64,
    pub license_plate: String,
    pub brand: String,
    pub model: String,
    pub manufacturing_year: i32,
    #[serde(default)]
    pub fipe_price: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_camel_case_payload() {
        let json = r#"{"id":7,"licensePlate":"ABC1D23","brand":"Volvo","model":"FH","manufacturingYear":2020,"fipePrice":512345.5}"#;
        let truck: Truck = serde_json::from_str(json).unwrap();

        assert_eq!(truck.id, 7);
        assert_eq!(truck.license_plate, "ABC1D23");
        assert_eq!(truck.manufacturing_year, 2020);
        assert_eq!(truck.fipe_price, Decimal::new(5123455, 1));
    }
}
