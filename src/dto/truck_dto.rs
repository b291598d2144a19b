use serde::{Deserialize, Serialize};

// Request para crear un camión
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateTruckRequest {
    pub license_plate: String,
    pub brand: String,
    pub model: String,
    pub manufacturing_year: i32,
}

// Request para actualizar un camión (la placa no se envía nunca)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTruckRequest {
    pub brand: String,
    pub model: String,
    pub manufacturing_year: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_has_no_plate() {
        let body = serde_json::to_value(UpdateTruckRequest {
            brand: "Volvo".to_string(),
            model: "FH".to_string(),
            manufacturing_year: 2020,
        })
        .unwrap();

        assert!(body.get("licensePlate").is_none());
        assert_eq!(body["manufacturingYear"], 2020);
    }
}
