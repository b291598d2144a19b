//! Rutas navegables del front end
//!
//! `/trucks` (listado), `/trucks/new` (alta) y `/trucks/{id}/edit` (edición);
//! cualquier otra ruta redirige al listado.

use std::fmt;

/// Vista destino de la navegación
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Route {
    #[default]
    TruckList,
    NewTruck,
    EditTruck(i64),
}

impl Route {
    /// Interpretar un path; lo que no coincide redirige a `/trucks`
    pub fn parse(path: &str) -> Self {
        let segments: Vec<&str> = path
            .trim()
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        match segments.as_slice() {
            ["trucks"] => Route::TruckList,
            ["trucks", "new"] => Route::NewTruck,
            ["trucks", id, "edit"] => match id.parse::<i64>() {
                Ok(id) => Route::EditTruck(id),
                Err(_) => {
                    tracing::debug!("🔀 Invalid truck id in path '{}', redirecting", path);
                    Route::TruckList
                }
            },
            _ => {
                if !segments.is_empty() {
                    tracing::debug!("🔀 Unmatched path '{}', redirecting to /trucks", path);
                }
                Route::TruckList
            }
        }
    }

    /// Path canónico de la ruta
    pub fn path(&self) -> String {
        match self {
            Route::TruckList => "/trucks".to_string(),
            Route::NewTruck => "/trucks/new".to_string(),
            Route::EditTruck(id) => format!("/trucks/{}/edit", id),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_routes() {
        assert_eq!(Route::parse("/trucks"), Route::TruckList);
        assert_eq!(Route::parse("/trucks/new"), Route::NewTruck);
        assert_eq!(Route::parse("/trucks/42/edit"), Route::EditTruck(42));
        assert_eq!(Route::parse("/trucks/42/edit/"), Route::EditTruck(42));
    }

    #[test]
    fn test_root_and_unknown_redirect_to_list() {
        assert_eq!(Route::parse(""), Route::TruckList);
        assert_eq!(Route::parse("/"), Route::TruckList);
        assert_eq!(Route::parse("/drivers"), Route::TruckList);
        assert_eq!(Route::parse("/trucks/abc/edit"), Route::TruckList);
    }

    #[test]
    fn test_path_round_trip() {
        for route in [Route::TruckList, Route::NewTruck, Route::EditTruck(7)] {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }
}
