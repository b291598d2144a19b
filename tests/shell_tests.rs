mod common;

use std::sync::Arc;

use common::FakeFleetApi;
use fleet_manager::clients::FleetApi;
use fleet_manager::config::environment::EnvironmentConfig;
use fleet_manager::routes::Route;
use fleet_manager::shell::Shell;
use fleet_manager::state::AppState;

fn state_at(route: Route, api: &Arc<FakeFleetApi>) -> AppState {
    let config = EnvironmentConfig {
        start_route: route,
        ..EnvironmentConfig::default()
    };
    AppState::with_api(config, api.clone() as Arc<dyn FleetApi>)
}

#[tokio::test]
async fn test_lowercase_plate_is_not_submitted() {
    let api = Arc::new(FakeFleetApi::with_catalog());
    let input: &[u8] = b"p bra2e19\nb 1\nm 1\ny 1\ns\nq\n";

    Shell::new(state_at(Route::NewTruck, &api), input)
        .run()
        .await
        .unwrap();

    assert_eq!(api.count_calls("create_truck"), 0);
}

#[tokio::test]
async fn test_valid_plate_is_submitted_as_typed() {
    let api = Arc::new(FakeFleetApi::with_catalog());
    let input: &[u8] = b"p BRA2E19\nb 1\nm 1\ny 1\ns\nq\n";

    Shell::new(state_at(Route::NewTruck, &api), input)
        .run()
        .await
        .unwrap();

    let created = api.created();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].license_plate, "BRA2E19");
    assert_eq!(created[0].brand, "Volvo");
    assert_eq!(created[0].manufacturing_year, 2021);
}
