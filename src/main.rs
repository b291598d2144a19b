use anyhow::Result;
use dotenvy::dotenv;
use tokio::io::BufReader;
use tracing::info;

use fleet_manager::config::environment::EnvironmentConfig;
use fleet_manager::shell::Shell;
use fleet_manager::state::AppState;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();
    let config = EnvironmentConfig::from_env()?;

    // Configurar logging (stderr, para no mezclarse con las vistas)
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_writer(std::io::stderr)
        .init();

    info!("🚚 Fleet Manager - FIPE truck registry");
    info!("🌐 API base URL: {}", config.api_base_url);

    let state = AppState::new(config)?;
    let shell = Shell::new(state, BufReader::new(tokio::io::stdin()));
    shell.run().await?;

    info!("👋 Fleet Manager terminado");
    Ok(())
}
