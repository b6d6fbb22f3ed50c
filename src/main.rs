use anyhow::Result;
use mockable::DefaultClock;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};
use dotenvy::dotenv;

use fleet_assignments::config::{database, DatabaseConfig, EnvironmentConfig, StorageBackend};
use fleet_assignments::repositories::{
    DriverAssignmentGateway, InMemoryDriverAssignmentRepository, PgDriverAssignmentRepository,
};
use fleet_assignments::routes::create_app;
use fleet_assignments::services::DriverAssignmentService;
use fleet_assignments::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    info!("🚚 Fleet Assignments - API de asignación de conductores");
    info!("=====================================================");

    let gateway: Arc<dyn DriverAssignmentGateway> = match config.storage_backend {
        StorageBackend::Postgres => {
            let db_config = DatabaseConfig::from_env()?;
            let pool = match db_config.create_pool().await {
                Ok(pool) => pool,
                Err(e) => {
                    error!("❌ Error conectando a la base de datos: {}", e);
                    return Err(anyhow::anyhow!("Error de base de datos: {}", e));
                }
            };
            database::run_migrations(&pool).await?;
            Arc::new(PgDriverAssignmentRepository::new(pool))
        }
        StorageBackend::Memory => {
            info!("🧪 Usando almacenamiento en memoria (los datos no persisten)");
            Arc::new(InMemoryDriverAssignmentRepository::new())
        }
    };

    let service = DriverAssignmentService::new(gateway, Arc::new(DefaultClock));
    let addr: SocketAddr = config.server_url().parse()?;
    let app = create_app(AppState::new(config, service));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET    /health");
    info!("   POST   /api/driver-assignment - Asignar conductor y vehículo");
    info!("   GET    /api/driver-assignment - Listar asignaciones");
    info!("   GET    /api/driver-assignment/:driver_id/:vehicle_id/:travel_date");
    info!("   PUT    /api/driver-assignment/:driver_id/:vehicle_id/:travel_date");
    info!("   DELETE /api/driver-assignment/:driver_id/:vehicle_id/:travel_date");
    info!("   GET    /api/driver/:driver_id/assignments - Historial del conductor");
    info!("   GET    /api/vehicle/:vehicle_id/assignments - Historial del vehículo");
    info!("   GET    /api/management/metrics");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
