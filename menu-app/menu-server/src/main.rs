use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::{error, info, warn};

use menu_api::{auth::Authenticator, build_router, state::AppState};
use menu_core::repositories::{CustomerStats, OptionStore};
use menu_core::services::{BadgeResolver, EndpointRegistrar, MenuItemStore, Validator};
use menu_core::RoleTable;
use menu_infrastructure::{HttpCustomerStats, MemoryOptionStore, NoCustomerStats, RedisOptionStore, RouteTable};
use menu_shared::config::{AppConfig, StoreBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize telemetry; the guard flushes the file writer on exit
    let _log_guard = menu_shared::telemetry::init_telemetry(&config.logging);
    info!("Menu Server starting ({})...", config.app.env);

    // Option store
    let options: Arc<dyn OptionStore> = match config.store.backend {
        StoreBackend::Memory => {
            warn!("Using in-memory option store, the menu is lost on restart");
            Arc::new(MemoryOptionStore::new())
        }
        StoreBackend::Redis => {
            info!("Connecting to Redis at {}...", config.redis.url);
            Arc::new(RedisOptionStore::new(&config.redis).context("Failed to create Redis pool")?)
        }
    };

    // Customer statistics for count badges
    let stats: Arc<dyn CustomerStats> = match &config.host.stats_base_url {
        Some(base_url) => Arc::new(
            HttpCustomerStats::new(base_url.clone(), Duration::from_millis(config.host.stats_timeout_ms))
                .context("Failed to create customer stats client")?,
        ),
        None => {
            info!("No statistics endpoint configured, count badges stay hidden");
            Arc::new(NoCustomerStats)
        }
    };

    // Services
    let validator = Arc::new(Validator::new(RoleTable::from_settings(&config.menu.roles))?);
    let store = Arc::new(MenuItemStore::new(options, validator, &config.store.key_prefix));
    let registrar = Arc::new(EndpointRegistrar::new(store.clone()));
    let routes = Arc::new(RouteTable::new());

    // First lifecycle tick makes the stored custom routes live
    registrar.on_activate().await?;
    let report = registrar.on_init(routes.as_ref()).await?;
    info!("{} custom routes live", report.registered);

    let ticker = {
        let registrar = registrar.clone();
        let routes = routes.clone();
        let period = Duration::from_secs(config.host.route_tick_secs.max(1));
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.tick().await;
            loop {
                interval.tick().await;
                if let Err(e) = registrar.on_init(routes.as_ref()).await {
                    error!("Route tick failed: {}", e);
                }
            }
        })
    };

    // Create App State
    let state = AppState {
        store,
        registrar: registrar.clone(),
        badges: Arc::new(BadgeResolver::new(stats)),
        router: routes.clone(),
        auth: Arc::new(Authenticator::from_settings(&config.security)),
    };
    let app = build_router(state);

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    ticker.abort();
    registrar.on_deactivate(routes.as_ref())?;
    info!("Menu Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
