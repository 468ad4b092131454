//! Countdown Notice - headless widget host
//! 
//! Mounts the banner from a page fixture, runs its countdown and serves
//! an inspection API until shut down.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use countdown_notice::{
    api::create_router,
    config::Config,
    countdown::{Clock, SystemClock},
    dom::DomContract,
    settings::PageConfig,
    state::AppState,
    tasks::countdown_task,
    utils::shutdown_signal,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "countdown_notice={},tower_http=info",
            config.log_level()
        ))
        .init();

    info!("Starting countdown-notice v{}", env!("CARGO_PKG_VERSION"));

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let mut page = PageConfig::load(&config.page)?;
    page.stamp_server_time(clock.now_secs());

    let state = Arc::new(AppState::mount(
        &page,
        DomContract::default(),
        config.host.clone(),
        config.port,
    ));

    // Start the countdown background task
    let task_state = Arc::clone(&state);
    tokio::spawn(async move {
        countdown_task(task_state, clock).await;
    });

    let app = create_router(state);

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;
    
    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /status        - Countdown and transition state");
    info!("  GET  /banner        - Current banner markup");
    info!("  GET  /config        - Widget configuration");
    info!("  POST /admin/preview - Settings form preview");
    info!("  GET  /health        - Health check");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
