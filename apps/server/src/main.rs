use papertrade_server::api::app_router;
use papertrade_server::config::Config;
use papertrade_server::scheduler::spawn_refresh_task;
use papertrade_server::{build_state, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_tracing();
    let state = build_state(&config).await?;
    spawn_refresh_task(state.clone(), config.refresh_interval);
    let router = app_router(state, &config);
    tracing::info!("Listening on {}", config.listen_addr);
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}
