use std::sync::Arc;

use plan_limits::{config::Config, create_app, database::Database, handlers::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "plan_limits=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        "Plans: basic={:?}, premium={:?}",
        config.basic_plan,
        config.premium_plan
    );

    let database = Database::new(&config.database_url, config.database_max_connections).await?;
    database.migrate().await?;

    let state = AppState::new(Arc::new(database), config.plans());
    let app = create_app(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("plan-limits listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
