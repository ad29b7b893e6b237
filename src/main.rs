use dealerdesk::api::router::create_router;
use dealerdesk::config::AppConfig;
use dealerdesk::{db, metrics, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let addr = format!("{}:{}", config.host, config.port);

    tracing::info!("Connecting to database...");
    let pool = db::init_pool(&config.database_url).await?;
    tracing::info!("Database connected");

    let metrics_handle = metrics::init_metrics();

    if config.storage_base_url.is_none() {
        tracing::warn!("STORAGE_BASE_URL not set — document uploads will record local URLs only");
    }
    if config.admin_token.is_none() {
        tracing::warn!("API_TOKEN not set — admin routes are unauthenticated (dev mode)");
    }

    let state = AppState {
        db: pool,
        config,
        metrics_handle,
        http: reqwest::Client::new(),
    };
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {addr}");
    axum::serve(listener, router).await?;

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();
}
