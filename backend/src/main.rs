use backend::{
    config::{self, AppConfig},
    persistence::JsonFile,
    server,
    store::Store,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[rocket::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("🚀 Starting Voting API");

    let figment = config::figment();
    let app_config = AppConfig::from_figment(&figment)?;

    let store = match Store::open(JsonFile::new(&app_config.data_file), app_config.policy()).await {
        Ok(store) => store,
        Err(e) => {
            error!("Refusing to start, vote store could not be loaded: {}", e);
            return Err(e.into());
        }
    };
    let votes = store.len().await;
    info!(
        path = %app_config.data_file.display(),
        votes,
        "📋 Using local storage"
    );

    let rocket = server::build(rocket::custom(figment), store, &app_config)
        .await
        .ignite()
        .await?;
    info!("Voting API running on port {}", rocket.config().port);

    rocket.launch().await?;
    info!("Shutdown complete");
    Ok(())
}
