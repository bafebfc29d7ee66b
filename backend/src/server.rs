use std::sync::Arc;
use rocket::fairing::AdHoc;
use rocket::{Build, Rocket, catchers, routes};
use tracing::{error, info};
use crate::{
    catchers::{bad_request, internal_error, not_found, unprocessable},
    config::AppConfig,
    cors::CORS,
    metrics::{HttpMetrics, Metrics},
    request_log::RequestLog,
    routes::*,
    store::Store,
};

/// Mounts the API, the UI and the fairings on `rocket`, handing it the store.
pub async fn build(rocket: Rocket<Build>, store: Store, config: &AppConfig) -> Rocket<Build> {
    let metrics = Arc::new(Metrics::new());
    let app_state = AppState::new(store, metrics.clone(), config.missing_vote);
    app_state.refresh_gauges().await;

    rocket
        .attach(CORS)
        .attach(RequestLog)
        .attach(HttpMetrics::new(metrics))
        .attach(AdHoc::on_shutdown("Flush vote store", |rocket| Box::pin(async move {
            let Some(state) = rocket.state::<AppState>() else { return };
            match state.store.flush().await {
                Ok(()) => info!("💾 Vote store flushed"),
                Err(e) => error!("Failed to flush vote store on shutdown: {}", e),
            }
        })))
        .manage(app_state)
        .manage(StaticDir(config.static_dir.clone()))
        .mount(
            "/",
            routes![
                index,
                health,
                prometheus_metrics,
                list_votes,
                create_vote,
                get_vote,
                update_vote,
                delete_vote,
                all_options,
                ui
            ],
        )
        .register(
            "/",
            catchers![
                bad_request,
                not_found,
                unprocessable,
                internal_error
            ],
        )
}
