pub mod dto;
pub mod routes;

use rocket::{routes, Build, Rocket};
use std::sync::Arc;

use crate::bootstrap::AppState;
use crate::config::Config;
use crate::web::routes::{events, health, providers, request, rpc};

/// HTTP bridge over the injected provider, for harnesses running out of
/// process.
pub fn build_rocket(config: &Config, app_state: Arc<AppState>) -> Rocket<Build> {
    let figment = rocket::Config::figment()
        .merge(("port", config.port))
        .merge(("address", config.bind_address.clone()));

    rocket::custom(figment)
        .manage(app_state)
        .mount("/", routes![request, rpc, providers, events, health])
}
