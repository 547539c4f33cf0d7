use rocket::launch;
use std::sync::Arc;

use wallet_provider_sim::{bootstrap, config, web};

#[launch]
async fn rocket() -> _ {
    env_logger::init();

    // Load configuration
    let config = config::Config::from_env()
        .expect("Failed to load configuration");

    // Build provider, inject it into the host page
    let app_state = Arc::new(
        bootstrap::AppState::new(&config)
            .expect("Failed to initialize application state")
    );

    log::info!(
        "Mock wallet {} on chain {} forwarding to {}",
        app_state.provider.selected_address(),
        app_state.provider.chain_id(),
        app_state.provider.rpc_url()
    );

    web::build_rocket(&config, app_state)
}
