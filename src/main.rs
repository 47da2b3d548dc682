use std::sync::Arc;

use actix_web::{App, HttpServer, middleware, web};

use suggestion_portal::config::AppConfig;
use suggestion_portal::gateway::HttpGateway;
use suggestion_portal::state::PortalState;
use suggestion_portal::{handlers, session};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let config = AppConfig::from_env();
    let gateway = HttpGateway::new(&config).map_err(std::io::Error::other)?;
    let secret_key = config.cookie_key();
    let bind_addr = config.bind_addr.clone();

    let state = web::Data::new(PortalState::new(config, Arc::new(gateway)));

    // Initial load. A failure leaves the list empty; Refresh retries.
    if let Err(e) = state.refresh().await {
        log::error!("Failed to fetch project suggestions: {e}");
    }

    log::info!("Starting server at http://{bind_addr}");

    HttpServer::new(move || {
        App::new()
            .wrap(session::middleware(secret_key.clone()))
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(handlers::configure)
    })
    .bind(&bind_addr)?
    .run()
    .await
}
