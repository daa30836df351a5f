use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer};
use anyhow::Context;
use tracing::{error, info};

use kidguides::logging::init_logging;
use kidguides::{app_data, configure, AppConfig, AppState};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    init_logging(&config.log_level)?;

    if config.provider.is_none() {
        error!("Missing Supabase environment variables; signup and signed-in pages will fail");
    }

    let bind = (config.host.clone(), config.port);
    let state = app_data(AppState::from_config(config));

    info!("Starting server on {}:{}", bind.0, bind.1);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind(&bind)
    .with_context(|| format!("failed to bind {}:{}", bind.0, bind.1))?
    .run()
    .await?;

    Ok(())
}
