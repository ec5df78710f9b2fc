use actix_web::{middleware::Logger, web, App, HttpServer};
use config::Config;
use dotenv::dotenv;
use handlers::AppState;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod handlers;
mod providers;
mod security;
#[cfg(test)]
mod testing;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let app_state = web::Data::new(AppState::from_config(&config));

    if app_state.sms.is_none() {
        warn!("Twilio credentials missing, /api/send-sms will answer 400");
    }
    if app_state.email.is_none() {
        warn!("SENDGRID_API_KEY missing, /api/send-email will answer 400");
    }

    let address = config.server_address();
    let allowed_origins = config.allowed_origins.clone();

    info!("Starting relay server on http://{}", address);
    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(Logger::default())
            .wrap(security::configure_cors(&allowed_origins))
            .configure(handlers::routes)
    })
    .bind(address)?
    .run()
    .await?;

    Ok(())
}
