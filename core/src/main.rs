mod catalog;
mod cors;

use actix_web::{
    App, HttpServer,
    web::{self},
};
use common::env_config::Config;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // get env vars
    let config = Config::from_env();
    let config_data = config.clone();
    let origin = config.cors_allowed_origin.clone();

    // init logger
    if config.console_logging_enabled {
        let level = if config.is_production() {
            log::LevelFilter::Info
        } else {
            log::LevelFilter::Debug
        };
        logger::setup(&config.log_file, level).expect("Failed to set up logger");
    }

    // plan catalog is required; a broken one stops startup
    let plans = catalog::load(&config.plan_catalog_path).expect("Failed to load plan catalog");
    if config.stripe.publishable_key.is_empty() {
        log::warn!("STRIPE_PUBLISHABLE_KEY is not set; paid plans cannot be tokenized");
    }

    log::info!(
        "Starting billing server on {}:{}",
        config.server_host,
        config.server_port
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(config_data.clone()))
            .app_data(web::Data::new(plans.clone()))
            .wrap(logger::middleware(config_data.console_logging_enabled)) // 2nd
            .wrap(cors::middleware(&origin)) // 1st
            .service(
                web::scope("/api")
                    .service(api_subs::mount_plans())
                    .service(api_subs::mount_subs()),
            )
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .workers(config.num_workers)
    .run()
    .await
}
