mod commands;
mod config;
mod endpoints;
mod error;
mod events;
mod models;
mod queries;
mod services;

use crate::config::Config;
use crate::services::product_store::{ProductStore, SharedProductStore};
use actix_web::{middleware, App, HttpServer};
use mediator::DefaultMediator;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    let store: SharedProductStore = Arc::new(ProductStore::new());
    let mediator = create_mediator_service(&store);

    log::info!("Starting server on {}:{}", config.host, config.port);

    let addr = (config.host.clone(), config.port);
    HttpServer::new(move || {
        App::new()
            .wrap(middleware::NormalizePath::trim())
            .wrap(middleware::Logger::default())
            .configure(endpoints::configure(mediator.clone(), config.clone()))
    })
    .bind(addr)?
    .run()
    .await
}

fn create_mediator_service(store: &SharedProductStore) -> DefaultMediator {
    use commands::*;
    use events::*;
    use queries::*;

    DefaultMediator::builder()
        // Requests
        .add_handler(GetProductRequestHandler(store.clone()))
        .add_handler_deferred(|m| CreateProductRequestHandler(store.clone(), m))
        // Events
        .subscribe_fn(|event: ProductCreatedEvent| {
            log::info!("Created: {} - {}", event.0.name, event.0.id);
        })
        .build()
}
