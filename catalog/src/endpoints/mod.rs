pub mod api_spec;
pub mod products;

use crate::config::Config;
use actix_web::web::{self, Data};
use mediator::DefaultMediator;

/// Registers the shared state and every route of the service.
pub fn configure(mediator: DefaultMediator, config: Config) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(Data::new(mediator))
            .app_data(Data::new(config))
            .app_data(products::json_config())
            .service(products::create)
            .service(products::get)
            .service(api_spec::api_spec);
    }
}
