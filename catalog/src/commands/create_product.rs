use crate::error::ApiError;
use crate::events::ProductCreatedEvent;
use crate::models::product::Product;
use crate::services::product_store::SharedProductStore;
use anyhow::Context;
use mediator::{DefaultMediator, Mediator, Request, RequestHandler};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProductCommand {
    pub name: String,
    pub price: f64,
    pub quantity: i64,
}

impl CreateProductCommand {
    /// Checks the values that deserialization alone cannot enforce.
    ///
    /// An empty name counts as a missing field; a non-positive price or a
    /// negative quantity is rejected as an out-of-range value.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.name.is_empty() {
            return Err(ApiError::InvalidInput);
        }

        if self.price <= 0.0 || self.quantity < 0 {
            return Err(ApiError::InvalidValues);
        }

        Ok(())
    }
}

impl Request<anyhow::Result<Product>> for CreateProductCommand {}

pub struct CreateProductRequestHandler(pub SharedProductStore, pub DefaultMediator);
impl RequestHandler<CreateProductCommand, anyhow::Result<Product>> for CreateProductRequestHandler {
    fn handle(&self, command: CreateProductCommand) -> anyhow::Result<Product> {
        let product = self
            .0
            .create(command.name, command.price, command.quantity)
            .context("could not store product")?;

        if let Err(err) = self.1.publish(ProductCreatedEvent(product.clone())) {
            log::warn!("Could not publish product {}: {}", product.id, err);
        }

        Ok(product)
    }
}
