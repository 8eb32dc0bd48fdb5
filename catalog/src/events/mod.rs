use crate::models::product::Product;
use mediator::Event;

#[derive(Debug, Clone)]
pub struct ProductCreatedEvent(pub Product);
impl Event for ProductCreatedEvent {}
