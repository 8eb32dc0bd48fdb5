/// Provides a default implementation of the `Mediator` trait.
mod mediator_impl;
pub use mediator_impl::*;
