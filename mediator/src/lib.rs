//! # mediator
//! Routes requests and events to the handlers registered for their type.
//!
//! Handlers are registered once through a [Builder] and the resulting
//! [DefaultMediator] is cheap to clone and safe to share between threads,
//! so a web server can hand the same instance to every worker.
//!
//! ## Example
//! ```rust
//! use std::sync::atomic::{AtomicU64, Ordering};
//! use std::sync::Arc;
//! use mediator::{DefaultMediator, Event, Mediator, Request, RequestHandler};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Ticket(u64);
//!
//! #[derive(Clone)]
//! struct TicketIssuedEvent(Ticket);
//! impl Event for TicketIssuedEvent {}
//!
//! struct IssueTicketCommand;
//! impl Request<Ticket> for IssueTicketCommand {}
//!
//! struct IssueTicketHandler(Arc<AtomicU64>, DefaultMediator);
//! impl RequestHandler<IssueTicketCommand, Ticket> for IssueTicketHandler {
//!     fn handle(&self, _: IssueTicketCommand) -> Ticket {
//!         let ticket = Ticket(self.0.fetch_add(1, Ordering::SeqCst));
//!         self.1.publish(TicketIssuedEvent(ticket.clone())).ok();
//!         ticket
//!     }
//! }
//!
//! let counter = Arc::new(AtomicU64::new(1));
//! let mediator = DefaultMediator::builder()
//!     .add_handler_deferred(|m| IssueTicketHandler(counter.clone(), m))
//!     .subscribe_fn(|event: TicketIssuedEvent| {
//!         println!("Issued: {:?}", event.0);
//!     })
//!     .build();
//!
//! assert_eq!(Ok(Ticket(1)), mediator.send(IssueTicketCommand));
//! assert_eq!(Ok(Ticket(2)), mediator.send(IssueTicketCommand));
//! ```

/// A convenient result type.
pub type Result<T> = std::result::Result<T, error::Error>;

/// Module for the mediator request-response.
mod request;
pub use request::*;

/// Module for the mediator events.
mod event;
pub use event::*;

/// Module for the errors.
mod error;
pub use error::*;

/// Module for the mediator.
mod mediator;
pub use crate::mediator::*;

/// Provides default implementations.
#[cfg(feature = "impls")]
mod impls;

#[cfg(feature = "impls")]
pub use impls::*;
