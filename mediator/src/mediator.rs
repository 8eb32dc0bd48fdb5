use crate::request::Request;
use crate::Event;

/// A mediator is a central hub for communication between components.
pub trait Mediator {
    /// Sends a request to the handler registered for its type.
    fn send<Req, Res>(&self, req: Req) -> crate::Result<Res>
    where
        Res: Send + 'static,
        Req: Request<Res> + Send + 'static;

    /// Publish an event to every subscriber of its type.
    fn publish<E>(&self, event: E) -> crate::Result<()>
    where
        E: Event + 'static;
}
