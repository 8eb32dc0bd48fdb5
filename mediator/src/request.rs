/// Represents a request to the mediator.
///
/// `Res` is the type the registered handler answers with.
pub trait Request<Res> {}

/// Handles a request to the mediator.
///
/// Handlers take `&self` so a single instance can serve many threads at
/// once; any mutable state must live behind the handler's own lock.
pub trait RequestHandler<Req, Res>
where
    Req: Request<Res>,
{
    /// Handle a request and returns the response.
    fn handle(&self, req: Req) -> Res;
}
