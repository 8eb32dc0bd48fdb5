use crate::error::{Error, ErrorKind};
use crate::{Event, EventHandler, Mediator, Request, RequestHandler};
use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

type BoxedAny = Box<dyn Any + Send>;
type HandlerTable<H> = Arc<RwLock<HashMap<TypeId, H>>>;

// Requests and responses cross the table as `Any`; the wrapper restores the concrete types.
#[derive(Clone)]
struct RequestHandlerWrapper {
    #[allow(clippy::type_complexity)]
    handler: Arc<dyn Fn(BoxedAny) -> Option<BoxedAny> + Send + Sync>,
}

impl RequestHandlerWrapper {
    fn new<Req, Res, H>(handler: H) -> Self
    where
        Res: Send + 'static,
        Req: Request<Res> + Send + 'static,
        H: RequestHandler<Req, Res> + Send + Sync + 'static,
    {
        Self::from_fn(move |req: Req| handler.handle(req))
    }

    fn from_fn<Req, Res, F>(handler: F) -> Self
    where
        Res: Send + 'static,
        Req: Request<Res> + Send + 'static,
        F: Fn(Req) -> Res + Send + Sync + 'static,
    {
        let f = move |req: BoxedAny| -> Option<BoxedAny> {
            let req = req.downcast::<Req>().ok()?;
            Some(Box::new(handler(*req)) as BoxedAny)
        };

        RequestHandlerWrapper {
            handler: Arc::new(f),
        }
    }

    fn handle<Req, Res>(&self, req: Req) -> crate::Result<Res>
    where
        Res: Send + 'static,
        Req: Request<Res> + Send + 'static,
    {
        let res = (self.handler)(Box::new(req))
            .ok_or_else(|| Error::new(ErrorKind::Mismatch, type_name::<Req>()))?;

        res.downcast::<Res>()
            .map(|res| *res)
            .map_err(|_| Error::new(ErrorKind::Mismatch, type_name::<Res>()))
    }
}

#[derive(Clone)]
struct EventHandlerWrapper {
    #[allow(clippy::type_complexity)]
    handler: Arc<dyn Fn(&dyn Any) + Send + Sync>,
}

impl EventHandlerWrapper {
    fn new<E, H>(handler: H) -> Self
    where
        E: Event + 'static,
        H: EventHandler<E> + Send + Sync + 'static,
    {
        Self::from_fn(move |event: E| handler.handle(event))
    }

    fn from_fn<E, F>(handler: F) -> Self
    where
        E: Event + 'static,
        F: Fn(E) + Send + Sync + 'static,
    {
        let f = move |event: &dyn Any| {
            if let Some(event) = event.downcast_ref::<E>() {
                handler(event.clone());
            }
        };

        EventHandlerWrapper {
            handler: Arc::new(f),
        }
    }

    fn handle<E>(&self, event: &E)
    where
        E: Event + 'static,
    {
        (self.handler)(event as &dyn Any)
    }
}

/// A default implementation for the [Mediator] trait.
///
/// Cloning shares the handler tables, so a clone taken while building sees
/// every handler registered afterwards. Dispatch only takes a read lock on
/// the tables and releases it before the handler runs.
///
/// # Examples
///
/// ## Request handler
/// ```
/// use mediator::{DefaultMediator, Mediator, Request, RequestHandler};
///
/// struct DoubleRequest(i64);
/// impl Request<i64> for DoubleRequest {}
///
/// struct DoubleRequestHandler;
/// impl RequestHandler<DoubleRequest, i64> for DoubleRequestHandler {
///     fn handle(&self, req: DoubleRequest) -> i64 {
///         req.0 * 2
///     }
/// }
///
/// let mediator = DefaultMediator::builder()
///     .add_handler(DoubleRequestHandler)
///     .build();
///
/// assert_eq!(Ok(4), mediator.send(DoubleRequest(2)));
/// ```
///
/// ## Event handler
/// ```
/// use mediator::{DefaultMediator, Event, Mediator};
///
/// #[derive(Clone)]
/// struct PriceChangedEvent(f64);
/// impl Event for PriceChangedEvent {}
///
/// let mediator = DefaultMediator::builder()
///     .subscribe_fn(|event: PriceChangedEvent| println!("New price: {}", event.0))
///     .build();
///
/// assert!(mediator.publish(PriceChangedEvent(9.99)).is_ok());
/// ```
#[derive(Clone, Default)]
pub struct DefaultMediator {
    request_handlers: HandlerTable<RequestHandlerWrapper>,
    event_handlers: HandlerTable<Vec<EventHandlerWrapper>>,
}

impl DefaultMediator {
    /// Gets a [DefaultMediator] builder.
    pub fn builder() -> Builder {
        Builder::new()
    }
}

impl Mediator for DefaultMediator {
    fn send<Req, Res>(&self, req: Req) -> crate::Result<Res>
    where
        Res: Send + 'static,
        Req: Request<Res> + Send + 'static,
    {
        let handler = self
            .request_handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&TypeId::of::<Req>())
            .cloned();

        match handler {
            Some(handler) => handler.handle(req),
            None => Err(Error::new(ErrorKind::NotFound, type_name::<Req>())),
        }
    }

    fn publish<E>(&self, event: E) -> crate::Result<()>
    where
        E: Event + 'static,
    {
        let handlers = self
            .event_handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&TypeId::of::<E>())
            .cloned()
            .unwrap_or_default();

        if handlers.is_empty() {
            return Err(Error::new(ErrorKind::NotFound, type_name::<E>()));
        }

        for handler in &handlers {
            handler.handle(&event);
        }

        Ok(())
    }
}

/// A builder for the [DefaultMediator].
pub struct Builder {
    inner: DefaultMediator,
}

impl Builder {
    /// Constructs a new `Builder`.
    pub fn new() -> Self {
        Builder {
            inner: DefaultMediator::default(),
        }
    }

    fn insert_handler<Req>(&self, wrapper: RequestHandlerWrapper)
    where
        Req: 'static,
    {
        self.inner
            .request_handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(TypeId::of::<Req>(), wrapper);
    }

    fn push_subscriber<E>(&self, wrapper: EventHandlerWrapper)
    where
        E: 'static,
    {
        self.inner
            .event_handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(TypeId::of::<E>())
            .or_default()
            .push(wrapper);
    }

    /// Registers a request handler, replacing any previous handler for `Req`.
    pub fn add_handler<Req, Res, H>(self, handler: H) -> Self
    where
        Res: Send + 'static,
        Req: Request<Res> + Send + 'static,
        H: RequestHandler<Req, Res> + Send + Sync + 'static,
    {
        self.insert_handler::<Req>(RequestHandlerWrapper::new(handler));
        self
    }

    /// Registers a request handler from a function.
    pub fn add_handler_fn<Req, Res, F>(self, handler: F) -> Self
    where
        Res: Send + 'static,
        Req: Request<Res> + Send + 'static,
        F: Fn(Req) -> Res + Send + Sync + 'static,
    {
        self.insert_handler::<Req>(RequestHandlerWrapper::from_fn(handler));
        self
    }

    /// Register a request handler using a copy of the mediator.
    pub fn add_handler_deferred<Req, Res, H, F>(self, f: F) -> Self
    where
        Res: Send + 'static,
        Req: Request<Res> + Send + 'static,
        H: RequestHandler<Req, Res> + Send + Sync + 'static,
        F: FnOnce(DefaultMediator) -> H,
    {
        let handler = f(self.inner.clone());
        self.add_handler(handler)
    }

    /// Registers an event handler.
    pub fn subscribe<E, H>(self, handler: H) -> Self
    where
        E: Event + 'static,
        H: EventHandler<E> + Send + Sync + 'static,
    {
        self.push_subscriber::<E>(EventHandlerWrapper::new(handler));
        self
    }

    /// Registers an event handler from a function.
    pub fn subscribe_fn<E, F>(self, handler: F) -> Self
    where
        E: Event + 'static,
        F: Fn(E) + Send + Sync + 'static,
    {
        self.push_subscriber::<E>(EventHandlerWrapper::from_fn(handler));
        self
    }

    /// Builds the `DefaultMediator`.
    pub fn build(self) -> DefaultMediator {
        self.inner
    }
}

impl Default for Builder {
    fn default() -> Self {
        Builder::new()
    }
}
