//! Ownership-scoped event dispatch.
//!
//! Handlers are registered on a [`Dispatcher`] owned by a single room or view
//! and removed with the [`Subscription`] token returned at registration. The
//! token is consumed on removal, so a handler cannot be removed twice.

use tracing::trace;

type Handler<E> = Box<dyn FnMut(&E) + Send>;

/// Token identifying one registered handler.
#[derive(Debug, PartialEq, Eq, Hash)]
#[must_use = "dropping a Subscription leaves the handler registered until teardown"]
pub struct Subscription(u64);

/// Fan-out of events to registered handlers, in registration order.
pub struct Dispatcher<E> {
    next_id: u64,
    handlers: Vec<(u64, Handler<E>)>,
}

impl<E> Dispatcher<E> {
    /// Creates an empty dispatcher.
    pub fn new() -> Self {
        Self {
            next_id: 0,
            handlers: Vec::new(),
        }
    }

    /// Registers a handler.
    pub fn subscribe(&mut self, handler: impl FnMut(&E) + Send + 'static) -> Subscription {
        let id = self.next_id;
        self.next_id += 1;
        self.handlers.push((id, Box::new(handler)));
        Subscription(id)
    }

    /// Removes the handler behind `subscription`. Returns false when it was
    /// already cleared by [`Dispatcher::clear`].
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(id, _)| *id != subscription.0);
        self.handlers.len() != before
    }

    /// Delivers `event` to every handler.
    pub fn emit(&mut self, event: &E) {
        trace!(handlers = self.handlers.len(), "Dispatching event");
        for (_, handler) in &mut self.handlers {
            handler(event);
        }
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Removes every handler, returning how many there were.
    pub fn clear(&mut self) -> usize {
        let count = self.handlers.len();
        self.handlers.clear();
        count
    }
}

impl<E> Default for Dispatcher<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Debug for Dispatcher<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
