//! [`CommandBus`] – event identifier → handler registry.
//!
//! Layout leaves carry string event identifiers.  When one is selected the
//! navigation engine asks the bus to execute it, passing a context the
//! handler may use for follow-up navigation.  The bus never looks inside the
//! context; it is generic over its type.
//!
//! * Registering an identifier twice replaces the earlier handler.
//! * Unregistering an unknown identifier does nothing.
//! * Executing an unknown identifier does nothing and is not an error.
//!
//! # Example
//!
//! ```rust
//! use gazeos_kernel::CommandBus;
//!
//! let mut bus: CommandBus<Vec<String>> = CommandBus::new();
//! bus.register("checkout", |log: &mut Vec<String>| log.push("paid".into()));
//!
//! let mut log = Vec::new();
//! assert!(bus.execute("checkout", &mut log));
//! assert!(!bus.execute("unknown", &mut log));
//! assert_eq!(log, ["paid"]);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

/// Something that can run when its event identifier is selected.
pub trait CommandHandler<C: ?Sized>: Send + Sync {
    fn execute(&self, ctx: &mut C);
}

impl<C: ?Sized, F> CommandHandler<C> for F
where
    F: Fn(&mut C) + Send + Sync,
{
    fn execute(&self, ctx: &mut C) {
        self(ctx)
    }
}

/// Registry of command handlers keyed by event identifier.
pub struct CommandBus<C: ?Sized> {
    handlers: HashMap<String, Arc<dyn CommandHandler<C>>>,
}

impl<C: ?Sized> CommandBus<C> {
    /// Create an empty bus.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register `handler` for `event`.  Any handler previously registered
    /// for the same identifier is replaced.
    pub fn register(&mut self, event: impl Into<String>, handler: impl CommandHandler<C> + 'static) {
        self.register_shared(event, Arc::new(handler));
    }

    /// Register an already shared handler, e.g. one handler for several
    /// identifiers.
    pub fn register_shared(&mut self, event: impl Into<String>, handler: Arc<dyn CommandHandler<C>>) {
        let event = event.into();
        if self.handlers.insert(event.clone(), handler).is_some() {
            debug!(event = %event, "command handler replaced");
        }
    }

    /// Remove the handler for `event`, if any.
    pub fn unregister(&mut self, event: &str) {
        self.handlers.remove(event);
    }

    /// Run the handler registered for `event` against `ctx`.
    ///
    /// Returns `true` when a handler ran.  A missing handler is not an
    /// error: the call does nothing and returns `false`.
    pub fn execute(&self, event: &str, ctx: &mut C) -> bool {
        match self.handlers.get(event) {
            Some(handler) => {
                trace!(event, "executing command");
                handler.execute(ctx);
                true
            }
            None => {
                trace!(event, "no handler registered; ignoring");
                false
            }
        }
    }

    pub fn contains(&self, event: &str) -> bool {
        self.handlers.contains_key(event)
    }

    /// Registered identifiers, in no particular order.
    pub fn events(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<C: ?Sized> Default for CommandBus<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ?Sized> fmt::Debug for CommandBus<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut events: Vec<&str> = self.events().collect();
        events.sort_unstable();
        f.debug_struct("CommandBus").field("events", &events).finish()
    }
}
