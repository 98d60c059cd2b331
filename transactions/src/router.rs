//! Route-keyed dispatch of operations to their handlers.

use std::collections::HashMap;

use grove_store::KvStore;
use tracing::debug;

use crate::{Operation, OperationError};

/// Executes operations of one route against a store view.
///
/// Handlers may write freely: the caller runs them inside a buffered view
/// and discards it if any operation of the batch fails.
pub trait OperationHandler: Send + Sync {
    fn handle(&self, store: &mut dyn KvStore, operation: &Operation) -> Result<(), OperationError>;
}

#[derive(Default)]
pub struct Router {
    handlers: HashMap<String, Box<dyn OperationHandler>>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `route`. Each route has at most one handler.
    pub fn register(
        &mut self,
        route: impl Into<String>,
        handler: impl OperationHandler + 'static,
    ) -> Result<(), OperationError> {
        let route = route.into();
        if self.handlers.contains_key(&route) {
            return Err(OperationError::DuplicateRoute(route));
        }
        self.handlers.insert(route, Box::new(handler));
        Ok(())
    }

    /// Registered routes, sorted.
    pub fn routes(&self) -> Vec<&str> {
        let mut routes: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        routes.sort_unstable();
        routes
    }

    pub fn dispatch(&self, store: &mut dyn KvStore, operation: &Operation) -> Result<(), OperationError> {
        let handler = self
            .handlers
            .get(&operation.route)
            .ok_or_else(|| OperationError::UnknownRoute(operation.route.clone()))?;
        debug!(route = %operation.route, "dispatching operation");
        handler.handle(store, operation)
    }
}
