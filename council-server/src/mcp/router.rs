use std::collections::HashMap;

use serde_json::Value;

use super::context::ServerContext;
use super::envelope::{Params, ParamsShape};
use super::error::{RpcError, RpcResult};

pub type RequestHandler = fn(&ServerContext, Params) -> RpcResult<Value>;
pub type NotificationHandler = fn(&ServerContext, Params);

/// Request handlers always produce a reply; notification handlers never do.
#[derive(Clone, Copy)]
pub enum Handler {
    Request(RequestHandler),
    Notification(NotificationHandler),
}

#[derive(Clone, Copy)]
pub struct Route {
    pub shape: ParamsShape,
    pub handler: Handler,
}

impl Route {
    pub fn request(shape: ParamsShape, handler: RequestHandler) -> Self {
        Self {
            shape,
            handler: Handler::Request(handler),
        }
    }

    pub fn notification(shape: ParamsShape, handler: NotificationHandler) -> Self {
        Self {
            shape,
            handler: Handler::Notification(handler),
        }
    }
}

/// Immutable method table. Built once from a declarative list and never
/// modified afterwards.
pub struct MethodRouter {
    routes: HashMap<&'static str, Route>,
}

impl MethodRouter {
    pub fn new(entries: impl IntoIterator<Item = (&'static str, Route)>) -> Self {
        Self {
            routes: entries.into_iter().collect(),
        }
    }

    pub fn resolve(&self, method: &str) -> RpcResult<Route> {
        self.routes
            .get(method)
            .copied()
            .ok_or_else(|| RpcError::MethodNotFound(method.to_string()))
    }

    pub fn methods(&self) -> Vec<&'static str> {
        let mut methods: Vec<_> = self.routes.keys().copied().collect();
        methods.sort_unstable();
        methods
    }
}
