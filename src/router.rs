//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. Routes are registered
//! explicitly at startup; a single optional fallback catches every `GET`
//! or `HEAD` that no route claims.

use std::collections::HashMap;
use std::sync::Arc;

use matchit::Router as MatchitRouter;

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;

/// Outcome of looking up one request.
pub(crate) enum Lookup<S> {
    /// A route matched; carries its path parameters.
    Route(BoxedHandler<S>, HashMap<String, String>),
    /// No route matched, but the fallback takes it.
    Fallback(BoxedHandler<S>),
    /// The path is routed, just not for this method.
    MethodNotAllowed,
    NotFound,
}

/// The application router.
///
/// Build it once at startup; pass it to [`Server::serve`](crate::Server::serve).
/// Each registration returns `self` so calls chain naturally.
pub struct Router<S> {
    routes: HashMap<Method, MatchitRouter<BoxedHandler<S>>>,
    fallback: Option<BoxedHandler<S>>,
}

impl<S: 'static> Router<S> {
    pub fn new() -> Self {
        Self { routes: HashMap::new(), fallback: None }
    }

    /// Register a handler for a method + path pair.
    ///
    /// Path parameters use `{name}` syntax and are read back with
    /// `req.param("name")`. Static segments win over parameters, so
    /// `/articles/new` and `/articles/{title}` coexist.
    ///
    /// # Panics
    ///
    /// Panics if the same method + path is registered twice or the path
    /// is not valid route syntax. Routes are fixed at startup.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler<S>) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{method} {path}`: {e}"));
        self
    }

    /// Handler for any `GET`/`HEAD` request no route matches.
    pub fn fallback(mut self, handler: impl Handler<S>) -> Self {
        self.fallback = Some(handler.into_boxed_handler());
        self
    }

    pub(crate) fn lookup(&self, method: Method, path: &str) -> Lookup<S> {
        // HEAD is answered by the GET route; hyper drops the body.
        let candidates: &[Method] = match method {
            Method::Head => &[Method::Head, Method::Get],
            _ => std::slice::from_ref(&method),
        };

        for m in candidates {
            if let Some(matched) = self.routes.get(m).and_then(|tree| tree.at(path).ok()) {
                let params = matched.params.iter()
                    .map(|(k, v)| (k.to_owned(), v.to_owned()))
                    .collect();
                return Lookup::Route(Arc::clone(matched.value), params);
            }
        }

        if method.is_read() {
            if let Some(fallback) = &self.fallback {
                return Lookup::Fallback(Arc::clone(fallback));
            }
        }

        let routed_elsewhere = self.routes.iter()
            .any(|(m, tree)| *m != method && tree.at(path).is_ok());
        if routed_elsewhere {
            Lookup::MethodNotAllowed
        } else {
            Lookup::NotFound
        }
    }
}

impl<S: 'static> Default for Router<S> {
    fn default() -> Self { Self::new() }
}
