//! HTTP server and graceful shutdown.
//!
//! On SIGTERM or Ctrl-C the server:
//! 1. Immediately stops `listener.accept()` — no new connections are made.
//! 2. Lets every in-flight connection task run to completion.
//! 3. Returns from [`Server::serve`], which lets `main` exit cleanly.

use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::Incoming;
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

use crate::config::DEFAULT_MAX_BODY_SIZE;
use crate::error::Error;
use crate::method::Method;
use crate::request::Request;
use crate::response::{IntoResponse, Response, not_found};
use crate::router::{Lookup, Router};
use crate::status::Status;

/// Where the server gets its listening socket from.
enum Bind {
    Addr(SocketAddr),
    Listener(TcpListener),
}

/// The HTTP server.
pub struct Server {
    bind: Bind,
    max_body_size: usize,
}

/// Everything a connection task needs, shared behind one `Arc`.
struct Shared<S> {
    router: Router<S>,
    state: Arc<S>,
    max_body_size: usize,
}

impl Server {
    /// Configures the server to bind to `addr` when [`serve`](Server::serve)
    /// is called.
    pub fn bind(addr: SocketAddr) -> Self {
        Self { bind: Bind::Addr(addr), max_body_size: DEFAULT_MAX_BODY_SIZE }
    }

    /// Serves on an already bound listener, e.g. one bound to port 0.
    pub fn from_listener(listener: TcpListener) -> Self {
        Self { bind: Bind::Listener(listener), max_body_size: DEFAULT_MAX_BODY_SIZE }
    }

    /// Request bodies larger than `bytes` are answered with 413.
    pub fn max_body_size(mut self, bytes: usize) -> Self {
        self.max_body_size = bytes;
        self
    }

    /// Starts accepting connections and dispatching them through `router`.
    ///
    /// Returns only after a full graceful shutdown (SIGTERM or Ctrl-C,
    /// followed by all in-flight requests completing).
    pub async fn serve<S>(self, router: Router<S>, state: S) -> std::io::Result<()>
    where
        S: Send + Sync + 'static,
    {
        self.serve_with_shutdown(router, state, shutdown_signal()).await
    }

    /// Like [`serve`](Server::serve), but stops accepting when `signal`
    /// resolves instead of waiting for a process signal.
    pub async fn serve_with_shutdown<S>(
        self,
        router: Router<S>,
        state: S,
        signal: impl Future<Output = ()>,
    ) -> std::io::Result<()>
    where
        S: Send + Sync + 'static,
    {
        let listener = match self.bind {
            Bind::Addr(addr) => TcpListener::bind(addr).await?,
            Bind::Listener(listener) => listener,
        };

        let shared = Arc::new(Shared {
            router,
            state: Arc::new(state),
            max_body_size: self.max_body_size,
        });

        info!(addr = %listener.local_addr()?, "quill listening");

        // Tracks every connection task so shutdown can wait for them.
        let mut tasks = tokio::task::JoinSet::new();

        tokio::pin!(signal);

        loop {
            tokio::select! {
                // Shutdown first, so a signal stops accepting even when more
                // connections are queued.
                biased;

                () = &mut signal => {
                    info!(in_flight = tasks.len(), "shutdown signal received, draining connections");
                    break;
                }

                res = listener.accept() => {
                    let (stream, remote_addr) = match res {
                        Ok(v) => v,
                        Err(e) => {
                            error!("accept error: {e}");
                            continue;
                        }
                    };

                    let shared = Arc::clone(&shared);
                    let io = TokioIo::new(stream);

                    tasks.spawn(async move {
                        // Called once per request on the connection.
                        let svc = service_fn(move |req| {
                            let shared = Arc::clone(&shared);
                            async move { dispatch(shared, req).await }
                        });

                        // HTTP/1.1 or HTTP/2, whatever the client negotiates.
                        if let Err(e) = ConnBuilder::new(TokioExecutor::new())
                            .serve_connection(io, svc)
                            .await
                        {
                            error!(peer = %remote_addr, "connection error: {e}");
                        }
                    });
                }

                // Reap finished tasks so the set does not grow without bound.
                Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
            }
        }

        while tasks.join_next().await.is_some() {}

        info!("quill stopped");
        Ok(())
    }
}

// ── Request dispatch ──────────────────────────────────────────────────────────

/// Routes one request and produces one response.
///
/// Every failure becomes a status code here, so hyper never sees an error.
async fn dispatch<S>(
    shared: Arc<Shared<S>>,
    req: hyper::Request<Incoming>,
) -> Result<http::Response<Full<Bytes>>, Infallible>
where
    S: Send + Sync + 'static,
{
    let (parts, body) = req.into_parts();
    let path = parts.uri.path().to_owned();

    let Ok(method) = Method::try_from(&parts.method) else {
        warn!(method = %parts.method, path = %path, "unsupported method");
        return Ok(Response::status(Status::MethodNotAllowed).into_inner());
    };

    let (handler, params) = match shared.router.lookup(method, &path) {
        Lookup::Route(handler, params) => (handler, params),
        Lookup::Fallback(handler) => (handler, Default::default()),
        Lookup::MethodNotAllowed => {
            debug!(%method, path = %path, "method not allowed");
            return Ok(Response::status(Status::MethodNotAllowed).into_inner());
        }
        Lookup::NotFound => return Ok(not_found().into_inner()),
    };

    let body = match read_body(body, shared.max_body_size).await {
        Ok(body) => body,
        Err(res) => return Ok(res.into_inner()),
    };

    let mut req = Request::new(method, path, parts.headers, body);
    req.params = params;
    let path = req.path.clone();

    let response = handler.call(Arc::clone(&shared.state), req).await;
    debug!(%method, path = %path, status = u16::from(response.status), "request handled");
    Ok(response.into_inner())
}

/// Collects the request body, refusing anything above `limit` bytes.
async fn read_body(body: Incoming, limit: usize) -> Result<Bytes, Response> {
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            warn!(limit, "request body too large");
            Err(Response::builder()
                .status(Status::ContentTooLarge)
                .text("request body too large"))
        }
        Err(e) => {
            warn!("failed to read request body: {e}");
            Err(Error::Form(e.to_string()).into_response())
        }
    }
}

// ── Shutdown signal ───────────────────────────────────────────────────────────

/// Resolves on the first SIGTERM or SIGINT (Ctrl-C). Only Ctrl-C exists
/// on Windows.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to install Ctrl-C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let sigterm = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c   => {}
        () = sigterm  => {}
    }
}
