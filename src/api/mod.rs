use std::{io, net::SocketAddr, sync::Arc};

use axum::{routing::get, Extension, Router};
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};
use tower::ServiceBuilder;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::{context::Context, health_check};

pub mod cors;
pub mod player;
pub mod rankings;
pub mod response;

pub fn router(ctx: Context) -> Router {
    let ctx = Arc::new(ctx);

    let layer_ctx = ServiceBuilder::new()
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(true)
                        .latency_unit(tower_http::LatencyUnit::Millis),
                ),
        )
        .layer(cors::allowed_headers())
        .layer(cors::permissive())
        .layer(Extension(ctx));

    Router::new()
        .merge(crate::api::player::router())
        .merge(crate::api::rankings::router())
        .route("/health", get(health_check))
        .layer(layer_ctx)
}

/// The HTTP API bound to its port but not yet serving.
pub struct Server {
    listener: TcpListener,
    router: Router,
}

/// A running [`Server`].
pub struct ServerHandle {
    addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<io::Result<()>>,
}

impl Server {
    pub async fn bind(ctx: Context) -> io::Result<Self> {
        let listener = TcpListener::bind(("0.0.0.0", ctx.config.port)).await?;

        Ok(Self {
            listener,
            router: router(ctx),
        })
    }

    pub fn start(self) -> io::Result<ServerHandle> {
        let addr = self.listener.local_addr()?;
        let (shutdown, signal) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            axum::serve(self.listener, self.router)
                .with_graceful_shutdown(async {
                    let _ = signal.await;
                })
                .await
        });

        Ok(ServerHandle {
            addr,
            shutdown,
            task,
        })
    }
}

impl ServerHandle {
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Stops accepting connections and waits for in-flight requests to finish.
    pub async fn stop(self) -> io::Result<()> {
        let _ = self.shutdown.send(());
        self.task.await.map_err(io::Error::other)?
    }
}
