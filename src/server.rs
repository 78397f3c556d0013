use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use anyhow::Context;
use axum::{middleware, Router};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    decompression::RequestDecompressionLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};

use crate::{
    cli_args::CliArgs,
    error::ErrorVerbosity,
    middleware::{
        method_not_allowed::method_not_allowed, trace_response_body::trace_response_body,
    },
    route,
    state::ApiState,
    store::mongo::MongoBookStore,
};

pub struct ServerConfig {
    socket_address: SocketAddr,
    mongodb_uri: String,
    mongodb_database: String,
    static_dir: PathBuf,
    error_verbosity: ErrorVerbosity,
    trace_response_body: bool,
}

impl ServerConfig {
    pub fn new(
        socket_address: SocketAddr,
        mongodb_uri: String,
        mongodb_database: String,
        static_dir: PathBuf,
        error_verbosity: ErrorVerbosity,
        trace_response_body: bool,
    ) -> Self {
        Self {
            socket_address,
            mongodb_uri,
            mongodb_database,
            static_dir,
            error_verbosity,
            trace_response_body,
        }
    }
}

impl From<CliArgs> for ServerConfig {
    fn from(args: CliArgs) -> Self {
        Self::new(
            SocketAddr::new(args.host, args.port),
            args.mongodb_uri,
            args.mongodb_database,
            args.static_dir,
            args.error_verbosity,
            args.trace_response_body,
        )
    }
}

/// Builds the full application: API routes, OpenAPI document, SPA fallback and the middleware stack.
pub fn router(state: ApiState, trace_response_body_enabled: bool) -> Router {
    let mut app = Router::new()
        .merge(route::about::app::app())
        .merge(route::books::app::app())
        .merge(route::openapi::app())
        .merge(route::spa::app(state.clone()))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            method_not_allowed::<ApiState>,
        ));

    if trace_response_body_enabled {
        app = app.layer(middleware::from_fn_with_state(
            state.clone(),
            trace_response_body::<ApiState>,
        ));
    }

    app.with_state(state).layer(
        ServiceBuilder::new()
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().level(tracing::Level::INFO))
                    .on_request(DefaultOnRequest::new().level(tracing::Level::INFO))
                    .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
            )
            .layer(RequestDecompressionLayer::new())
            .layer(CompressionLayer::new())
            .layer(CorsLayer::permissive()),
    )
}

pub struct Server {
    config: ServerConfig,
}

impl Server {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Connects to MongoDB, then serves until CTRL+C or SIGTERM.
    ///
    /// The listener is only bound once the database connection succeeded.
    pub async fn run(self) -> anyhow::Result<()> {
        let books = MongoBookStore::connect(&self.config.mongodb_uri, &self.config.mongodb_database)
            .await
            .context("Failed to connect to MongoDB")?;

        let state = ApiState::new(
            self.config.error_verbosity,
            Arc::new(books),
            self.config.static_dir,
        );

        let app = router(state, self.config.trace_response_body);

        tracing::info!(addr = %self.config.socket_address, "Starting server");

        let listener = TcpListener::bind(&self.config.socket_address)
            .await
            .context("Bind failed")?;

        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server failed")?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(%err, "Failed to install CTRL+C signal handler");
            std::future::pending::<()>().await;
        }

        tracing::info!("CTRL+C received");
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;

                tracing::info!("SIGTERM received");
            }
            Err(err) => {
                tracing::error!(%err, "Failed to install SIGTERM signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutting down");
}
