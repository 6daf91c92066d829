//! Server construction and middleware wiring.

mod config;
#[cfg(feature = "metrics")]
mod metrics;
mod settings;
mod state_builders;

pub use config::ServerConfig;
pub use settings::ServerSettings;

#[cfg(feature = "metrics")]
use metrics::make_metrics;
use state_builders::build_http_state;

use std::future::{Future, pending};

use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};

use users_api::Trace;
#[cfg(debug_assertions)]
use users_api::doc::ApiDoc;
use users_api::inbound::http::basic_auth::BasicAuth;
use users_api::inbound::http::health::{HealthState, live, ready};
use users_api::inbound::http::state::HttpState;
use users_api::inbound::http::users;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    auth: BasicAuth,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        auth,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(users::scope(auth))
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state, marked ready once the socket is bound.
/// - `config`: bind address, database pool and Basic auth guard.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket or registering
/// metrics fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let ServerConfig {
        bind_addr,
        db_pool,
        auth,
    } = config;
    let http_state = build_http_state(db_pool);

    #[cfg(feature = "metrics")]
    let prometheus = make_metrics()?;

    let server = HttpServer::new(move || {
        let app = build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            auth: auth.clone(),
        });

        #[cfg(feature = "metrics")]
        let app = app.wrap(prometheus.clone());

        app
    })
    .bind(bind_addr)?
    .disable_signals()
    .run();

    health_state.mark_ready();
    Ok(server)
}

/// Wait for `shutdown`, flag the service as not live, then stop the server
/// gracefully so in-flight requests drain.
///
/// The server is built with its own signal handling disabled; pair this
/// with [`shutdown_signal`] so liveness fails before the listener closes.
pub async fn drain_on<F>(health_state: web::Data<HealthState>, handle: ServerHandle, shutdown: F)
where
    F: Future<Output = ()>,
{
    shutdown.await;
    health_state.mark_unhealthy();
    info!("shutdown requested; draining connections");
    handle.stop(true).await;
}

/// Resolve on Ctrl-C or, on Unix, `SIGTERM`.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            warn!(%error, "failed to listen for Ctrl-C");
            pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                warn!(%error, "failed to listen for SIGTERM");
                pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
