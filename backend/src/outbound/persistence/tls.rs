//! TLS connection setup for pooled PostgreSQL connections.
//!
//! Installed as the pool's custom setup hook: connections are opened with
//! `tokio-postgres` over `rustls`, trusting the platform's root store, then
//! handed to `diesel-async`.

use std::sync::Arc;

use diesel::{ConnectionError, ConnectionResult};
use diesel_async::AsyncPgConnection;
use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use rustls::{ClientConfig, RootCertStore};
use tokio_postgres_rustls::MakeRustlsConnect;
use tracing::{debug, error, warn};

fn root_certificates() -> RootCertStore {
    let mut roots = RootCertStore::empty();
    let loaded = rustls_native_certs::load_native_certs();
    for error in &loaded.errors {
        warn!(%error, "skipping unreadable platform certificate");
    }
    let (added, ignored) = roots.add_parsable_certificates(loaded.certs);
    debug!(added, ignored, "loaded platform root certificates");
    roots
}

fn client_config() -> Result<ClientConfig, rustls::Error> {
    let provider = Arc::new(rustls::crypto::ring::default_provider());
    Ok(ClientConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()?
        .with_root_certificates(root_certificates())
        .with_no_client_auth())
}

/// Open one TLS connection to `url`.
pub(super) fn establish_tls_connection(url: &str) -> BoxFuture<'_, ConnectionResult<AsyncPgConnection>> {
    async move {
        let config =
            client_config().map_err(|err| ConnectionError::BadConnection(err.to_string()))?;
        let (client, connection) = tokio_postgres::connect(url, MakeRustlsConnect::new(config))
            .await
            .map_err(|err| ConnectionError::BadConnection(err.to_string()))?;

        tokio::spawn(async move {
            if let Err(error) = connection.await {
                error!(%error, "database connection terminated");
            }
        });

        AsyncPgConnection::try_from(client).await
    }
    .boxed()
}
