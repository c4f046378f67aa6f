//! TLS-capable connection setup for the async pool.
//!
//! `diesel-async` connects without TLS by default. Pooled connections here go
//! through `tokio-postgres` with a rustls connector instead, so the URL's
//! `sslmode` decides: `disable` stays plain, `prefer` (the default) upgrades
//! when the server offers TLS, and `require` refuses plain connections.
//! Server certificates are checked against the Mozilla root set.

use std::sync::Arc;

use diesel::{ConnectionError, ConnectionResult};
use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::ManagerConfig;
use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use rustls::{ClientConfig, RootCertStore};
use tokio_postgres_rustls::MakeRustlsConnect;
use tracing::warn;

/// rustls client configuration over the bundled web PKI roots.
///
/// # Errors
///
/// Returns [`rustls::Error`] when the ring provider rejects the default
/// protocol versions.
pub(crate) fn client_config() -> Result<ClientConfig, rustls::Error> {
    let roots = RootCertStore {
        roots: webpki_roots::TLS_SERVER_ROOTS.to_vec(),
    };
    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let config = ClientConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()?
        .with_root_certificates(roots)
        .with_no_client_auth();
    Ok(config)
}

/// Open one pooled connection to `url`, negotiating TLS per its `sslmode`.
pub(crate) fn establish_connection(
    url: &str,
) -> BoxFuture<'_, ConnectionResult<AsyncPgConnection>> {
    async move {
        let config = client_config()
            .map_err(|err| ConnectionError::BadConnection(format!("TLS setup failed: {err}")))?;
        let (client, connection) = tokio_postgres::connect(url, MakeRustlsConnect::new(config))
            .await
            .map_err(|err| ConnectionError::BadConnection(err.to_string()))?;
        tokio::spawn(async move {
            if let Err(error) = connection.await {
                warn!(%error, "database connection closed with error");
            }
        });
        AsyncPgConnection::try_from(client).await
    }
    .boxed()
}

/// Pool manager configuration using [`establish_connection`].
pub(crate) fn manager_config() -> ManagerConfig<AsyncPgConnection> {
    let mut config = ManagerConfig::default();
    config.custom_setup = Box::new(establish_connection);
    config
}
