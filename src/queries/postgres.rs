use anyhow::{Context, Result, bail};
use sqlx::{ConnectOptions, Connection, PgConnection, postgres::PgConnectOptions};
use std::time::Instant;
use tracing::{debug, warn};

use super::ServerInfo;
use crate::tls::TlsMetadata;

/// An open database session
///
/// Owned by exactly one probe. [`Session::close`] consumes it, and dropping it
/// on an early return closes the socket, so the handle is released once on
/// every path.
#[derive(Debug)]
pub struct Session {
    conn: PgConnection,
}

/// Open a session using the driver's default timeouts
///
/// # Errors
///
/// Returns an error if the server is unreachable, rejects the credentials or
/// the TLS negotiation fails
pub async fn connect(options: &PgConnectOptions) -> Result<Session> {
    let connect_timer = Instant::now();
    let conn = options
        .connect()
        .await
        .context("failed to connect to database")?;

    debug!(elapsed = ?connect_timer.elapsed(), "session established");

    Ok(Session { conn })
}

impl Session {
    /// Run `SELECT version()` and return the first field of the single row
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the server returns no usable
    /// version string
    pub async fn server_version(&mut self) -> Result<String> {
        let query_timer = Instant::now();
        let version: Option<String> = sqlx::query_scalar("SELECT version()")
            .fetch_optional(&mut self.conn)
            .await
            .context("failed to fetch server version")?;

        debug!(elapsed = ?query_timer.elapsed(), "version query finished");

        let version = version.context("server returned no version row")?;
        if version.trim().is_empty() {
            bail!("server returned an empty version string");
        }

        Ok(version)
    }

    /// Read the TLS details of this session from `pg_stat_ssl`
    ///
    /// Returns `None` for a plaintext session.
    ///
    /// # Errors
    ///
    /// Returns an error if the view is missing or cannot be read, as on some
    /// wire-compatible servers
    pub async fn tls_metadata(&mut self) -> Result<Option<TlsMetadata>> {
        let row: Option<(bool, Option<String>, Option<String>)> = sqlx::query_as(
            "SELECT ssl, version, cipher FROM pg_stat_ssl WHERE pid = pg_backend_pid()",
        )
        .fetch_optional(&mut self.conn)
        .await
        .context("failed to read pg_stat_ssl")?;

        Ok(row.and_then(|(ssl, version, cipher)| ssl.then_some(TlsMetadata { version, cipher })))
    }

    /// Gracefully terminate the session
    ///
    /// # Errors
    ///
    /// Returns an error if the terminate message cannot be sent, the socket is
    /// dropped either way
    pub async fn close(self) -> Result<()> {
        self.conn.close().await.context("failed to close session")
    }

    /// Close the session, then hand back `result` unchanged
    ///
    /// A failed close is only logged, the socket is gone either way.
    ///
    /// # Errors
    ///
    /// Returns `result`'s error
    pub async fn close_with<T>(self, result: Result<T>) -> Result<T> {
        if let Err(e) = self.close().await {
            warn!("{e:#}");
        }

        result
    }

    /// The underlying connection, for statements beyond the probe's own
    pub fn connection(&mut self) -> &mut PgConnection {
        &mut self.conn
    }

    async fn inspect(&mut self) -> Result<ServerInfo> {
        let version = self.server_version().await?;

        // best effort, never fails the probe
        let tls = match self.tls_metadata().await {
            Ok(tls) => tls,
            Err(e) => {
                debug!("{e:#}");
                None
            }
        };

        Ok(ServerInfo { version, tls })
    }
}

/// Connect, fetch the server version and release the session
///
/// The session is closed whether or not the queries succeed.
///
/// # Errors
///
/// Returns an error if connecting or the version query fails
pub async fn check(options: &PgConnectOptions) -> Result<ServerInfo> {
    let mut session = connect(options).await?;

    let result = session.inspect().await;

    session.close_with(result).await
}
