pub mod postgres;

use crate::tls::TlsMetadata;

/// What a successful probe learned about the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerInfo {
    /// Output of `SELECT version()`
    pub version: String,
    /// TLS metadata (if the session is encrypted)
    pub tls: Option<TlsMetadata>,
}
