use std::fmt;

/// TLS details of the session as reported by the server in `pg_stat_ssl`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TlsMetadata {
    /// TLS protocol version (e.g., "TLSv1.3")
    pub version: Option<String>,
    /// Cipher suite used (e.g., `TLS_AES_256_GCM_SHA384`)
    pub cipher: Option<String>,
}

impl fmt::Display for TlsMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.version, &self.cipher) {
            (Some(version), Some(cipher)) => write!(f, "{version}, {cipher}"),
            (Some(version), None) => f.write_str(version),
            (None, Some(cipher)) => write!(f, "TLS, {cipher}"),
            (None, None) => f.write_str("TLS"),
        }
    }
}
