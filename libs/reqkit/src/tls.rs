//! TLS setup for the base transport.
//!
//! Loading roots from the OS certificate store can be slow, so the assembled
//! `ClientConfig` is built once and cached for the process lifetime.

use crate::error::Error;
use std::sync::{Arc, OnceLock};

static NATIVE_CONFIG: OnceLock<Result<Arc<rustls::ClientConfig>, String>> = OnceLock::new();

/// Crypto provider for TLS connections: the globally installed default when
/// one exists, otherwise a fresh aws-lc-rs provider (not installed globally).
pub(crate) fn crypto_provider() -> Arc<rustls::crypto::CryptoProvider> {
    rustls::crypto::CryptoProvider::get_default()
        .cloned()
        .unwrap_or_else(|| Arc::new(rustls::crypto::aws_lc_rs::default_provider()))
}

fn build_native_config() -> Result<Arc<rustls::ClientConfig>, String> {
    let loaded = rustls_native_certs::load_native_certs();
    for err in &loaded.errors {
        tracing::warn!(error = %err, "error loading native root certificate");
    }

    let mut roots = rustls::RootCertStore::empty();
    let (added, ignored) = roots.add_parsable_certificates(loaded.certs);
    if ignored > 0 {
        tracing::warn!(added, ignored, "some native root certificates could not be parsed");
    }
    if added == 0 {
        return Err("no usable native root CA certificates in the OS store".to_owned());
    }
    tracing::debug!(count = added, "loaded native root certificates");

    let config = rustls::ClientConfig::builder_with_provider(crypto_provider())
        .with_safe_default_protocol_versions()
        .map_err(|e| format!("failed to set TLS protocol versions: {e}"))?
        .with_root_certificates(roots)
        .with_no_client_auth();

    Ok(Arc::new(config))
}

/// Rustls client config backed by the OS root store, built once per process.
///
/// # Errors
/// Returns [`Error::Tls`] when the store yields no usable roots, so
/// misconfiguration fails at client construction instead of at handshake time.
pub(crate) fn native_roots_config() -> Result<Arc<rustls::ClientConfig>, Error> {
    NATIVE_CONFIG
        .get_or_init(build_native_config)
        .clone()
        .map_err(|reason| Error::Tls(reason.into()))
}
