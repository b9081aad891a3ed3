//! Backend Factory
//!
//! Creates the configured backend, validating credentials up front.

use std::sync::Arc;

use reply_core::{AddonConfig, BackendKind, Result};
use reqwest::Client;

use crate::domain::{resolve_domain, DomainHints};
use crate::provider::ReplyBackend;
use crate::providers::{DirectBackend, ProxiedBackend};

/// Available backend names
pub const AVAILABLE_BACKENDS: &[&str] = &["direct", "proxied"];

/// Create a backend for one generation call.
///
/// `request_host` is the inbound `Host` header, used only when the
/// configured system URL does not yield a domain.
pub fn create_backend(
    config: &AddonConfig,
    request_host: Option<&str>,
    client: Client,
) -> Result<Arc<dyn ReplyBackend>> {
    match config.backend {
        BackendKind::Direct => {
            let api_key = config.require_gemini_api_key()?;
            let mut backend = DirectBackend::new(client, api_key);

            if let Some(base_url) = config.direct_base_url.as_deref() {
                if !base_url.trim().is_empty() {
                    backend = backend.with_base_url(base_url.trim());
                }
            }

            Ok(Arc::new(backend))
        }

        BackendKind::Proxied => {
            let license_key = config.require_license_key()?;
            let api_key = config.require_gemini_api_key()?;
            let domain = resolve_domain(&DomainHints {
                system_url: config.system_url.as_deref(),
                request_host,
                server_name: config.server_name.as_deref(),
            })?;

            let mut backend = ProxiedBackend::new(client, license_key, api_key, domain);
            if let Some(base_url) = config.relay_base_override() {
                backend = backend.with_base_url(base_url);
            }

            Ok(Arc::new(backend))
        }
    }
}
