//! Calling-domain resolution for relay license checks.

use reply_core::{ReplyError, Result};
use url::Url;

/// Where the domain may come from, in priority order.
#[derive(Debug, Clone, Default)]
pub struct DomainHints<'a> {
    /// Public URL of the host system.
    pub system_url: Option<&'a str>,
    /// `Host` header of the inbound request.
    pub request_host: Option<&'a str>,
    pub server_name: Option<&'a str>,
}

pub fn resolve_domain(hints: &DomainHints<'_>) -> Result<String> {
    if let Some(host) = hints.system_url.and_then(host_of_url) {
        return Ok(host);
    }

    for candidate in [hints.request_host, hints.server_name] {
        if let Some(value) = candidate.map(str::trim).filter(|value| !value.is_empty()) {
            return Ok(value.to_string());
        }
    }

    Err(ReplyError::Configuration(
        "Could not determine the system domain for license validation.".to_string(),
    ))
}

fn host_of_url(system_url: &str) -> Option<String> {
    match Url::parse(system_url.trim()) {
        Ok(url) => url.host_str().map(str::to_string),
        Err(e) => {
            log::debug!("Ignoring unparseable system URL '{}': {}", system_url, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_url_host_wins() {
        let hints = DomainHints {
            system_url: Some("https://billing.example.com/whmcs/"),
            request_host: Some("internal:8080"),
            server_name: Some("localhost"),
        };
        assert_eq!(resolve_domain(&hints).unwrap(), "billing.example.com");
    }

    #[test]
    fn falls_back_to_request_host_then_server_name() {
        let hints = DomainHints {
            system_url: Some("not a url"),
            request_host: Some(" portal.example.org "),
            server_name: Some("srv"),
        };
        assert_eq!(resolve_domain(&hints).unwrap(), "portal.example.org");

        let hints = DomainHints {
            system_url: None,
            request_host: Some(""),
            server_name: Some("srv.example.net"),
        };
        assert_eq!(resolve_domain(&hints).unwrap(), "srv.example.net");
    }

    #[test]
    fn unresolvable_domain_is_a_configuration_error() {
        let err = resolve_domain(&DomainHints::default()).unwrap_err();
        assert_eq!(err.kind(), "configuration_error");
    }
}
