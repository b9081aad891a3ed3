pub mod domain;
pub mod protocol;
pub mod provider;
pub mod provider_factory;
pub mod providers;

pub use domain::{resolve_domain, DomainHints};
pub use protocol::{BackendResponse, GenerationConfig, FINISH_REASON_MAX_TOKENS, FINISH_REASON_STOP};
pub use provider::ReplyBackend;
pub use provider_factory::{create_backend, AVAILABLE_BACKENDS};
pub use providers::{DirectBackend, ProxiedBackend};
