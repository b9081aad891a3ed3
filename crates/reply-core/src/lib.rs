pub mod config;
pub mod context;
pub mod error;
pub mod store;
pub mod types;

pub use config::{AddonConfig, BackendKind};
pub use context::{conversation_from_record, ContextAssembler};
pub use error::{ReplyError, Result};
pub use store::{
    ClientRecord, InMemoryTicketStore, JsonTicketStore, ReplyRecord, TicketRecord, TicketStore,
};
pub use types::{
    clamp_max_output_tokens, ConversationMessage, GenerationRequest, GenerationResult,
    LanguageCode, SenderRole, TicketConversationContext, Tone, DEFAULT_ADMIN_INSTRUCTIONS,
    DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_MODEL, MAX_OUTPUT_TOKENS_LIMIT,
};
