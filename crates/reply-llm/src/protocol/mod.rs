//! Wire types shared by the backends.

pub mod gemini;

pub use gemini::{
    BackendResponse, GeminiContent, GeminiPart, GeminiRequest, GenerationConfig, RelayRequest,
    FINISH_REASON_MAX_TOKENS, FINISH_REASON_STOP,
};
