pub mod generator;
pub mod prompt;
pub mod sanitize;

pub use generator::{GenerationSettings, ReplyGenerator, ReplyOutcome};
pub use prompt::PromptBuilder;
pub use sanitize::{extract_and_clean, SanitizedReply, TRUNCATION_NOTE};
