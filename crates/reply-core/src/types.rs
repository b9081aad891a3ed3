use serde::{Deserialize, Serialize};
use std::fmt;

/// Instruction used when the operator leaves the instructions field blank.
pub const DEFAULT_ADMIN_INSTRUCTIONS: &str =
    "Provide a helpful and professional response to this ticket.";

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 4096;
pub const MAX_OUTPUT_TOKENS_LIMIT: u32 = 8192;

/// Clamp a configured token budget into the range the provider accepts.
pub fn clamp_max_output_tokens(value: u32) -> u32 {
    value.clamp(1, MAX_OUTPUT_TOKENS_LIMIT)
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SenderRole {
    Client,
    Staff,
}

/// One turn of a ticket conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConversationMessage {
    pub role: SenderRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Raw body as stored by the ticketing system, markup included.
    pub body: String,
    /// Timestamp exactly as provided by the ticketing system.
    pub timestamp: String,
}

/// Chronological view of a ticket, built fresh for one generation call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TicketConversationContext {
    pub ticket_id: u64,
    pub subject: String,
    pub department: String,
    pub priority: String,
    pub client_name: String,
    pub messages: Vec<ConversationMessage>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Professional,
    Friendly,
    Empathetic,
    Apologetic,
    Technical,
}

impl Tone {
    pub const ALL: [Tone; 5] = [
        Tone::Professional,
        Tone::Friendly,
        Tone::Empathetic,
        Tone::Apologetic,
        Tone::Technical,
    ];

    /// Unknown or empty values fall back to `Professional`.
    pub fn parse_lossy(value: &str) -> Tone {
        match value.trim().to_ascii_lowercase().as_str() {
            "friendly" => Tone::Friendly,
            "empathetic" => Tone::Empathetic,
            "apologetic" => Tone::Apologetic,
            "technical" => Tone::Technical,
            _ => Tone::Professional,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Professional => "professional",
            Tone::Friendly => "friendly",
            Tone::Empathetic => "empathetic",
            Tone::Apologetic => "apologetic",
            Tone::Technical => "technical",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response language setting: `auto` or a language code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub struct LanguageCode(String);

impl LanguageCode {
    pub const AUTO: &'static str = "auto";

    pub fn new(code: impl Into<String>) -> Self {
        let code = code.into().trim().to_ascii_lowercase();
        if code.is_empty() {
            Self::auto()
        } else {
            Self(code)
        }
    }

    pub fn auto() -> Self {
        Self(Self::AUTO.to_string())
    }

    pub fn is_auto(&self) -> bool {
        self.0 == Self::AUTO
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for LanguageCode {
    fn from(code: String) -> Self {
        Self::new(code)
    }
}

impl From<LanguageCode> for String {
    fn from(code: LanguageCode) -> Self {
        code.0
    }
}

impl Default for LanguageCode {
    fn default() -> Self {
        Self::auto()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationRequest {
    pub admin_instructions: String,
    pub extra_context: String,
    pub tone: Tone,
    pub language: LanguageCode,
    pub max_output_tokens: u32,
    pub model: String,
}

impl GenerationRequest {
    /// Blank instructions are replaced by [`DEFAULT_ADMIN_INSTRUCTIONS`].
    pub fn new(admin_instructions: &str, extra_context: &str, tone: Tone) -> Self {
        let admin_instructions = match admin_instructions.trim() {
            "" => DEFAULT_ADMIN_INSTRUCTIONS.to_string(),
            trimmed => trimmed.to_string(),
        };

        Self {
            admin_instructions,
            extra_context: extra_context.trim().to_string(),
            tone,
            language: LanguageCode::auto(),
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_language(mut self, language: LanguageCode) -> Self {
        self.language = language;
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = clamp_max_output_tokens(max_output_tokens);
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        let model = model.into();
        if !model.trim().is_empty() {
            self.model = model.trim().to_string();
        }
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationResult {
    pub reply_text: String,
    pub tone: Tone,
    pub truncated: bool,
}
