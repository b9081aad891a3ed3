use thiserror::Error;

pub type Result<T, E = ReplyError> = std::result::Result<T, E>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReplyError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Ticket #{0} not found")]
    NotFound(u64),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Protocol error: {message}")]
    Protocol {
        message: String,
        details: Option<String>,
    },

    #[error("License error: {0}")]
    License(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl ReplyError {
    pub fn protocol(message: impl Into<String>) -> Self {
        ReplyError::Protocol {
            message: message.into(),
            details: None,
        }
    }

    pub fn protocol_with_details(message: impl Into<String>, details: Option<String>) -> Self {
        ReplyError::Protocol {
            message: message.into(),
            details: details.filter(|d| !d.trim().is_empty()),
        }
    }

    /// Stable name used in logs and JSON payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            ReplyError::Configuration(_) => "configuration_error",
            ReplyError::NotFound(_) => "not_found_error",
            ReplyError::InvalidRequest(_) => "invalid_request_error",
            ReplyError::Connection(_) => "connection_error",
            ReplyError::Protocol { .. } => "protocol_error",
            ReplyError::License(_) => "license_error",
            ReplyError::Parse(_) => "parse_error",
        }
    }

    /// Text shown to the operator who triggered the generation.
    pub fn operator_message(&self) -> String {
        match self {
            ReplyError::Configuration(message) => message.clone(),
            ReplyError::NotFound(ticket_id) => format!("Ticket #{} was not found", ticket_id),
            ReplyError::InvalidRequest(message) => message.clone(),
            ReplyError::Connection(message) => message.clone(),
            ReplyError::Protocol { message, .. } => format!("API Error: {}", message),
            ReplyError::License(reason) => format!(
                "License Error: {}. Please check your license key on your account page.",
                reason
            ),
            ReplyError::Parse(message) => message.clone(),
        }
    }
}
