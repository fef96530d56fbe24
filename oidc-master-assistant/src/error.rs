/// Shown in the conversation whenever the relay fails, whatever the cause.
pub const APOLOGY: &str = "Sorry, I encountered an error processing that request.";

/// Assistant relay errors.
#[derive(Debug)]
pub enum AssistantError {
    /// No API credential was configured.
    MissingApiKey,

    /// The request could not be sent or the response body not read.
    Request(String),

    /// The service answered with a non-2xx status.
    Status { code: u16, message: String },

    /// The response body is not the expected JSON.
    Parse(String),

    /// The response carried no generated text.
    EmptyResponse,
}

impl std::fmt::Display for AssistantError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssistantError::MissingApiKey => write!(f, "No assistant API key configured"),
            AssistantError::Request(msg) => write!(f, "Assistant request failed: {msg}"),
            AssistantError::Status { code, message } => {
                write!(f, "Assistant service returned HTTP {code}: {message}")
            }
            AssistantError::Parse(msg) => write!(f, "Unexpected assistant response: {msg}"),
            AssistantError::EmptyResponse => write!(f, "Assistant response contained no text"),
        }
    }
}

impl std::error::Error for AssistantError {}

impl AssistantError {
    pub fn public_message(&self) -> &'static str {
        APOLOGY
    }
}
