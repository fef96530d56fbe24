//! OIDC question answering over a hosted text-generation service.
//!
//! [`GeminiRelay`] sends a prompt and the fixed [`SYSTEM_INSTRUCTION`] to the
//! Gemini `generateContent` endpoint. [`Conversation`] keeps the transcript
//! shown by the assistant view and turns failures into [`APOLOGY`].

pub mod config;
pub mod conversation;
pub mod error;
pub mod relay;

pub use config::AssistantConfig;
pub use conversation::{Conversation, Message, Role, GREETING};
pub use error::{AssistantError, APOLOGY};
pub use relay::{build_prompt, get_oidc_help, GeminiRelay, TextGenerator, SYSTEM_INSTRUCTION};
