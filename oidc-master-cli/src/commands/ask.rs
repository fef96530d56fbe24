use clap::Args;
use oidc_master_assistant::{get_oidc_help, AssistantConfig, AssistantError, GeminiRelay, TextGenerator};
use oidc_master_core::config::AssistantSettings;
use tracing::warn;

use super::CommandResult;

#[derive(Debug, Clone, Default, Args)]
pub struct AskArgs {
    /// Extra context appended to the question (error message, token claims...)
    #[arg(long)]
    pub context: Option<String>,

    /// The question
    #[arg(required = true, trailing_var_arg = true)]
    pub query: Vec<String>,
}

/// Build the relay from settings, explaining how to provide a missing key.
pub fn relay(settings: &AssistantSettings) -> CommandResult<GeminiRelay> {
    match AssistantConfig::from_settings(settings) {
        Ok(config) => Ok(GeminiRelay::new(config)),
        Err(AssistantError::MissingApiKey) => Err(
            "No assistant API key configured. Set OIDC_MASTER_ASSISTANT_API_KEY (or API_KEY), \
             or assistant.api_key in oidc-master.yaml"
                .into(),
        ),
        Err(err) => Err(err.into()),
    }
}

pub async fn run<G: TextGenerator>(args: &AskArgs, generator: &G) -> CommandResult<String> {
    let query = args.query.join(" ");
    if query.trim().is_empty() {
        return Err("Nothing to ask".into());
    }

    match get_oidc_help(generator, &query, args.context.as_deref()).await {
        Ok(reply) => Ok(reply),
        Err(err) => {
            warn!(error = %err, "Assistant request failed");
            Err(err.public_message().into())
        }
    }
}
