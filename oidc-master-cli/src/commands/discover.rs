use clap::Args;
use oidc_master_oidc::{find_preset, DiscoveryClient, DiscoveryDocument};
use tracing::{info, warn};

use super::CommandResult;
use crate::render;

#[derive(Debug, Clone, Default, Args)]
pub struct DiscoverArgs {
    /// Issuer URL, e.g. https://accounts.google.com
    pub issuer: Option<String>,

    /// Use a preset issuer instead (see `oidc-master presets`)
    #[arg(long, conflicts_with = "issuer")]
    pub preset: Option<String>,

    /// Print only the raw document as JSON
    #[arg(long)]
    pub json: bool,
}

/// Resolve the issuer to query from the arguments.
pub fn resolve_issuer(args: &DiscoverArgs) -> CommandResult<String> {
    if let Some(name) = &args.preset {
        let preset = find_preset(name).ok_or_else(|| format!("Unknown preset: {name}"))?;
        if preset.is_template() {
            return Err(format!(
                "Preset {} needs your tenant; pass the issuer instead: {}",
                preset.name, preset.url
            )
            .into());
        }
        return Ok(preset.url.to_string());
    }

    match args.issuer.as_deref().map(str::trim) {
        Some(issuer) if !issuer.is_empty() => Ok(issuer.to_string()),
        _ => Err("Enter an OIDC issuer URL, or use --preset".into()),
    }
}

/// Fetch a discovery document, reducing any failure to the generic message.
pub async fn fetch(client: &DiscoveryClient, issuer: &str) -> CommandResult<DiscoveryDocument> {
    match client.fetch(issuer).await {
        Ok(doc) => {
            info!(%issuer, "Discovery document fetched");
            Ok(doc)
        }
        Err(err) => {
            warn!(%issuer, error = %err, "Discovery failed");
            Err(err.public_message().into())
        }
    }
}

pub async fn run(args: &DiscoverArgs, client: &DiscoveryClient) -> CommandResult<String> {
    let issuer = resolve_issuer(args)?;
    let doc = fetch(client, &issuer).await?;
    if args.json {
        Ok(doc.to_pretty_json())
    } else {
        Ok(render::discovery(&doc))
    }
}

/// `oidc-master presets`
pub fn presets() -> String {
    render::presets()
}
