use std::fmt::Write;

use clap::Args;
use oidc_master_core::config::BuilderSettings;
use oidc_master_oidc::{AuthRequestParams, GeneratedUrl, Pkce, INVALID_ENDPOINT};
use tracing::info;

use super::CommandResult;

#[derive(Debug, Clone, Default, Args)]
pub struct BuildArgs {
    /// Authorization endpoint (default: builder.authorization_endpoint)
    #[arg(long)]
    pub endpoint: Option<String>,

    #[arg(long)]
    pub client_id: Option<String>,

    #[arg(long)]
    pub redirect_uri: Option<String>,

    /// Space-separated scopes
    #[arg(long)]
    pub scope: Option<String>,

    /// code, token, id_token or "code id_token"
    #[arg(long)]
    pub response_type: Option<String>,

    /// Fixed state instead of a random one
    #[arg(long)]
    pub state: Option<String>,

    /// Fixed nonce instead of a random one
    #[arg(long)]
    pub nonce: Option<String>,

    /// Attach an S256 PKCE challenge
    #[arg(long)]
    pub pkce: bool,

    /// Attach a plain PKCE challenge
    #[arg(long, conflicts_with = "pkce")]
    pub plain_pkce: bool,

    /// Open the URL in the default browser
    #[arg(long)]
    pub open: bool,
}

/// The request parameters: configured defaults overridden by flags.
pub fn params(args: &BuildArgs, settings: &BuilderSettings) -> (AuthRequestParams, Option<Pkce>) {
    let mut params = AuthRequestParams::from_settings(settings);
    let overrides = [
        (&args.endpoint, &mut params.endpoint),
        (&args.client_id, &mut params.client_id),
        (&args.redirect_uri, &mut params.redirect_uri),
        (&args.scope, &mut params.scope),
        (&args.response_type, &mut params.response_type),
        (&args.state, &mut params.state),
        (&args.nonce, &mut params.nonce),
    ];
    for (flag, field) in overrides {
        if let Some(value) = flag {
            *field = value.clone();
        }
    }

    let pkce = if args.pkce {
        Some(Pkce::generate())
    } else if args.plain_pkce {
        Some(Pkce::plain())
    } else {
        None
    };
    let params = match &pkce {
        Some(pkce) => params.with_pkce(pkce),
        None => params,
    };
    (params, pkce)
}

/// Start the authorization flow in the browser. Refused while the
/// invalid-endpoint sentinel is shown.
pub fn open_in_browser(url: &GeneratedUrl) -> CommandResult<()> {
    match url.url() {
        Some(target) if url.is_actionable() => {
            info!(url = %target, "Opening authorization URL");
            open::that(target)?;
            Ok(())
        }
        _ => Err(INVALID_ENDPOINT.into()),
    }
}

pub fn run(args: &BuildArgs, settings: &BuilderSettings) -> CommandResult<String> {
    let (params, pkce) = params(args, settings);

    let generated = params.generate();
    let url = match &generated {
        GeneratedUrl::Ready(url) => url,
        GeneratedUrl::Invalid => return Err(INVALID_ENDPOINT.into()),
    };
    if args.open {
        open_in_browser(&generated)?;
    }

    let mut out = String::new();
    let _ = writeln!(out, "{url}");
    out.push('\n');
    let _ = writeln!(out, "state:         {}", params.state);
    let _ = writeln!(out, "nonce:         {}", params.nonce);
    if let Some(pkce) = pkce {
        let _ = writeln!(out, "code_verifier: {}", pkce.verifier());
    }
    Ok(out)
}
