use std::io::Read;

use clap::Args;
use oidc_master_token::{decode, ClaimsSummary, INVALID_FORMAT_MESSAGE};

use super::CommandResult;
use crate::render;

#[derive(Debug, Clone, Default, Args)]
pub struct DecodeArgs {
    /// Compact JWT; `-` or nothing reads it from stdin
    pub token: Option<String>,
}

/// The token text: the argument, or stdin for `-` / no argument.
pub fn read_input(args: &DecodeArgs) -> CommandResult<String> {
    match args.token.as_deref() {
        Some("-") | None => {
            let mut input = String::new();
            std::io::stdin().read_to_string(&mut input)?;
            Ok(input)
        }
        Some(token) => Ok(token.to_string()),
    }
}

/// Render `input` decoded at time `now`.
///
/// Blank input renders nothing. Input that does not decode is an error
/// carrying the invalid-format banner.
pub fn render_token(input: &str, now: f64) -> CommandResult<String> {
    if input.trim().is_empty() {
        return Ok(String::new());
    }
    let token = decode(input).ok_or(INVALID_FORMAT_MESSAGE)?;
    let summary = ClaimsSummary::from_payload(&token.payload, now);
    Ok(render::decoded(&token, &summary))
}

pub fn run(args: &DecodeArgs) -> CommandResult<String> {
    let input = read_input(args)?;
    render_token(&input, oidc_master_token::time::now_epoch())
}
