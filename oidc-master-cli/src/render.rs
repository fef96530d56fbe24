//! Terminal rendering of view results.
//!
//! Every function returns the text to print; colours come from `colored`
//! and disappear when stdout is not a terminal or `NO_COLOR` is set.

use std::fmt::Write;

use colored::Colorize;
use oidc_master_assistant::{Message, Role};
use oidc_master_oidc::{DiscoveryDocument, GeneratedUrl, PRESETS};
use oidc_master_token::{ClaimsSummary, DecodedToken, ExpiryStatus, SECURITY_NOTE};

const LABEL_WIDTH: usize = 24;

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "{}", title.bold().cyan());
}

/// Key endpoints, supported features and the raw document.
pub fn discovery(doc: &DiscoveryDocument) -> String {
    let mut out = String::new();

    heading(&mut out, "Key Endpoints");
    for endpoint in doc.key_endpoints() {
        let value = match endpoint.value {
            Some(v) => v.normal(),
            None => endpoint.display().dimmed(),
        };
        let _ = writeln!(out, "  {:<LABEL_WIDTH$}{value}", endpoint.label);
    }

    let features = doc.supported_features();
    if !features.is_empty() {
        out.push('\n');
        heading(&mut out, "Supported Features");
        let _ = writeln!(out, "  {}", features.join(", "));
    }

    out.push('\n');
    heading(&mut out, "Raw Document");
    out.push_str(&doc.to_pretty_json());
    out.push('\n');
    out
}

/// The preset issuers, templates marked as needing edits.
pub fn presets() -> String {
    let mut out = String::new();
    for preset in PRESETS.iter() {
        let note = if preset.is_template() {
            " (replace the {placeholder})".dimmed().to_string()
        } else {
            String::new()
        };
        let _ = writeln!(out, "  {:<10}{}{note}", preset.name.bold(), preset.url);
    }
    out
}

/// Header, payload, signature and the claim validation panel.
pub fn decoded(token: &DecodedToken, summary: &ClaimsSummary) -> String {
    let mut out = String::new();

    heading(&mut out, "Header");
    out.push_str(&token.header_pretty());
    out.push_str("\n\n");

    heading(&mut out, "Payload");
    out.push_str(&token.payload_pretty());
    out.push_str("\n\n");

    heading(&mut out, "Signature");
    let _ = writeln!(out, "{}", token.signature.dimmed());
    out.push('\n');

    heading(&mut out, "Claim Validation");
    for (label, value) in summary.rows() {
        let _ = writeln!(out, "  {label:<LABEL_WIDTH$}{value}");
    }
    let status = match summary.expiry {
        ExpiryStatus::Valid => summary.expiry.to_string().green(),
        ExpiryStatus::Expired => summary.expiry.to_string().red(),
    };
    let _ = writeln!(out, "  {:<LABEL_WIDTH$}{status}", "Status");

    out.push('\n');
    let _ = writeln!(out, "{}", SECURITY_NOTE.yellow());
    out
}

/// The generated authorization URL, or the invalid-endpoint sentinel.
pub fn generated_url(url: &GeneratedUrl) -> String {
    match url {
        GeneratedUrl::Ready(url) => url.clone(),
        GeneratedUrl::Invalid => url.as_str().red().to_string(),
    }
}

/// One transcript entry.
pub fn message(message: &Message) -> String {
    match message.role {
        Role::User => format!("{} {}", "you>".bold().blue(), message.content),
        Role::Assistant => format!("{} {}", "assistant>".bold().green(), message.content),
    }
}
