//! # oidc-master-cli
//!
//! Terminal front-end for oidc-master.
//!
//! | Command | Description |
//! |---------|-------------|
//! | `oidc-master discover <issuer>` | Fetch and summarise an issuer's discovery document |
//! | `oidc-master presets` | List well-known issuers |
//! | `oidc-master build` | Compose an authorization request URL |
//! | `oidc-master decode [token]` | Decode a JWT and inspect its claims |
//! | `oidc-master ask <question>` | Ask the OIDC assistant |
//! | `oidc-master random` | Generate `state` / `nonce` values |
//! | `oidc-master shell` | Interactive view controller (default) |
//!
//! Command modules live under [`commands`]; [`render`] turns results into
//! terminal text.

pub mod commands;
pub mod render;
