//! Command implementations for the `oidc-master` CLI.
//!
//! Each submodule corresponds to a top-level CLI command. Commands return
//! the text to print; `main` writes it to stdout.

use std::error::Error;
use std::future::Future;

/// Assistant query: `oidc-master ask`.
///
/// Sends the question to the configured Gemini model through
/// [`GeminiRelay`](oidc_master_assistant::GeminiRelay).
pub mod ask;

/// Authorization URL builder: `oidc-master build`.
///
/// Starts from the `builder.*` settings, applies flag overrides and prints
/// the URL together with the generated `state`, `nonce` and PKCE verifier.
pub mod build;

/// JWT debugger: `oidc-master decode`.
pub mod decode;

/// Discovery explorer: `oidc-master discover` and `oidc-master presets`.
pub mod discover;

/// Random `state` / `nonce` values: `oidc-master random`.
pub mod random;

/// Interactive view controller: `oidc-master shell`.
///
/// A `dialoguer` menu over the four views, keeping per-view state between
/// visits. Discovery fetches run in the background and only the newest one
/// is kept.
pub mod shell;

/// Boxed error returned by every command.
pub type CommandResult<T> = Result<T, Box<dyn Error>>;

/// Run `future` to completion on a fresh multi-threaded runtime.
pub fn block_on<F: Future>(future: F) -> CommandResult<F::Output> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    Ok(runtime.block_on(future))
}
