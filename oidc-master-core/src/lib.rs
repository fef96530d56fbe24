//! Core runtime shared by every oidc-master crate.
//!
//! - [`config`]: layered YAML / `.env` / environment configuration
//! - [`logging`]: `tracing` subscriber setup
//! - [`view`]: the four presentation views
//! - [`sequence`]: last-request-wins bookkeeping for asynchronous views

pub mod config;
pub mod logging;
pub mod sequence;
pub mod view;

pub use config::{Config, ConfigError, ConfigValue, Settings};
pub use logging::init_tracing;
pub use sequence::{LatestSlot, RequestSequence, Ticket};
pub use view::View;

pub mod prelude {
    //! Re-exports of the most commonly used core types.
    pub use crate::{Config, LatestSlot, Settings, View};
}
