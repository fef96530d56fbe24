use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use colored::Colorize;
use dialoguer::{Confirm, Input, Select};
use oidc_master_assistant::{Conversation, GeminiRelay};
use oidc_master_core::{LatestSlot, Settings, Ticket, View};
use oidc_master_oidc::authorize::RESPONSE_TYPES;
use oidc_master_oidc::{AuthRequestParams, DiscoveryClient, DiscoveryDocument, Pkce, PRESETS};
use tracing::{error, warn};

use super::{ask, build, decode, CommandResult};
use crate::render;

/// Shown instead of a crash report when the shell panics.
pub const FATAL_MESSAGE: &str = "Failed to initialize application";

/// What a view with a background request currently displays.
#[derive(Debug, Clone)]
pub enum PaneState<T> {
    /// The newest request is still in flight.
    Loading { target: String },
    Done(T),
}

/// A fetched document, or the message shown in its place.
pub type DiscoveryOutcome = Result<DiscoveryDocument, &'static str>;

/// Discovery view state. Fetches run on the runtime while the menu stays
/// usable; a response is kept only if no newer fetch was started since.
pub struct DiscoveryPane {
    client: DiscoveryClient,
    slot: Arc<LatestSlot<PaneState<DiscoveryOutcome>>>,
}

impl DiscoveryPane {
    pub fn new(client: DiscoveryClient) -> Self {
        Self {
            client,
            slot: Arc::new(LatestSlot::new()),
        }
    }

    /// Start fetching `issuer` in the background. Must be called inside a
    /// Tokio runtime.
    pub fn start(&self, issuer: &str) -> Ticket {
        let ticket = self.slot.begin();
        self.slot.complete(
            ticket,
            PaneState::Loading {
                target: issuer.to_string(),
            },
        );

        let slot = Arc::clone(&self.slot);
        let client = self.client.clone();
        let issuer = issuer.to_string();
        tokio::spawn(async move {
            let outcome = client.fetch(&issuer).await.map_err(|err| {
                warn!(%issuer, error = %err, "Discovery failed");
                err.public_message()
            });
            slot.complete(ticket, PaneState::Done(outcome));
        });
        ticket
    }

    /// What the view shows now; `None` before the first fetch.
    pub fn state(&self) -> Option<PaneState<DiscoveryOutcome>> {
        self.slot.get()
    }

    /// The authorization endpoint of the displayed document, if any.
    pub fn authorization_endpoint(&self) -> Option<String> {
        match self.state()? {
            PaneState::Done(Ok(doc)) => doc.authorization_endpoint().map(String::from),
            _ => None,
        }
    }
}

/// Run the interactive shell until the user quits.
pub fn run(settings: Settings) -> CommandResult<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    guard(|| runtime.block_on(Shell::new(settings).run()))
}

/// Run `body`, reporting a panic as [`FATAL_MESSAGE`] instead of a crash.
///
/// The panic is logged at `error`; the previous panic hook is restored afterwards.
pub fn guard<T>(body: impl FnOnce() -> CommandResult<T>) -> CommandResult<T> {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(|info| error!(%info, "Unhandled panic")));
    let outcome = std::panic::catch_unwind(AssertUnwindSafe(body));
    std::panic::set_hook(previous);

    outcome.unwrap_or_else(|_| Err(FATAL_MESSAGE.into()))
}

struct Shell {
    settings: Settings,
    view: View,
    discovery: DiscoveryPane,
    issuer: String,
    request: AuthRequestParams,
    pkce: Option<Pkce>,
    token: String,
    conversation: Conversation,
    relay: Option<GeminiRelay>,
}

impl Shell {
    fn new(settings: Settings) -> Self {
        Self {
            request: AuthRequestParams::from_settings(&settings.builder),
            settings,
            view: View::default(),
            discovery: DiscoveryPane::new(DiscoveryClient::new()),
            issuer: String::new(),
            pkce: None,
            token: String::new(),
            conversation: Conversation::new(),
            relay: None,
        }
    }

    async fn run(mut self) -> CommandResult<()> {
        println!("{}", "OIDC Master".bold());
        let mut items: Vec<&str> = View::ALL.iter().map(|view| view.label()).collect();
        items.push("Quit");

        loop {
            println!();
            let current = View::ALL.iter().position(|v| *v == self.view).unwrap_or(0);
            let choice = Select::new()
                .with_prompt("View")
                .items(&items)
                .default(current)
                .interact()?;
            let Some(view) = View::ALL.get(choice).copied() else {
                return Ok(());
            };

            self.view = view;
            match view {
                View::Discovery => self.discovery_view()?,
                View::Builder => self.builder_view()?,
                View::Debugger => self.debugger_view()?,
                View::Assistant => self.assistant_view().await?,
            }
        }
    }

    fn discovery_view(&mut self) -> CommandResult<()> {
        self.print_discovery_state();

        let actions = [
            "Fetch issuer",
            "Fetch preset",
            "Show latest result",
            "Use authorization endpoint in Auth Builder",
            "Back",
        ];
        let action = Select::new()
            .with_prompt("Discovery")
            .items(&actions)
            .default(0)
            .interact()?;

        match action {
            0 => {
                let issuer = prompt("Issuer URL", &self.issuer)?;
                self.start_discovery(issuer);
            }
            1 => {
                let names: Vec<&str> = PRESETS.iter().map(|p| p.name).collect();
                let index = Select::new()
                    .with_prompt("Preset")
                    .items(&names)
                    .default(0)
                    .interact()?;
                let preset = &PRESETS[index];
                let issuer = if preset.is_template() {
                    prompt("Issuer URL (fill in the placeholder)", preset.url)?
                } else {
                    preset.url.to_string()
                };
                self.start_discovery(issuer);
            }
            2 => self.print_discovery_state(),
            3 => match self.discovery.authorization_endpoint() {
                Some(endpoint) => {
                    println!("{} {endpoint}", "Auth Builder endpoint set to".green());
                    self.request.endpoint = endpoint;
                }
                None => println!("{}", "No authorization endpoint discovered yet".dimmed()),
            },
            _ => {}
        }
        Ok(())
    }

    fn start_discovery(&mut self, issuer: String) {
        let issuer = issuer.trim().to_string();
        if issuer.is_empty() {
            println!("{}", "Enter an OIDC issuer URL".yellow());
            return;
        }
        self.discovery.start(&issuer);
        println!(
            "{}",
            format!("Fetching {issuer} in the background; choose \"Show latest result\" to view it")
                .dimmed()
        );
        self.issuer = issuer;
    }

    fn print_discovery_state(&self) {
        match self.discovery.state() {
            None => println!("{}", "No discovery document fetched yet".dimmed()),
            Some(PaneState::Loading { target }) => {
                println!("{}", format!("Loading {target}...").dimmed())
            }
            Some(PaneState::Done(Ok(doc))) => print!("{}", render::discovery(&doc)),
            Some(PaneState::Done(Err(message))) => println!("{}", message.red()),
        }
    }

    fn builder_view(&mut self) -> CommandResult<()> {
        let request = &mut self.request;
        request.endpoint = prompt("Authorization endpoint", &request.endpoint)?;
        request.client_id = prompt("Client ID", &request.client_id)?;
        request.redirect_uri = prompt("Redirect URI", &request.redirect_uri)?;
        request.scope = prompt("Scope", &request.scope)?;

        let labels: Vec<&str> = RESPONSE_TYPES.iter().map(|(_, label)| *label).collect();
        let current = RESPONSE_TYPES
            .iter()
            .position(|(value, _)| *value == request.response_type)
            .unwrap_or(0);
        let index = Select::new()
            .with_prompt("Response type")
            .items(&labels)
            .default(current)
            .interact()?;
        request.response_type = RESPONSE_TYPES[index].0.to_string();

        if Confirm::new()
            .with_prompt("Regenerate state and nonce?")
            .default(false)
            .interact()?
        {
            request.regenerate_secrets(self.settings.builder.random_length);
        }

        let use_pkce = Confirm::new()
            .with_prompt("Attach a PKCE (S256) challenge?")
            .default(self.pkce.is_some())
            .interact()?;
        if !use_pkce {
            self.pkce = None;
        } else if self.pkce.is_none() {
            self.pkce = Some(Pkce::generate());
        }

        let request = match &self.pkce {
            Some(pkce) => self.request.clone().with_pkce(pkce),
            None => self.request.clone(),
        };
        let url = request.generate();

        println!();
        println!("{}", "Generated URL".bold().cyan());
        println!("{}", render::generated_url(&url));
        println!("{} {}", "state:".dimmed(), request.state);
        println!("{} {}", "nonce:".dimmed(), request.nonce);
        if let (Some(pkce), true) = (&self.pkce, url.is_actionable()) {
            println!("{} {}", "code_verifier:".dimmed(), pkce.verifier());
        }

        if url.is_actionable()
            && Confirm::new()
                .with_prompt("Open in browser?")
                .default(false)
                .interact()?
        {
            if let Err(err) = build::open_in_browser(&url) {
                println!("{} {err}", "Could not open the browser:".yellow());
            }
        }
        Ok(())
    }

    fn debugger_view(&mut self) -> CommandResult<()> {
        self.token = prompt("Encoded token", &self.token)?;
        if self.token.trim().is_empty() {
            println!("{}", "Paste a JWT to decode it".dimmed());
            return Ok(());
        }

        match decode::render_token(&self.token, oidc_master_token::time::now_epoch()) {
            Ok(rendered) => print!("{rendered}"),
            Err(message) => println!("{}", message.to_string().red()),
        }
        Ok(())
    }

    async fn assistant_view(&mut self) -> CommandResult<()> {
        if self.relay.is_none() {
            match ask::relay(&self.settings.assistant) {
                Ok(relay) => self.relay = Some(relay),
                Err(message) => {
                    println!("{}", message.to_string().yellow());
                    return Ok(());
                }
            }
        }
        let Some(relay) = &self.relay else {
            return Ok(());
        };

        for message in self.conversation.messages() {
            println!("{}", render::message(message));
        }

        loop {
            let input = prompt("Ask (empty to go back)", "")?;
            if input.trim().is_empty() {
                return Ok(());
            }
            println!("{}", "Thinking...".dimmed());
            if let Some(reply) = self.conversation.ask(relay, &input).await {
                println!("{}", render::message(reply));
            }
        }
    }
}

fn prompt(label: &str, initial: &str) -> CommandResult<String> {
    let value = Input::<String>::new()
        .with_prompt(label)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()?;
    Ok(value)
}
