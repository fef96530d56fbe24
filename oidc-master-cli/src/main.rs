use clap::{Parser, Subcommand};
use colored::Colorize;
use oidc_master_cli::commands::ask::AskArgs;
use oidc_master_cli::commands::build::BuildArgs;
use oidc_master_cli::commands::decode::DecodeArgs;
use oidc_master_cli::commands::discover::DiscoverArgs;
use oidc_master_cli::commands::random::RandomArgs;
use oidc_master_cli::commands::{ask, block_on, build, decode, discover, random, shell, CommandResult};
use oidc_master_core::{init_tracing, Config};
use oidc_master_oidc::DiscoveryClient;

#[derive(Parser)]
#[command(
    name = "oidc-master",
    version,
    about = "OIDC Master - explore discovery documents, build authorization requests and debug JWTs"
)]
struct Cli {
    /// Configuration profile (OIDC_MASTER_PROFILE takes precedence)
    #[arg(long, global = true, default_value = "dev")]
    profile: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch an issuer's OpenID configuration
    Discover(DiscoverArgs),
    /// List well-known issuers
    Presets,
    /// Build an authorization request URL
    Build(BuildArgs),
    /// Decode a JWT without verifying it
    Decode(DecodeArgs),
    /// Ask the OIDC assistant
    Ask(AskArgs),
    /// Generate random state / nonce values
    Random(RandomArgs),
    /// Interactive mode (default)
    Shell,
}

fn run(cli: Cli) -> CommandResult<()> {
    let config = Config::load(&cli.profile)?;
    let settings = config.settings()?;
    init_tracing(settings.logging.filter.as_deref());

    let output = match cli.command.unwrap_or(Commands::Shell) {
        Commands::Discover(args) => {
            block_on(async { discover::run(&args, &DiscoveryClient::new()).await })??
        }
        Commands::Presets => discover::presets(),
        Commands::Build(args) => build::run(&args, &settings.builder)?,
        Commands::Decode(args) => decode::run(&args)?,
        Commands::Ask(args) => {
            let relay = ask::relay(&settings.assistant)?;
            block_on(async { ask::run(&args, &relay).await })??
        }
        Commands::Random(args) => random::run(&args, settings.builder.random_length),
        Commands::Shell => return shell::run(settings),
    };

    print!("{output}");
    if !output.is_empty() && !output.ends_with('\n') {
        println!();
    }
    Ok(())
}

fn main() {
    if let Err(e) = run(Cli::parse()) {
        eprintln!("{}", format!("Error: {e}").red());
        std::process::exit(1);
    }
}
