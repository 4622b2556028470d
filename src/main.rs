use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use caresite::cms::CmsClient;
use caresite::config::{self, SiteConfig};
use caresite::mailer::ResendMailer;
use caresite::server::{self, AppState};

/// Full version string assembled at compile time: the bare release
/// version on tagged builds, version plus short git hash otherwise.
fn version_string() -> &'static str {
    env!("CARESITE_VERSION")
}

#[derive(Parser)]
#[command(name = "caresite", about = "Server-rendered multi-locale care-service website")]
struct Cli {
    /// Path to config.toml
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP server (the default).
    Serve,
    /// Load and validate the configuration, then exit.
    CheckConfig,
    /// Print a documented stock config.toml to stdout.
    GenConfig,
    /// Print the version and exit.
    Version,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            init_tracing();
            let config = SiteConfig::load(&cli.config)?;
            tracing::info!(version = %version_string(), cms = %config.cms.base_url, "starting");
            run(config)
        }
        Command::CheckConfig => {
            let config = SiteConfig::load(&cli.config)?;
            println!("config ok: {}", cli.config.display());
            println!("  server.bind    = {}", config.server.bind);
            println!("  cms.base_url   = {}", config.cms.base_url);
            println!("  mail.api_key   = {}", if config.mail.api_key.is_empty() {
                "(not set)"
            } else {
                "(set)"
            });
            Ok(())
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
            Ok(())
        }
        Command::Version => {
            println!("caresite {}", version_string());
            Ok(())
        }
    }
}

fn run(config: SiteConfig) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let state = AppState {
            content: Arc::new(CmsClient::new(&config.cms)),
            mailer: Arc::new(ResendMailer::new(&config.mail)),
            config: Arc::new(config),
        };
        server::serve(state).await
    })
}
