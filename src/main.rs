use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

use parley::agent::{Agent, DEFAULT_BOT_NAME};
use parley::prompt::CliclackPrompt;
use parley::providers::configs::OpenAiProviderConfig;
use parley::providers::openai::OpenAiProvider;
use parley::session::Session;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// OpenAI API Key (can also be set via OPENAI_API_KEY environment variable)
    #[arg(short, long)]
    api_key: Option<String>,

    /// API host (defaults to OPENAI_API_HOST or the public OpenAI endpoint)
    #[arg(long)]
    host: Option<String>,

    /// Model to use (defaults to OPENAI_MODEL)
    #[arg(short, long)]
    model: Option<String>,

    /// Name the assistant introduces itself with
    #[arg(short, long, default_value = DEFAULT_BOT_NAME)]
    name: String,

    /// Sampling temperature
    #[arg(short, long)]
    temperature: Option<f32>,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_directive = if verbose { "parley=debug" } else { "parley=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = OpenAiProviderConfig::with_overrides(
        cli.api_key.clone(),
        cli.host.clone(),
        cli.model.clone(),
    )
    .context("API key must be provided via --api-key or OPENAI_API_KEY environment variable")?
    .with_temperature(cli.temperature);
    let provider = OpenAiProvider::new(config)?;
    let agent = Agent::init(cli.name.clone(), Box::new(provider));

    println!(
        "{} {}",
        style(&cli.name).cyan().bold(),
        style("- type \"quit\" to end the session").dim()
    );
    println!();

    let mut session = Session::new(agent, CliclackPrompt::new(cli.name.clone()));
    session.start()
}
