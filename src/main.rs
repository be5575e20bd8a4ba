use clap::Parser;
use notedeck::cli::{
    handle_completions, handle_config_init, handle_endpoint, handle_health, handle_notes,
    load_config, Cli, Commands, ConfigCommands,
};
use notedeck::dispatch::Dispatcher;
use notedeck::notes::NotesClient;
use std::sync::Arc;

type CommandResult = Result<String, Box<dyn std::error::Error>>;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Config(ConfigCommands::Init(args)) => handle_config_init(args),
        Commands::Completions(args) => {
            handle_completions(args);
            Ok(String::new())
        }
        command => run_client_command(&cli, command).await,
    };

    match result {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Commands that talk to the note API backends.
async fn run_client_command(cli: &Cli, command: &Commands) -> CommandResult {
    let config = load_config(&cli.global)?;

    if let Err(e) = notedeck::logging::init_tracing(&config.logging) {
        eprintln!("Warning: logging disabled: {}", e);
    }
    for component in config.logging.unknown_components() {
        tracing::warn!(component, "Log level set for a component that emits no logs");
    }
    tracing::debug!(endpoints = ?config.client.endpoints, "Configuration loaded");

    let metrics = if cli.global.metrics {
        Some(notedeck::metrics::setup_metrics()?)
    } else {
        None
    };

    let dispatcher = Arc::new(Dispatcher::from_config(&config.client));

    let result = match command {
        Commands::Notes(cmd) => handle_notes(cmd, &NotesClient::new(dispatcher)).await,
        Commands::Health(args) => handle_health(args, &dispatcher).await,
        Commands::Endpoint(args) => handle_endpoint(args, &dispatcher).await,
        Commands::Config(_) | Commands::Completions(_) => Ok(String::new()),
    };

    // Counters are reported for failed commands too
    if let Some(handle) = metrics {
        eprintln!("{}", handle.render());
    }

    result
}
