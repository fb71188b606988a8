//! Pulse CLI - Weekly country-pair event summaries.

use clap::Parser;
use pulse_cli::commands;
use pulse_cli::{Cli, Command, Config, Formatter};

fn main() {
    // Log to stderr so command output on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> pulse_cli::Result<()> {
    let cli = Cli::parse();

    let config_path = Config::resolve_path(cli.config.as_deref())?;
    let config = Config::load(cli.config.as_deref())?;

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Run(args) => commands::execute_run(args, &config, &formatter),
        Command::Inspect(args) => commands::execute_inspect(args, &config, &formatter),
        Command::Config(args) => commands::execute_config(args, &config, &config_path, &formatter),
    }
}
