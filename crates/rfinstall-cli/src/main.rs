//! CLI entry point - the composition root.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use rfinstall_cli::{Cli, CliError, Commands, StdoutLogSink, handlers};
use rfinstall_runtime::PathDependencyProbe;

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("rfinstall=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rfinstall=info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let sink = StdoutLogSink;
    let config = cli.config.as_deref();

    match &cli.command {
        Commands::Install(args) => handlers::install::execute(config, args, &sink).await?,
        Commands::Login(args) => handlers::login::execute(config, args, &sink).await?,
        Commands::CheckDeps => handlers::check_deps::execute(config, &PathDependencyProbe)?,
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            let code = err.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            ExitCode::from(code)
        }
    }
}
