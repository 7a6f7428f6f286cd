// Entrypoint for the CLI application.
// - Keeps `main` small: parse flags, set up logging and hand over to `ui::run`.
// - Usage errors are reported by clap before anything touches the network.

use clap::Parser;
use domjudge_cli::{cli::Cli, ui};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    ui::run(&cli)
}

/// `RUST_LOG` wins; otherwise `-v` selects info and the default is warn.
fn setup_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
