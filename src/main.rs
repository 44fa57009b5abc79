use clap::Parser;
use pricewatch::cli::{run, Cli};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);
    run(cli)
}

/// Diagnostics go to stderr; `RUST_LOG` overrides the default level.
fn init_tracing(debug: bool) {
    let default = if debug { "pricewatch=debug" } else { "pricewatch=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
