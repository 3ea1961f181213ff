use clap::Parser;
use devenv::cli::{execute_command, Cli};

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = execute_command(cli) {
        eprintln!("devenv: {}", e);
        std::process::exit(1);
    }
}
