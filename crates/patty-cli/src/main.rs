//! patty CLI

use clap::Parser;
use crossterm::style::Stylize;
use tracing_subscriber::EnvFilter;

use patty_cli::cmd;
use patty_cli::{Cli, Commands};

fn main() {
    // Logs go to stderr so they never mix with the spinner on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let project_dir = cli.project_dir.as_deref();

    let result = match cli.command {
        Commands::Init => cmd::init::init(project_dir),
        Commands::Install { packages } => cmd::install::install(project_dir, &packages),
        Commands::Remove { package } => cmd::remove::remove(project_dir, &package),
        Commands::Update => cmd::update::update(project_dir),
    };

    if let Err(e) = result {
        eprintln!("\n{} {e}", "Error:".red().bold());
        std::process::exit(1);
    }
}
