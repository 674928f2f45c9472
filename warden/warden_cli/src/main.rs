use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

/// Warden Command Line Interface
///
/// Runs access-control command scripts, executes single commands, and
/// inspects saved snapshots.
#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a command script against a store
    Run(commands::run::RunArgs),

    /// Execute a single command line
    Exec(commands::exec::ExecArgs),

    /// Print the registries stored in a snapshot
    Show(commands::show::ShowArgs),
}

/// Initialize logging to stderr, keeping stdout free for command output.
/// `RUST_LOG` overrides the supplied filter.
fn init_logging(filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => commands::run::execute_run(&args),
        Commands::Exec(args) => commands::exec::execute_exec(&args),
        Commands::Show(args) => commands::show::execute_show(&args),
    }
}
