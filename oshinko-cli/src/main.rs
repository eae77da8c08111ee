//! Oshinko CLI
//!
//! Command-line interface for removing Oshinko clusters from OpenShift

mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::delete::DeleteArgs;
use output::OutputFormat;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Namespace to operate in (defaults to the current context's namespace)
    #[arg(short, long, global = true)]
    namespace: Option<String>,

    /// Kubeconfig context to use
    #[arg(long, global = true)]
    context: Option<String>,

    /// Output format (table, json, yaml)
    #[arg(short, long, global = true)]
    output: Option<String>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Delete a cluster: scale it down, then remove all of its objects
    Delete {
        /// Cluster name
        name: String,
        /// Only remove objects with this role label
        #[arg(long)]
        role: Option<String>,
        /// Polls per controller while waiting for pods to stop
        #[arg(long)]
        wait_attempts: Option<u32>,
        /// Delay between polls in milliseconds
        #[arg(long)]
        wait_interval_ms: Option<u64>,
    },
    /// Generate shell completions
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run(Cli::parse()).await {
        output::print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = config::Config::load()?;

    let _log_guard = config
        .logging(log_level(cli.verbose, &config.log_level))
        .init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))?;

    let output_format =
        OutputFormat::from_str(cli.output.as_deref().unwrap_or(&config.default_output));

    match cli.command {
        Commands::Delete {
            name,
            role,
            wait_attempts,
            wait_interval_ms,
        } => {
            let args = DeleteArgs {
                name,
                role,
                namespace: cli.namespace,
                context: cli.context,
                wait_attempts,
                wait_interval_ms,
            };
            commands::delete::handle_delete_command(args, &config, output_format).await?
        }
        Commands::Completions { shell } => {
            generate_completions(shell);
        }
    }

    Ok(())
}

fn log_level(verbose: u8, configured: &str) -> String {
    match verbose {
        0 => configured.to_string(),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Generate shell completions
fn generate_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();

    generate(shell, &mut cmd, name, &mut io::stdout());
}
