//! `mcprestapis` — MCP stdio server entry point.
//!
//! Subcommands:
//! - `serve`: run the tool server on stdin/stdout
//! - `install`: register this executable with the host application

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use mcp_rest_apis::{Config, FatalError};

#[derive(Parser, Debug)]
#[command(name = "mcprestapis")]
#[command(version, about = "MCP server for making REST API requests", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the MCP server on stdio
    Serve {
        /// JSON configuration file
        #[arg(short, long, env = "MCPRESTAPIS_CONFIG")]
        config: Option<PathBuf>,
    },
    /// Register this server in the host application's config
    Install {
        /// Write to this host config file instead of the platform default
        #[arg(long)]
        host_config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let result = match args.command {
        Command::Serve { config } => serve(config).await,
        Command::Install { host_config } => install(host_config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn serve(config_path: Option<PathBuf>) -> Result<(), FatalError> {
    let config = Config::load(config_path.as_deref())?;
    mcp_rest_apis::observability::init_tracing(&config.observability);

    tracing::info!(
        base_dir = %config.store.base_dir.display(),
        audit_log = %config.audit.log_path.display(),
        "starting MCP Rest APIs server"
    );

    let server = mcp_rest_apis::build_server(&config)?;

    let cancel = server.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    server.serve_stdio().await?;
    Ok(())
}

fn install(host_config: Option<PathBuf>) -> Result<(), FatalError> {
    mcp_rest_apis::observability::init_tracing(&Default::default());
    let path = mcp_rest_apis::install::install(host_config.as_deref())?;
    println!("Updated config at: {}", path.display());
    Ok(())
}
