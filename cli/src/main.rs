//! aks-node-controller - provisions an AKS worker node and records the outcome

use std::process::ExitCode;

use aks_node_controller::cli::Cli;
use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.run().await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "aks-node-controller failed");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
