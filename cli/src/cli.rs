//! CLI argument parsing with clap derive

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::AppContext;
use crate::commands;

/// Provisions an AKS worker node and records the outcome
#[derive(Parser)]
#[command(
    name = "aks-node-controller",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the provisioning script and record its outcome
    Provision(commands::provision::ProvisionArgs),

    /// Wait for provisioning to complete and print the result
    ProvisionWait(commands::provision_wait::ProvisionWaitArgs),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails in a way it cannot record.
    pub async fn run(self) -> Result<ExitCode> {
        match self.command {
            Command::Version => {
                commands::version::run();
                Ok(ExitCode::SUCCESS)
            }
            Command::Provision(args) => {
                let app = AppContext::new();
                crate::logging::init(app.paths.agent_log());
                commands::provision::run(&app, &args).await
            }
            Command::ProvisionWait(args) => {
                let app = AppContext::new();
                crate::logging::init(app.paths.agent_log());
                commands::provision_wait::run(&app, &args).await
            }
        }
    }
}
