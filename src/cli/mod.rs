pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "planner")]
#[command(about = "Planner CLI - operator commands for the Life Planner API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(long, global = true, help = "Output in YAML format")]
    pub yaml: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Delete every document from the application collections (admins are kept)")]
    Wipe {
        #[arg(long, help = "Confirm the wipe; nothing is deleted without it")]
        yes: bool,
    },

    #[command(about = "Create collections and indexes in the configured store")]
    Init,

    #[command(about = "Print the collection catalogue with scoping keys and indexes")]
    Schema {
        #[arg(long, help = "Show a single collection")]
        collection: Option<String>,
    },

    #[command(about = "Probe a running server's health and readiness endpoints")]
    Health {
        #[arg(long, help = "Server base URL (defaults to the configured bind address)")]
        server: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else if cli.yaml {
            OutputFormat::Yaml
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Wipe { yes } => commands::wipe::handle(yes, output_format).await,
        Commands::Init => commands::init::handle(output_format).await,
        Commands::Schema { collection } => commands::schema::handle(collection, output_format),
        Commands::Health { server } => commands::health::handle(server, output_format).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_flags_select_format() {
        let cli = Cli::parse_from(["planner", "--yaml", "schema"]);
        assert_eq!(OutputFormat::from_cli(&cli), OutputFormat::Yaml);

        let cli = Cli::parse_from(["planner", "wipe", "--yes", "--json"]);
        assert_eq!(OutputFormat::from_cli(&cli), OutputFormat::Json);
        assert!(matches!(cli.command, Commands::Wipe { yes: true }));

        let cli = Cli::parse_from(["planner", "health"]);
        assert_eq!(OutputFormat::from_cli(&cli), OutputFormat::Text);
    }
}
