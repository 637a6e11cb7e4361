use crate::config::{ClientConfig, Environment, SdkConfig};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "graph-sdk")]
#[command(about = "Query and manage directory resources from the command line")]
pub struct CliConfig {
    /// TOML configuration file; flags override its values
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, env = "GRAPH_TENANT_ID")]
    pub tenant_id: Option<String>,

    #[arg(long, env = "GRAPH_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[arg(long, value_enum)]
    pub environment: Option<Environment>,

    #[arg(long)]
    pub endpoint: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Conditional access named locations
    #[command(subcommand)]
    NamedLocations(NamedLocationsCommand),
    /// Access package catalogs
    #[command(subcommand)]
    Catalogs(ListOnlyCommand),
    /// Access packages
    #[command(subcommand)]
    AccessPackages(ListOnlyCommand),
    /// Access package assignment policies
    #[command(subcommand)]
    Policies(ListOnlyCommand),
    /// Access package assignment requests
    #[command(subcommand)]
    Requests(RequestsCommand),
}

#[derive(Debug, Clone, Subcommand)]
pub enum NamedLocationsCommand {
    List {
        #[arg(long)]
        filter: Option<String>,
    },
    Get {
        id: String,
    },
    Delete {
        id: String,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ListOnlyCommand {
    List {
        #[arg(long)]
        filter: Option<String>,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum RequestsCommand {
    List {
        #[arg(long)]
        filter: Option<String>,
    },
    Get {
        id: String,
    },
    Cancel {
        id: String,
    },
    Delete {
        id: String,
    },
}

impl CliConfig {
    /// Merges the optional config file with command-line overrides.
    pub fn resolve(&self) -> Result<SdkConfig> {
        let mut sdk_config = match &self.config {
            Some(path) => SdkConfig::from_file(path)?,
            None => SdkConfig {
                client: ClientConfig::new(self.tenant_id.clone().unwrap_or_default()),
                auth: Default::default(),
            },
        };

        if let Some(tenant_id) = &self.tenant_id {
            sdk_config.client.tenant_id = tenant_id.clone();
        }
        if let Some(environment) = self.environment {
            sdk_config.client.environment = environment;
        }
        if let Some(endpoint) = &self.endpoint {
            sdk_config.client.endpoint = Some(endpoint.clone());
        }
        if let Some(token) = &self.token {
            sdk_config.auth.access_token = Some(token.clone());
        }

        sdk_config.validate()?;
        Ok(sdk_config)
    }
}
