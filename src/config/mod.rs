#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};

pub use toml_config::{AuthConfig, SdkConfig};

/// National cloud the tenant lives in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Global,
    #[cfg_attr(feature = "cli", value(name = "usgov"))]
    UsGov,
    China,
}

impl Environment {
    pub fn graph_endpoint(&self) -> &'static str {
        match self {
            Environment::Global => "https://graph.microsoft.com",
            Environment::UsGov => "https://graph.microsoft.us",
            Environment::China => "https://microsoftgraph.chinacloudapi.cn",
        }
    }
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("graph-sdk/{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub tenant_id: String,
    #[serde(default)]
    pub environment: Environment,
    /// Overrides the environment's endpoint, e.g. to point at a proxy.
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(tenant_id: impl Into<String>) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            environment: Environment::default(),
            endpoint: None,
            timeout_seconds: default_timeout_seconds(),
            user_agent: default_user_agent(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint
            .as_deref()
            .unwrap_or_else(|| self.environment.graph_endpoint())
            .trim_end_matches('/')
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("client.endpoint", self.endpoint())?;
        validation::validate_tenant_id("client.tenant_id", &self.tenant_id)?;
        validation::validate_positive_number("client.timeout_seconds", self.timeout_seconds, 1)?;
        validation::validate_not_blank("client.user_agent", &self.user_agent)?;
        Ok(())
    }
}
