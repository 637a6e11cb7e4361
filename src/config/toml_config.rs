use crate::config::ClientConfig;
use crate::domain::ports::{Anonymous, Authorizer, StaticToken};
use crate::utils::error::{GraphError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SdkConfig {
    pub client: ClientConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Pre-acquired bearer token. Usually given as `${GRAPH_TOKEN}`.
    pub access_token: Option<String>,
}

impl AuthConfig {
    pub fn authorizer(&self) -> Arc<dyn Authorizer> {
        match &self.access_token {
            Some(token) => Arc::new(StaticToken::new(token.clone())),
            None => Arc::new(Anonymous),
        }
    }
}

impl SdkConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| GraphError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GRAPH_TOKEN})
    ///
    /// Unset variables are left as written so that validation can point at them.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| GraphError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for SdkConfig {
    fn validate(&self) -> Result<()> {
        self.client.validate()?;

        if let Some(token) = &self.auth.access_token {
            validation::validate_not_blank("auth.access_token", token)?;
            if token.starts_with("${") && token.ends_with('}') {
                return Err(GraphError::InvalidConfigValueError {
                    field: "auth.access_token".to_string(),
                    value: token.clone(),
                    reason: "Environment variable is not set".to_string(),
                });
            }
        }

        Ok(())
    }
}
