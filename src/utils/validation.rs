use crate::utils::error::{GraphError, Result};
use regex::Regex;
use std::sync::OnceLock;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(GraphError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(GraphError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(GraphError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

fn uuid_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
            .expect("static uuid pattern")
    })
}

fn domain_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?\.)+[a-zA-Z]{2,}$")
            .expect("static domain pattern")
    })
}

pub fn is_uuid(value: &str) -> bool {
    uuid_pattern().is_match(value)
}

/// Tenants are addressed either by directory GUID or by a verified domain name.
pub fn validate_tenant_id(field_name: &str, tenant_id: &str) -> Result<()> {
    if tenant_id.is_empty() {
        return Err(GraphError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: tenant_id.to_string(),
            reason: "Tenant ID cannot be empty".to_string(),
        });
    }

    if is_uuid(tenant_id) || domain_pattern().is_match(tenant_id) {
        Ok(())
    } else {
        Err(GraphError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: tenant_id.to_string(),
            reason: "Expected a UUID or a domain name".to_string(),
        })
    }
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(GraphError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_not_blank(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(GraphError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be blank".to_string(),
        });
    }
    Ok(())
}

/// Resource IDs end up as a single path segment.
pub fn validate_resource_id(id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(GraphError::validation("resource ID cannot be empty"));
    }
    if id == "." || id == ".." {
        return Err(GraphError::validation(format!(
            "resource ID '{}' is a relative path segment",
            id
        )));
    }
    if id.contains(['/', '\\', '?', '#', '%']) {
        return Err(GraphError::validation(format!(
            "resource ID '{}' contains reserved URL characters",
            id
        )));
    }
    Ok(())
}
