use crate::config::ClientConfig;
use crate::core::client::{ApiVersion, Client, RequestInput, Uri};
use crate::domain::entitlement::AccessPackageCatalog;
use crate::domain::odata::{Collection, Query};
use crate::domain::ports::Authorizer;
use crate::utils::error::{GraphError, Result};
use crate::utils::validation::validate_resource_id;
use reqwest::StatusCode;
use std::sync::Arc;

const ENTITY: &str = "/identityGovernance/entitlementManagement/accessPackageCatalogs";

#[derive(Debug, Clone)]
pub struct AccessPackageCatalogClient {
    pub base_client: Client,
}

impl AccessPackageCatalogClient {
    pub fn new(config: &ClientConfig, authorizer: Arc<dyn Authorizer>) -> Result<Self> {
        Ok(Self {
            base_client: Client::new(config, ApiVersion::Beta, authorizer)?,
        })
    }

    pub async fn list(&self, query: &Query) -> Result<Vec<AccessPackageCatalog>> {
        let response = self
            .base_client
            .get(RequestInput::new(
                Uri::tenant(ENTITY).with_params(query.params()),
                &[StatusCode::OK],
            ))
            .await?;
        Ok(response.json::<Collection<AccessPackageCatalog>>()?.into_vec())
    }

    pub async fn get(&self, id: &str) -> Result<AccessPackageCatalog> {
        validate_resource_id(id)?;
        self.base_client
            .get(RequestInput::new(
                Uri::tenant(ENTITY).segment(id),
                &[StatusCode::OK],
            ))
            .await?
            .json()
    }

    pub async fn create(&self, catalog: &AccessPackageCatalog) -> Result<AccessPackageCatalog> {
        self.base_client
            .post(RequestInput::new(Uri::tenant(ENTITY), &[StatusCode::CREATED]).with_json(catalog)?)
            .await?
            .json()
    }

    pub async fn update(&self, catalog: &AccessPackageCatalog) -> Result<()> {
        let id = catalog
            .id
            .as_deref()
            .ok_or_else(|| GraphError::validation("cannot update a catalog without an ID"))?;
        validate_resource_id(id)?;
        self.base_client
            .patch(
                RequestInput::new(
                    Uri::tenant(ENTITY).segment(id),
                    &[StatusCode::NO_CONTENT],
                )
                .with_json(catalog)?,
            )
            .await?;
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        validate_resource_id(id)?;
        self.base_client
            .delete(RequestInput::new(
                Uri::tenant(ENTITY).segment(id),
                &[StatusCode::OK, StatusCode::NO_CONTENT],
            ))
            .await?;
        Ok(())
    }
}
