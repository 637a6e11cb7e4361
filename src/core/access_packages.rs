use crate::config::ClientConfig;
use crate::core::client::{ApiVersion, Client, RequestInput, Uri};
use crate::domain::entitlement::AccessPackage;
use crate::domain::odata::{Collection, Query};
use crate::domain::ports::Authorizer;
use crate::utils::error::{GraphError, Result};
use crate::utils::validation::validate_resource_id;
use reqwest::StatusCode;
use std::sync::Arc;

const ENTITY: &str = "/identityGovernance/entitlementManagement/accessPackages";

#[derive(Debug, Clone)]
pub struct AccessPackageClient {
    pub base_client: Client,
}

impl AccessPackageClient {
    pub fn new(config: &ClientConfig, authorizer: Arc<dyn Authorizer>) -> Result<Self> {
        Ok(Self {
            base_client: Client::new(config, ApiVersion::Beta, authorizer)?,
        })
    }

    pub async fn list(&self, query: &Query) -> Result<Vec<AccessPackage>> {
        let response = self
            .base_client
            .get(RequestInput::new(
                Uri::tenant(ENTITY).with_params(query.params()),
                &[StatusCode::OK],
            ))
            .await?;
        Ok(response.json::<Collection<AccessPackage>>()?.into_vec())
    }

    pub async fn get(&self, id: &str) -> Result<AccessPackage> {
        validate_resource_id(id)?;
        self.base_client
            .get(RequestInput::new(
                Uri::tenant(ENTITY).segment(id),
                &[StatusCode::OK],
            ))
            .await?
            .json()
    }

    pub async fn create(&self, access_package: &AccessPackage) -> Result<AccessPackage> {
        if access_package.catalog_id.is_none() {
            return Err(GraphError::validation(
                "an access package must be created inside a catalog",
            ));
        }
        self.base_client
            .post(
                RequestInput::new(Uri::tenant(ENTITY), &[StatusCode::CREATED])
                    .with_json(access_package)?,
            )
            .await?
            .json()
    }

    pub async fn update(&self, access_package: &AccessPackage) -> Result<()> {
        let id = access_package
            .id
            .as_deref()
            .ok_or_else(|| GraphError::validation("cannot update an access package without an ID"))?;
        validate_resource_id(id)?;
        self.base_client
            .patch(
                RequestInput::new(
                    Uri::tenant(ENTITY).segment(id),
                    &[StatusCode::NO_CONTENT],
                )
                .with_json(access_package)?,
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
