use crate::config::ClientConfig;
use crate::core::client::{ApiVersion, Client, RequestInput, Uri};
use crate::domain::entitlement::AccessPackageAssignmentPolicy;
use crate::domain::odata::{Collection, Query};
use crate::domain::ports::Authorizer;
use crate::utils::error::{GraphError, Result};
use crate::utils::validation::validate_resource_id;
use reqwest::StatusCode;
use std::sync::Arc;

const ENTITY: &str = "/identityGovernance/entitlementManagement/accessPackageAssignmentPolicies";

#[derive(Debug, Clone)]
pub struct AccessPackageAssignmentPolicyClient {
    pub base_client: Client,
}

impl AccessPackageAssignmentPolicyClient {
    pub fn new(config: &ClientConfig, authorizer: Arc<dyn Authorizer>) -> Result<Self> {
        Ok(Self {
            base_client: Client::new(config, ApiVersion::Beta, authorizer)?,
        })
    }

    pub async fn list(&self, query: &Query) -> Result<Vec<AccessPackageAssignmentPolicy>> {
        let response = self
            .base_client
            .get(RequestInput::new(
                Uri::tenant(ENTITY).with_params(query.params()),
                &[StatusCode::OK],
            ))
            .await?;
        Ok(response
            .json::<Collection<AccessPackageAssignmentPolicy>>()?
            .into_vec())
    }

    pub async fn get(&self, id: &str) -> Result<AccessPackageAssignmentPolicy> {
        validate_resource_id(id)?;
        self.base_client
            .get(RequestInput::new(
                Uri::tenant(ENTITY).segment(id),
                &[StatusCode::OK],
            ))
            .await?
            .json()
    }

    pub async fn create(
        &self,
        policy: &AccessPackageAssignmentPolicy,
    ) -> Result<AccessPackageAssignmentPolicy> {
        if policy.access_package_id.is_none() {
            return Err(GraphError::validation(
                "an assignment policy must reference an access package",
            ));
        }
        self.base_client
            .post(RequestInput::new(Uri::tenant(ENTITY), &[StatusCode::CREATED]).with_json(policy)?)
            .await?
            .json()
    }

    /// Policies are replaced wholesale; the service answers with the stored policy.
    pub async fn update(
        &self,
        policy: &AccessPackageAssignmentPolicy,
    ) -> Result<AccessPackageAssignmentPolicy> {
        let id = policy
            .id
            .as_deref()
            .ok_or_else(|| GraphError::validation("cannot update a policy without an ID"))?;
        validate_resource_id(id)?;
        self.base_client
            .put(
                RequestInput::new(Uri::tenant(ENTITY).segment(id), &[StatusCode::OK])
                    .with_json(policy)?,
            )
            .await?
            .json()
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
