use crate::config::ClientConfig;
use crate::core::client::{ApiVersion, Client, RequestInput, Uri};
use crate::domain::entitlement::AccessPackageAssignmentRequest;
use crate::domain::odata::{Collection, Query};
use crate::domain::ports::Authorizer;
use crate::utils::error::{GraphError, Result};
use crate::utils::validation::validate_resource_id;
use reqwest::StatusCode;
use std::sync::Arc;

const ENTITY: &str = "/identityGovernance/entitlementManagement/accessPackageAssignmentRequests";

#[derive(Debug, Clone)]
pub struct AccessPackageAssignmentRequestClient {
    pub base_client: Client,
}

impl AccessPackageAssignmentRequestClient {
    pub fn new(config: &ClientConfig, authorizer: Arc<dyn Authorizer>) -> Result<Self> {
        Ok(Self {
            base_client: Client::new(config, ApiVersion::Beta, authorizer)?,
        })
    }

    pub async fn list(&self, query: &Query) -> Result<Vec<AccessPackageAssignmentRequest>> {
        let response = self
            .base_client
            .get(RequestInput::new(
                Uri::tenant(ENTITY).with_params(query.params()),
                &[StatusCode::OK],
            ))
            .await?;
        Ok(response
            .json::<Collection<AccessPackageAssignmentRequest>>()?
            .into_vec())
    }

    pub async fn get(&self, id: &str) -> Result<AccessPackageAssignmentRequest> {
        validate_resource_id(id)?;
        self.base_client
            .get(RequestInput::new(
                Uri::tenant(ENTITY).segment(id),
                &[StatusCode::OK],
            ))
            .await?
            .json()
    }

    /// Submits a request. The returned value carries the ID and state the service assigned.
    pub async fn create(
        &self,
        request: &AccessPackageAssignmentRequest,
    ) -> Result<AccessPackageAssignmentRequest> {
        if request.request_type.is_none() {
            return Err(GraphError::validation("an assignment request needs a request type"));
        }
        if request.access_package_assignment.is_none() {
            return Err(GraphError::validation(
                "an assignment request needs an access package assignment",
            ));
        }
        let created: AccessPackageAssignmentRequest = self
            .base_client
            .post(RequestInput::new(Uri::tenant(ENTITY), &[StatusCode::CREATED]).with_json(request)?)
            .await?
            .json()?;
        tracing::debug!(
            "Assignment request {:?} created in state {:?}",
            created.id,
            created.state
        );
        Ok(created)
    }

    pub async fn cancel(&self, id: &str) -> Result<()> {
        validate_resource_id(id)?;
        self.base_client
            .post(RequestInput::new(
                Uri::tenant(ENTITY).segment(id).segment("cancel"),
                &[StatusCode::OK, StatusCode::NO_CONTENT],
            ))
            .await?;
        Ok(())
    }

    /// Only requests in a final state can be deleted; see
    /// [`AccessPackageAssignmentRequest::is_deletable`].
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
