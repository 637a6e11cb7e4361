use crate::config::ClientConfig;
use crate::core::client::{ApiVersion, Client, RequestInput, Uri};
use crate::domain::named_location::{CountryNamedLocation, IpNamedLocation, NamedLocation};
use crate::domain::odata::{self, OData, Query};
use crate::domain::ports::Authorizer;
use crate::utils::error::{GraphError, Result};
use crate::utils::validation::validate_resource_id;
use reqwest::StatusCode;
use std::sync::Arc;

const ENTITY: &str = "/identity/conditionalAccess/namedLocations";

/// Conditional access named locations (IP ranges and countries).
#[derive(Debug, Clone)]
pub struct NamedLocationsClient {
    pub base_client: Client,
}

impl NamedLocationsClient {
    pub fn new(config: &ClientConfig, authorizer: Arc<dyn Authorizer>) -> Result<Self> {
        Ok(Self {
            base_client: Client::new(config, ApiVersion::V1_0, authorizer)?,
        })
    }

    /// Lists named locations of both kinds, optionally filtered with an OData
    /// `$filter` expression. Entries of kinds this crate does not model are skipped.
    pub async fn list(&self, filter: Option<&str>) -> Result<Vec<NamedLocation>> {
        let query = filter.map(Query::filter).unwrap_or_default();
        let response = self
            .base_client
            .get(RequestInput::new(
                Uri::tenant(ENTITY).with_params(query.params()),
                &[StatusCode::OK],
            ))
            .await?;

        let data: OData = response.json()?;
        let mut locations = Vec::new();
        for item in data.value.unwrap_or_default() {
            match NamedLocation::from_value(item)? {
                Some(location) => locations.push(location),
                None => tracing::debug!("Skipping named location of unsupported type"),
            }
        }
        Ok(locations)
    }

    /// Retrieves a named location of whichever kind the service reports.
    pub async fn get(&self, id: &str) -> Result<NamedLocation> {
        validate_resource_id(id)?;
        let response = self
            .base_client
            .get(RequestInput::new(
                Uri::tenant(ENTITY).segment(id),
                &[StatusCode::OK],
            ))
            .await?;

        let value: serde_json::Value = response.json()?;
        let actual = value
            .get("@odata.type")
            .and_then(|t| t.as_str())
            .unwrap_or("<missing>")
            .to_string();
        NamedLocation::from_value(value)?.ok_or(GraphError::TypeMismatch {
            expected: "named location".to_string(),
            actual,
        })
    }

    pub async fn get_ip(&self, id: &str) -> Result<IpNamedLocation> {
        match self.get(id).await? {
            NamedLocation::Ip(location) => Ok(location),
            other => Err(GraphError::TypeMismatch {
                expected: odata::TYPE_IP_NAMED_LOCATION.to_string(),
                actual: other.odata_type().to_string(),
            }),
        }
    }

    pub async fn get_country(&self, id: &str) -> Result<CountryNamedLocation> {
        match self.get(id).await? {
            NamedLocation::Country(location) => Ok(location),
            other => Err(GraphError::TypeMismatch {
                expected: odata::TYPE_COUNTRY_NAMED_LOCATION.to_string(),
                actual: other.odata_type().to_string(),
            }),
        }
    }

    pub async fn create_ip(&self, mut location: IpNamedLocation) -> Result<IpNamedLocation> {
        location.odata_type = Some(odata::TYPE_IP_NAMED_LOCATION.to_string());
        let response = self
            .base_client
            .post(RequestInput::new(Uri::tenant(ENTITY), &[StatusCode::CREATED]).with_json(&location)?)
            .await?;
        response.json()
    }

    pub async fn create_country(
        &self,
        mut location: CountryNamedLocation,
    ) -> Result<CountryNamedLocation> {
        location.odata_type = Some(odata::TYPE_COUNTRY_NAMED_LOCATION.to_string());
        let response = self
            .base_client
            .post(RequestInput::new(Uri::tenant(ENTITY), &[StatusCode::CREATED]).with_json(&location)?)
            .await?;
        response.json()
    }

    pub async fn update_ip(&self, mut location: IpNamedLocation) -> Result<()> {
        let id = required_id(location.id.as_deref())?;
        location.odata_type = Some(odata::TYPE_IP_NAMED_LOCATION.to_string());
        self.base_client
            .patch(
                RequestInput::new(
                    Uri::tenant(ENTITY).segment(id),
                    &[StatusCode::NO_CONTENT],
                )
                .with_json(&location)?,
            )
            .await?;
        Ok(())
    }

    pub async fn update_country(&self, mut location: CountryNamedLocation) -> Result<()> {
        let id = required_id(location.id.as_deref())?;
        location.odata_type = Some(odata::TYPE_COUNTRY_NAMED_LOCATION.to_string());
        self.base_client
            .patch(
                RequestInput::new(
                    Uri::tenant(ENTITY).segment(id),
                    &[StatusCode::NO_CONTENT],
                )
                .with_json(&location)?,
            )
            .await?;
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        validate_resource_id(id)?;
        self.base_client
            .delete(RequestInput::new(
                Uri::tenant(ENTITY).segment(id),
                &[StatusCode::NO_CONTENT],
            ))
            .await?;
        Ok(())
    }
}

fn required_id(id: Option<&str>) -> Result<String> {
    let id = id.ok_or_else(|| GraphError::validation("cannot update a named location without an ID"))?;
    validate_resource_id(id)?;
    Ok(id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::named_location::IpRange;
    use crate::domain::ports::StaticToken;
    use httpmock::prelude::*;
    use httpmock::Method::PATCH;
    use serde_json::json;

    const PATH: &str = "/v1.0/contoso.onmicrosoft.com/identity/conditionalAccess/namedLocations";

    fn client(server: &MockServer) -> NamedLocationsClient {
        let config = ClientConfig::new("contoso.onmicrosoft.com").with_endpoint(server.base_url());
        NamedLocationsClient::new(&config, Arc::new(StaticToken::new("token"))).unwrap()
    }

    #[tokio::test]
    async fn test_list_mixed_kinds_skips_unknown() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path(PATH)
                .query_param("$filter", "displayName eq 'office'");
            then.status(200).json_body(json!({
                "value": [
                    {"@odata.type": "#microsoft.graph.ipNamedLocation", "id": "ip-1", "displayName": "office"},
                    {"@odata.type": "#microsoft.graph.compliantNetworkNamedLocation", "id": "cn-1"},
                    {"id": "untyped"},
                    {"@odata.type": "#microsoft.graph.countryNamedLocation", "id": "c-1", "displayName": "office"}
                ]
            }));
        });

        let locations = client(&server)
            .list(Some("displayName eq 'office'"))
            .await
            .unwrap();

        mock.assert();
        let ids: Vec<_> = locations.iter().filter_map(|l| l.id()).collect();
        assert_eq!(ids, vec!["ip-1", "c-1"]);
    }

    #[tokio::test]
    async fn test_list_without_value_is_empty() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path(PATH);
            then.status(200).json_body(json!({"@odata.context": "ctx"}));
        });

        let locations = client(&server).list(None).await.unwrap();
        assert!(locations.is_empty());
    }

    #[tokio::test]
    async fn test_create_ip_forces_discriminator() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path(PATH).json_body(json!({
                "@odata.type": "#microsoft.graph.ipNamedLocation",
                "displayName": "office",
                "isTrusted": true,
                "ipRanges": [{"@odata.type": "#microsoft.graph.iPv4CidrRange", "cidrAddress": "10.0.0.0/8"}]
            }));
            then.status(201).json_body(json!({
                "@odata.type": "#microsoft.graph.ipNamedLocation",
                "id": "ip-1",
                "displayName": "office",
                "isTrusted": true,
                "createdDateTime": "2024-01-02T03:04:05Z",
                "ipRanges": [{"@odata.type": "#microsoft.graph.iPv4CidrRange", "cidrAddress": "10.0.0.0/8"}]
            }));
        });

        let mut location = IpNamedLocation::new("office", vec![IpRange::cidr("10.0.0.0/8")]);
        location.odata_type = Some("#microsoft.graph.countryNamedLocation".to_string());
        location.is_trusted = Some(true);

        let created = client(&server).create_ip(location).await.unwrap();
        mock.assert();
        assert_eq!(created.id.as_deref(), Some("ip-1"));
        assert!(created.created_date_time.is_some());
    }

    #[tokio::test]
    async fn test_get_country_rejects_ip_location() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path(format!("{}/ip-1", PATH));
            then.status(200).json_body(json!({
                "@odata.type": "#microsoft.graph.ipNamedLocation",
                "id": "ip-1"
            }));
        });

        let err = client(&server).get_country("ip-1").await.unwrap_err();
        assert!(matches!(err, GraphError::TypeMismatch { .. }));
    }

    #[tokio::test]
    async fn test_update_requires_id() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(PATCH);
            then.status(204);
        });

        let err = client(&server)
            .update_country(CountryNamedLocation::new("x", vec![]))
            .await
            .unwrap_err();

        assert!(matches!(err, GraphError::ValidationError { .. }));
        mock.assert_hits(0);
    }

    #[tokio::test]
    async fn test_update_country_patches_by_id() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(PATCH)
                .path(format!("{}/c-1", PATH))
                .json_body_partial(r##"{"@odata.type": "#microsoft.graph.countryNamedLocation", "displayName": "renamed"}"##);
            then.status(204);
        });

        let mut location = CountryNamedLocation::new("renamed", vec!["US".to_string()]);
        location.id = Some("c-1".to_string());
        client(&server).update_country(location).await.unwrap();
        mock.assert();
    }

    #[tokio::test]
    async fn test_delete_rejects_relative_id() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(DELETE);
            then.status(204);
        });

        let client = client(&server);
        for id in ["..", ".", "%2e%2e", "..\\x"] {
            let err = client.delete(id).await.unwrap_err();
            assert!(matches!(err, GraphError::ValidationError { .. }), "{}", id);
        }
        mock.assert_hits(0);
    }
}
