use crate::config::ClientConfig;
use crate::domain::odata::OData;
use crate::domain::ports::Authorizer;
use crate::utils::error::{GraphError, Result};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiVersion {
    V1_0,
    Beta,
}

impl ApiVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiVersion::V1_0 => "v1.0",
            ApiVersion::Beta => "beta",
        }
    }
}

/// Location of a resource relative to the versioned API root.
///
/// `segments` are appended after `entity` one path segment each, percent-encoded,
/// so caller-supplied IDs cannot change the path structure.
#[derive(Debug, Clone, Default)]
pub struct Uri {
    pub entity: String,
    pub segments: Vec<String>,
    pub params: Vec<(String, String)>,
    pub has_tenant_id: bool,
}

impl Uri {
    pub fn tenant(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            segments: Vec::new(),
            params: Vec::new(),
            has_tenant_id: true,
        }
    }

    pub fn segment(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    pub fn with_params(mut self, params: Vec<(String, String)>) -> Self {
        self.params = params;
        self
    }
}

#[derive(Debug, Clone)]
pub struct RequestInput {
    pub uri: Uri,
    pub body: Option<Vec<u8>>,
    pub valid_status_codes: Vec<StatusCode>,
}

impl RequestInput {
    pub fn new(uri: Uri, valid_status_codes: &[StatusCode]) -> Self {
        Self {
            uri,
            body: None,
            valid_status_codes: valid_status_codes.to_vec(),
        }
    }

    pub fn with_json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_vec(body)?);
        Ok(self)
    }
}

#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// Shared HTTP plumbing used by every resource client.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    endpoint: String,
    api_version: ApiVersion,
    tenant_id: String,
    authorizer: Arc<dyn Authorizer>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("endpoint", &self.endpoint)
            .field("api_version", &self.api_version)
            .field("tenant_id", &self.tenant_id)
            .finish()
    }
}

impl Client {
    pub fn new(
        config: &ClientConfig,
        api_version: ApiVersion,
        authorizer: Arc<dyn Authorizer>,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint().to_string(),
            api_version,
            tenant_id: config.tenant_id.clone(),
            authorizer,
        })
    }

    pub fn build_uri(&self, uri: &Uri) -> Result<Url> {
        let mut path = format!("{}/{}", self.endpoint, self.api_version.as_str());
        if uri.has_tenant_id {
            path.push('/');
            path.push_str(&self.tenant_id);
        }
        path.push_str(&uri.entity);

        let mut url = Url::parse(&path).map_err(|e| GraphError::InvalidConfigValueError {
            field: "client.endpoint".to_string(),
            value: path.clone(),
            reason: format!("Invalid URL format: {}", e),
        })?;
        if !uri.segments.is_empty() {
            url.path_segments_mut()
                .map_err(|_| GraphError::InvalidConfigValueError {
                    field: "client.endpoint".to_string(),
                    value: path.clone(),
                    reason: "URL cannot carry path segments".to_string(),
                })?
                .pop_if_empty()
                .extend(&uri.segments);
        }
        if !uri.params.is_empty() {
            url.query_pairs_mut().extend_pairs(uri.params.iter());
        }
        Ok(url)
    }

    /// GET, following `@odata.nextLink` until the collection is exhausted.
    ///
    /// The returned body is the first page with `value` replaced by the items of
    /// every page.
    pub async fn get(&self, input: RequestInput) -> Result<ApiResponse> {
        let url = self.build_uri(&input.uri)?;
        let mut seen = HashSet::from([url.to_string()]);
        let first = self
            .perform(Method::GET, url, None, &input.valid_status_codes)
            .await?;

        if first.status != StatusCode::OK {
            return Ok(first);
        }

        let mut page: serde_json::Value = match serde_json::from_slice(&first.body) {
            Ok(value) => value,
            Err(_) => return Ok(first),
        };
        let mut next_link = take_next_link(&mut page);
        if next_link.is_none() {
            return Ok(first);
        }

        let mut items = match page.get_mut("value").map(serde_json::Value::take) {
            Some(serde_json::Value::Array(items)) => items,
            _ => return Ok(first),
        };

        while let Some(link) = next_link {
            if !seen.insert(link.clone()) {
                tracing::warn!("Next link {} was already followed, stopping pagination", link);
                break;
            }
            tracing::debug!("Following next link: {}", link);
            let url = Url::parse(&link).map_err(|e| GraphError::ValidationError {
                message: format!("service returned an invalid next link '{}': {}", link, e),
            })?;
            let response = self
                .perform(Method::GET, url, None, &input.valid_status_codes)
                .await?;
            let next: OData = response.json()?;
            items.extend(next.value.unwrap_or_default());
            next_link = next.next_link;
        }

        tracing::debug!("Collected {} items across pages", items.len());
        page["value"] = serde_json::Value::Array(items);

        Ok(ApiResponse {
            status: first.status,
            body: serde_json::to_vec(&page)?,
        })
    }

    pub async fn post(&self, input: RequestInput) -> Result<ApiResponse> {
        self.send(Method::POST, input).await
    }

    pub async fn patch(&self, input: RequestInput) -> Result<ApiResponse> {
        self.send(Method::PATCH, input).await
    }

    pub async fn put(&self, input: RequestInput) -> Result<ApiResponse> {
        self.send(Method::PUT, input).await
    }

    pub async fn delete(&self, input: RequestInput) -> Result<ApiResponse> {
        self.send(Method::DELETE, input).await
    }

    async fn send(&self, method: Method, input: RequestInput) -> Result<ApiResponse> {
        let url = self.build_uri(&input.uri)?;
        self.perform(method, url, input.body.as_deref(), &input.valid_status_codes)
            .await
    }

    async fn perform(
        &self,
        method: Method,
        url: Url,
        body: Option<&[u8]>,
        valid_status_codes: &[StatusCode],
    ) -> Result<ApiResponse> {
        tracing::debug!("{} {}", method, url);

        let mut request = self
            .http
            .request(method.clone(), url.clone())
            .header(ACCEPT, "application/json");

        if let Some(token) = self.authorizer.token().await? {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        if let Some(body) = body {
            request = request
                .header(CONTENT_TYPE, "application/json")
                .body(body.to_vec());
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("{} {} -> {}", method, url, status);

        let body = response.bytes().await?.to_vec();

        if !valid_status_codes.contains(&status) {
            let odata_error = serde_json::from_slice::<OData>(&body)
                .ok()
                .and_then(|o| o.error);
            let (code, message) = match odata_error {
                Some(e) => (e.code, e.message),
                None => (None, None),
            };
            tracing::warn!(
                "Unexpected status {} for {} {} (code: {:?})",
                status,
                method,
                url,
                code
            );
            return Err(GraphError::UnexpectedStatus {
                status,
                code,
                message,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(ApiResponse { status, body })
    }
}

fn take_next_link(page: &mut serde_json::Value) -> Option<String> {
    let link = page
        .as_object_mut()?
        .remove("@odata.nextLink")?
        .as_str()
        .map(str::to_string);
    link.filter(|l| !l.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{Anonymous, StaticToken};
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_for(server: &MockServer, version: ApiVersion) -> Client {
        let config = ClientConfig::new("contoso.onmicrosoft.com").with_endpoint(server.base_url());
        Client::new(&config, version, Arc::new(StaticToken::new("secret"))).unwrap()
    }

    #[test]
    fn test_build_uri() {
        let config = ClientConfig::new("contoso.onmicrosoft.com");
        let client = Client::new(&config, ApiVersion::V1_0, Arc::new(Anonymous)).unwrap();

        let url = client
            .build_uri(&Uri::tenant("/identity/conditionalAccess/namedLocations"))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://graph.microsoft.com/v1.0/contoso.onmicrosoft.com/identity/conditionalAccess/namedLocations"
        );

        let uri = Uri {
            entity: "/me".to_string(),
            params: vec![("$filter".to_string(), "displayName eq 'a b'".to_string())],
            has_tenant_id: false,
            ..Uri::default()
        };
        let url = client.build_uri(&uri).unwrap();
        assert_eq!(url.path(), "/v1.0/me");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs, uri.params);
    }

    #[test]
    fn test_beta_uri() {
        let config = ClientConfig::new("00000000-1111-2222-3333-444444444444");
        let client = Client::new(&config, ApiVersion::Beta, Arc::new(Anonymous)).unwrap();
        let url = client.build_uri(&Uri::tenant("/things")).unwrap();
        assert_eq!(
            url.path(),
            "/beta/00000000-1111-2222-3333-444444444444/things"
        );
        assert!(url.query().is_none());
    }

    #[test]
    fn test_segments_are_percent_encoded() {
        let config = ClientConfig::new("contoso.onmicrosoft.com");
        let client = Client::new(&config, ApiVersion::V1_0, Arc::new(Anonymous)).unwrap();

        let url = client
            .build_uri(&Uri::tenant("/things").segment("a/b?c").segment("cancel"))
            .unwrap();
        assert_eq!(
            url.path(),
            "/v1.0/contoso.onmicrosoft.com/things/a%2Fb%3Fc/cancel"
        );

        let url = client
            .build_uri(&Uri::tenant("/things").segment("%2e%2e"))
            .unwrap();
        assert_eq!(url.path(), "/v1.0/contoso.onmicrosoft.com/things/%252e%252e");
    }

    #[tokio::test]
    async fn test_headers_and_status_gating() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1.0/contoso.onmicrosoft.com/things")
                .header("Authorization", "Bearer secret")
                .header("Content-Type", "application/json")
                .header("Accept", "application/json")
                .json_body(json!({"name": "x"}));
            then.status(201).json_body(json!({"id": "1"}));
        });

        let client = client_for(&server, ApiVersion::V1_0);
        let input = RequestInput::new(Uri::tenant("/things"), &[StatusCode::CREATED])
            .with_json(&json!({"name": "x"}))
            .unwrap();
        let response = client.post(input).await.unwrap();

        mock.assert();
        assert_eq!(response.status, StatusCode::CREATED);
        let body: serde_json::Value = response.json().unwrap();
        assert_eq!(body["id"], "1");
    }

    #[tokio::test]
    async fn test_unexpected_status_carries_odata_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1.0/contoso.onmicrosoft.com/things/missing");
            then.status(404).json_body(json!({
                "error": {"code": "Request_ResourceNotFound", "message": "Resource 'missing' does not exist"}
            }));
        });

        let client = client_for(&server, ApiVersion::V1_0);
        let err = client
            .get(RequestInput::new(Uri::tenant("/things/missing"), &[StatusCode::OK]))
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        match err {
            GraphError::UnexpectedStatus { code, message, .. } => {
                assert_eq!(code.as_deref(), Some("Request_ResourceNotFound"));
                assert_eq!(message.as_deref(), Some("Resource 'missing' does not exist"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_success_status_outside_expected_set_fails() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(DELETE).path("/v1.0/contoso.onmicrosoft.com/things/1");
            then.status(200);
        });

        let client = client_for(&server, ApiVersion::V1_0);
        let err = client
            .delete(RequestInput::new(Uri::tenant("/things/1"), &[StatusCode::NO_CONTENT]))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::OK));
    }

    #[tokio::test]
    async fn test_get_follows_next_link() {
        let server = MockServer::start();
        let page_two_url = server.url("/v1.0/contoso.onmicrosoft.com/things/page2");

        let first = server.mock(|when, then| {
            when.method(GET).path("/v1.0/contoso.onmicrosoft.com/things");
            then.status(200).json_body(json!({
                "@odata.context": "ctx",
                "@odata.nextLink": page_two_url.clone(),
                "value": [{"id": "1"}, {"id": "2"}]
            }));
        });
        let second = server.mock(|when, then| {
            when.method(GET)
                .path("/v1.0/contoso.onmicrosoft.com/things/page2")
                .header("Authorization", "Bearer secret");
            then.status(200).json_body(json!({"value": [{"id": "3"}]}));
        });

        let client = client_for(&server, ApiVersion::V1_0);
        let response = client
            .get(RequestInput::new(Uri::tenant("/things"), &[StatusCode::OK]))
            .await
            .unwrap();

        first.assert();
        second.assert();
        let body: serde_json::Value = response.json().unwrap();
        assert_eq!(body["@odata.context"], "ctx");
        assert!(body.get("@odata.nextLink").is_none());
        let ids: Vec<&str> = body["value"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[tokio::test]
    async fn test_repeated_next_link_stops_paging() {
        let server = MockServer::start();
        let page_two_url = server.url("/v1.0/contoso.onmicrosoft.com/things/page2");

        server.mock(|when, then| {
            when.method(GET).path("/v1.0/contoso.onmicrosoft.com/things");
            then.status(200).json_body(json!({
                "@odata.nextLink": page_two_url.clone(),
                "value": [{"id": "1"}]
            }));
        });
        let second = server.mock(|when, then| {
            when.method(GET).path("/v1.0/contoso.onmicrosoft.com/things/page2");
            then.status(200).json_body(json!({
                "@odata.nextLink": page_two_url.clone(),
                "value": [{"id": "2"}]
            }));
        });

        let client = client_for(&server, ApiVersion::V1_0);
        let response = client
            .get(RequestInput::new(Uri::tenant("/things"), &[StatusCode::OK]))
            .await
            .unwrap();

        second.assert_hits(1);
        let body: serde_json::Value = response.json().unwrap();
        assert_eq!(body["value"].as_array().unwrap().len(), 2);
    }
}
