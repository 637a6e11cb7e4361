use serde::{Deserialize, Serialize};

pub const TYPE_IP_NAMED_LOCATION: &str = "#microsoft.graph.ipNamedLocation";
pub const TYPE_COUNTRY_NAMED_LOCATION: &str = "#microsoft.graph.countryNamedLocation";
pub const TYPE_IPV4_CIDR_RANGE: &str = "#microsoft.graph.iPv4CidrRange";
pub const TYPE_IPV6_CIDR_RANGE: &str = "#microsoft.graph.iPv6CidrRange";
pub const TYPE_SINGLE_USER: &str = "#microsoft.graph.singleUser";
pub const TYPE_GROUP_MEMBERS: &str = "#microsoft.graph.groupMembers";
pub const TYPE_REQUESTOR_MANAGER: &str = "#microsoft.graph.requestorManager";

/// OData system query options for collection requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub filter: Option<String>,
    pub select: Vec<String>,
    pub expand: Vec<String>,
    pub order_by: Option<String>,
    pub search: Option<String>,
    pub top: Option<u32>,
    pub skip: Option<u32>,
    pub count: bool,
}

impl Query {
    pub fn filter(filter: impl Into<String>) -> Self {
        Self {
            filter: Some(filter.into()),
            ..Self::default()
        }
    }

    /// Renders the options as query parameters, omitting anything unset.
    pub fn params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(filter) = self.filter.as_deref().filter(|f| !f.is_empty()) {
            params.push(("$filter".to_string(), filter.to_string()));
        }
        if !self.select.is_empty() {
            params.push(("$select".to_string(), self.select.join(",")));
        }
        if !self.expand.is_empty() {
            params.push(("$expand".to_string(), self.expand.join(",")));
        }
        if let Some(order_by) = &self.order_by {
            params.push(("$orderby".to_string(), order_by.clone()));
        }
        if let Some(search) = &self.search {
            // $search terms must be double-quoted
            let quoted = if search.starts_with('"') && search.ends_with('"') && search.len() > 1 {
                search.clone()
            } else {
                format!("\"{}\"", search)
            };
            params.push(("$search".to_string(), quoted));
        }
        if let Some(top) = self.top {
            params.push(("$top".to_string(), top.to_string()));
        }
        if let Some(skip) = self.skip {
            params.push(("$skip".to_string(), skip.to_string()));
        }
        if self.count {
            params.push(("$count".to_string(), "true".to_string()));
        }
        params
    }
}

/// Metadata common to every OData payload. Unknown fields are ignored, so any
/// entity or collection body can be read through this to inspect its shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OData {
    #[serde(rename = "@odata.context", skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    #[serde(rename = "@odata.type", skip_serializing_if = "Option::is_none")]
    pub odata_type: Option<String>,

    #[serde(rename = "@odata.id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "@odata.nextLink", skip_serializing_if = "Option::is_none")]
    pub next_link: Option<String>,

    #[serde(rename = "@odata.count", skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Vec<serde_json::Value>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ODataError>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ODataError {
    pub code: Option<String>,
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inner_error: Option<serde_json::Value>,
}

/// Envelope of a collection response after pagination has been resolved.
#[derive(Debug, Clone, Deserialize)]
pub struct Collection<T> {
    pub value: Option<Vec<T>>,
}

impl<T> Collection<T> {
    pub fn into_vec(self) -> Vec<T> {
        self.value.unwrap_or_default()
    }
}
