//! Entitlement management resources: catalogs, access packages, the policies that
//! govern assignment, and the requests that create or remove assignments.

use crate::domain::odata;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogType {
    UserManaged,
    ServiceDefault,
    ServiceManaged,
    #[serde(untagged)]
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogState {
    Published,
    Unpublished,
    #[serde(untagged)]
    Other(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessPackageCatalog {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_type: Option<CatalogType>,
    #[serde(rename = "catalogStatus", skip_serializing_if = "Option::is_none")]
    pub state: Option<CatalogState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_externally_visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_date_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_date_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessPackage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_hidden: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_role_scopes_visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_date_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_date_time: Option<DateTime<Utc>>,
}

/// A set of users that can request, approve or review.
///
/// The concrete kind is carried in `odata_type`; the other fields only apply to
/// some kinds (`id` to single users and groups, `manager_level` to requestor
/// managers).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSet {
    #[serde(rename = "@odata.type", skip_serializing_if = "Option::is_none")]
    pub odata_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_backup: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_level: Option<i32>,
}

impl UserSet {
    pub fn single_user(id: impl Into<String>) -> Self {
        Self {
            odata_type: Some(odata::TYPE_SINGLE_USER.to_string()),
            is_backup: Some(false),
            id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn group_members(id: impl Into<String>) -> Self {
        Self {
            odata_type: Some(odata::TYPE_GROUP_MEMBERS.to_string()),
            is_backup: Some(false),
            id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn requestor_manager(manager_level: i32) -> Self {
        Self {
            odata_type: Some(odata::TYPE_REQUESTOR_MANAGER.to_string()),
            is_backup: Some(false),
            manager_level: Some(manager_level),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestorScopeType {
    NoSubjects,
    SpecificDirectorySubjects,
    SpecificConnectedOrganizationSubjects,
    AllConfiguredConnectedOrganizationSubjects,
    AllExistingConnectedOrganizationSubjects,
    AllExistingDirectoryMemberUsers,
    AllExistingDirectorySubjects,
    AllExternalSubjects,
    #[serde(untagged)]
    Other(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestorSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope_type: Option<RequestorScopeType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accept_requests: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_requestors: Option<Vec<UserSet>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApprovalMode {
    NoApproval,
    SingleStage,
    Serial,
    #[serde(untagged)]
    Other(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalStage {
    #[serde(rename = "approvalStageTimeOutInDays", skip_serializing_if = "Option::is_none")]
    pub approval_stage_timeout_in_days: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_approver_justification_required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_escalation_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub escalation_time_in_minutes: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_approvers: Option<Vec<UserSet>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub escalation_approvers: Option<Vec<UserSet>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_approval_required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_approval_required_for_extension: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_requestor_justification_required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval_mode: Option<ApprovalMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval_stages: Option<Vec<ApprovalStage>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccessReviewTimeoutBehavior {
    KeepAccess,
    RemoveAccess,
    AcceptAccessRecommendation,
    #[serde(untagged)]
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessReviewRecurrenceType {
    Weekly,
    Monthly,
    Quarterly,
    HalfYearly,
    Annual,
    #[serde(untagged)]
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessReviewReviewerType {
    #[serde(rename = "Self")]
    Requestor,
    Reviewers,
    Manager,
    #[serde(untagged)]
    Other(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentReviewSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence_type: Option<AccessReviewRecurrenceType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewer_type: Option<AccessReviewReviewerType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_in_days: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewers: Option<Vec<UserSet>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_access_recommendation_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_approval_justification_required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_review_timeout_behavior: Option<AccessReviewTimeoutBehavior>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessPackageAssignmentPolicy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_package_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_extend: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_in_days: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requestor_settings: Option<RequestorSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_approval_settings: Option<ApprovalSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_review_settings: Option<AssignmentReviewSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_date_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_date_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestType {
    UserAdd,
    UserExtend,
    UserUpdate,
    UserRemove,
    AdminAdd,
    AdminUpdate,
    AdminRemove,
    SystemAdd,
    SystemUpdate,
    SystemRemove,
    OnBehalfAdd,
    #[serde(untagged)]
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestState {
    Submitted,
    PendingApproval,
    Delivering,
    Delivered,
    DeliveryFailed,
    Denied,
    Scheduled,
    Canceled,
    PartiallyDelivered,
    #[serde(untagged)]
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExpirationPatternType {
    NotSpecified,
    NoExpiration,
    AfterDateTime,
    AfterDuration,
    #[serde(untagged)]
    Other(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpirationPattern {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub pattern_type: Option<ExpirationPatternType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date_time: Option<DateTime<Utc>>,
    /// ISO 8601 duration, e.g. `P30D`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestSchedule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration: Option<ExpirationPattern>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessPackageAssignment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignment_policy_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_package_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignment_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignment_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expired_date_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<RequestSchedule>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessPackageAssignmentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_type: Option<RequestType>,
    #[serde(rename = "requestState", skip_serializing_if = "Option::is_none")]
    pub state: Option<RequestState>,
    #[serde(rename = "requestStatus", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub justification: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_package_assignment: Option<AccessPackageAssignment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<RequestSchedule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_date_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date_time: Option<DateTime<Utc>>,
}

impl AccessPackageAssignmentRequest {
    /// Admin request assigning `target_id` to an access package under `policy_id`.
    pub fn admin_add(
        target_id: impl Into<String>,
        access_package_id: impl Into<String>,
        policy_id: impl Into<String>,
    ) -> Self {
        Self {
            request_type: Some(RequestType::AdminAdd),
            access_package_assignment: Some(AccessPackageAssignment {
                target_id: Some(target_id.into()),
                access_package_id: Some(access_package_id.into()),
                assignment_policy_id: Some(policy_id.into()),
                ..AccessPackageAssignment::default()
            }),
            ..Self::default()
        }
    }

    /// The service only accepts deletion of requests that reached a final state.
    pub fn is_deletable(&self) -> bool {
        matches!(
            self.state,
            Some(RequestState::Denied | RequestState::Canceled | RequestState::Delivered)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_policy_wire_names() {
        let policy = AccessPackageAssignmentPolicy {
            access_package_id: Some("ap-1".to_string()),
            display_name: Some("policy".to_string()),
            requestor_settings: Some(RequestorSettings {
                scope_type: Some(RequestorScopeType::NoSubjects),
                accept_requests: Some(true),
                allowed_requestors: None,
            }),
            request_approval_settings: Some(ApprovalSettings {
                is_approval_required: Some(true),
                approval_mode: Some(ApprovalMode::SingleStage),
                approval_stages: Some(vec![ApprovalStage {
                    approval_stage_timeout_in_days: Some(7),
                    primary_approvers: Some(vec![UserSet::single_user("u-1")]),
                    ..ApprovalStage::default()
                }]),
                ..ApprovalSettings::default()
            }),
            access_review_settings: Some(AssignmentReviewSettings {
                is_enabled: Some(true),
                recurrence_type: Some(AccessReviewRecurrenceType::Monthly),
                reviewer_type: Some(AccessReviewReviewerType::Requestor),
                access_review_timeout_behavior: Some(AccessReviewTimeoutBehavior::RemoveAccess),
                ..AssignmentReviewSettings::default()
            }),
            ..AccessPackageAssignmentPolicy::default()
        };

        let body = serde_json::to_value(&policy).unwrap();
        assert_eq!(
            body,
            json!({
                "accessPackageId": "ap-1",
                "displayName": "policy",
                "requestorSettings": {"scopeType": "NoSubjects", "acceptRequests": true},
                "requestApprovalSettings": {
                    "isApprovalRequired": true,
                    "approvalMode": "SingleStage",
                    "approvalStages": [{
                        "approvalStageTimeOutInDays": 7,
                        "primaryApprovers": [{
                            "@odata.type": "#microsoft.graph.singleUser",
                            "isBackup": false,
                            "id": "u-1"
                        }]
                    }]
                },
                "accessReviewSettings": {
                    "isEnabled": true,
                    "recurrenceType": "monthly",
                    "reviewerType": "Self",
                    "accessReviewTimeoutBehavior": "removeAccess"
                }
            })
        );
    }

    #[test]
    fn test_unknown_enum_values_do_not_fail() {
        let req: AccessPackageAssignmentRequest = serde_json::from_value(json!({
            "id": "r-1",
            "requestType": "SomeFutureType",
            "requestState": "Archived",
            "requestStatus": "Accepted"
        }))
        .unwrap();
        assert_eq!(
            req.request_type,
            Some(RequestType::Other("SomeFutureType".to_string()))
        );
        assert_eq!(req.state, Some(RequestState::Other("Archived".to_string())));
        assert!(!req.is_deletable());
    }

    #[test]
    fn test_unknown_policy_values_survive_resend() {
        let stored = json!({
            "id": "pol-1",
            "requestorSettings": {"scopeType": "SomeNewScope", "acceptRequests": true},
            "requestApprovalSettings": {"approvalMode": "MultiStage"},
            "accessReviewSettings": {
                "recurrenceType": "biweekly",
                "reviewerType": "Self",
                "accessReviewTimeoutBehavior": "escalate"
            }
        });
        let policy: AccessPackageAssignmentPolicy = serde_json::from_value(stored.clone()).unwrap();
        assert_eq!(
            policy.requestor_settings.as_ref().unwrap().scope_type,
            Some(RequestorScopeType::Other("SomeNewScope".to_string()))
        );
        assert_eq!(serde_json::to_value(&policy).unwrap(), stored);
    }

    #[test]
    fn test_deletable_states() {
        let mut req = AccessPackageAssignmentRequest::admin_add("user", "package", "policy");
        for (state, expected) in [
            (RequestState::Submitted, false),
            (RequestState::PendingApproval, false),
            (RequestState::Delivered, true),
            (RequestState::Denied, true),
            (RequestState::Canceled, true),
        ] {
            req.state = Some(state.clone());
            assert_eq!(req.is_deletable(), expected, "{:?}", state);
        }
    }
}
