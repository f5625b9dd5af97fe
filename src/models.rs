use crate::request::{serde_param, ParamValue};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Pagination links on collection responses
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Links {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
}

/// Telegraf plugin category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TelegrafPluginType {
    Input,
    Output,
    Processor,
    Aggregator,
}

impl ParamValue for TelegrafPluginType {
    fn to_param_string(&self) -> String {
        serde_param(self)
    }
}

/// A single Telegraf plugin template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TelegrafPlugin {
    #[serde(rename = "type")]
    pub plugin_type: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub config: Option<String>,
}

/// Telegraf plugins collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TelegrafPlugins {
    pub version: Option<String>,
    pub os: Option<String>,
    #[serde(default)]
    pub plugins: Vec<TelegrafPlugin>,
}

/// Organization and user status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Active,
    Inactive,
}

/// Organization information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Organization {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    /// Related resources keyed by relation (buckets, dashboards, members, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<BTreeMap<String, String>>,
}

/// Organizations collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Organizations {
    pub links: Option<Links>,
    #[serde(default)]
    pub orgs: Vec<Organization>,
}

/// Organization creation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PostOrganizationRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Organization update request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PatchOrganizationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Query filters for listing organizations
#[derive(Debug, Clone, Default)]
pub struct GetOrgsParams {
    pub offset: Option<u32>,
    pub limit: Option<u32>,
    pub descending: Option<bool>,
    pub org: Option<String>,
    pub org_id: Option<String>,
    pub user_id: Option<String>,
}

/// User information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "oauthID", skip_serializing_if = "Option::is_none")]
    pub oauth_id: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<BTreeMap<String, String>>,
}

/// Users collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Users {
    pub links: Option<Links>,
    #[serde(default)]
    pub users: Vec<User>,
}

/// User creation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PostUser {
    pub name: String,
    #[serde(rename = "oauthID", skip_serializing_if = "Option::is_none")]
    pub oauth_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

/// Query filters for listing users
#[derive(Debug, Clone, Default)]
pub struct GetUsersParams {
    pub offset: Option<u32>,
    pub limit: Option<u32>,
    pub name: Option<String>,
    pub id: Option<String>,
}

/// Role of a user on a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Member,
    Owner,
}

/// A user mapped to a resource as member or owner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ResourceMember {
    pub id: Option<String>,
    pub name: Option<String>,
    pub status: Option<Status>,
    pub role: Option<MemberRole>,
    pub links: Option<BTreeMap<String, String>>,
}

/// Members (or owners) of a resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ResourceMembers {
    pub links: Option<Links>,
    #[serde(default)]
    pub users: Vec<ResourceMember>,
}

/// Owners share the member representation; `role` is `owner`
pub type ResourceOwner = ResourceMember;
pub type ResourceOwners = ResourceMembers;

/// Body for adding a member or owner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AddResourceMemberRequestBody {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Error response from API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub code: Option<String>,
    pub message: Option<String>,
    pub op: Option<String>,
    pub err: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn organization_wire_format() {
        let org: Organization = serde_json::from_value(json!({
            "id": "0a5b1c",
            "name": "Constant Pro",
            "createdAt": "2024-01-02T03:04:05Z",
            "status": "active",
            "links": {
                "buckets": "/api/v2/buckets?org=Constant Pro",
                "self": "/api/v2/orgs/0a5b1c"
            }
        }))
        .unwrap();

        assert_eq!(org.id.as_deref(), Some("0a5b1c"));
        assert_eq!(org.status, Some(Status::Active));
        assert_eq!(
            org.links.unwrap().get("self").map(String::as_str),
            Some("/api/v2/orgs/0a5b1c")
        );
    }

    #[test]
    fn create_request_skips_unset_fields() {
        let body = serde_json::to_value(PostOrganizationRequest {
            name: "acme".into(),
            description: None,
        })
        .unwrap();
        assert_eq!(body, json!({ "name": "acme" }));
    }

    #[test]
    fn plugin_type_query_value() {
        assert_eq!(TelegrafPluginType::Aggregator.to_param_string(), "aggregator");
    }
}
