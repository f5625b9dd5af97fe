use crate::{
    client::{CallOptions, InfluxClient},
    error::InfluxResult,
    models::{
        AddResourceMemberRequestBody, GetOrgsParams, Organization, Organizations,
        PatchOrganizationRequest, PostOrganizationRequest, ResourceMember, ResourceMembers,
        ResourceOwner, ResourceOwners,
    },
    operations::{self, ZAP_TRACE_SPAN},
    response::ApiResponse,
};
use log::{debug, info};
use serde::de::IgnoredAny;

/// Organization API operations, including membership and ownership
pub struct OrganizationsApi<'a> {
    client: &'a InfluxClient,
}

impl<'a> OrganizationsApi<'a> {
    pub fn new(client: &'a InfluxClient) -> Self {
        Self { client }
    }

    /// List organizations
    ///
    /// # Arguments
    /// * `params` - Optional filters; unset fields are not sent
    /// * `opts` - Trace span and cancellation
    pub async fn get_orgs(
        &self,
        params: &GetOrgsParams,
        opts: &CallOptions,
    ) -> InfluxResult<Option<Organizations>> {
        self.get_orgs_with_http_info(params, opts)
            .await
            .map(ApiResponse::into_data)
    }

    pub async fn get_orgs_with_http_info(
        &self,
        params: &GetOrgsParams,
        opts: &CallOptions,
    ) -> InfluxResult<ApiResponse<Organizations>> {
        info!("Listing organizations");
        let request = operations::GET_ORGS
            .request()
            .query_opt("offset", params.offset)
            .query_opt("limit", params.limit)
            .query_opt("descending", params.descending)
            .query_opt("org", params.org.as_deref())
            .query_opt("orgID", params.org_id.as_deref())
            .query_opt("userID", params.user_id.as_deref())
            .header_opt(ZAP_TRACE_SPAN, opts.zap_trace_span.as_deref());
        debug!("Query: {:?}", request.query_params);

        self.client
            .invoke_with_http_info(&operations::GET_ORGS, request, opts.token())
            .await
    }

    /// Create an organization
    pub async fn post_orgs(
        &self,
        body: &PostOrganizationRequest,
        opts: &CallOptions,
    ) -> InfluxResult<Option<Organization>> {
        self.post_orgs_with_http_info(body, opts)
            .await
            .map(ApiResponse::into_data)
    }

    pub async fn post_orgs_with_http_info(
        &self,
        body: &PostOrganizationRequest,
        opts: &CallOptions,
    ) -> InfluxResult<ApiResponse<Organization>> {
        info!("Creating organization: {}", body.name);
        let request = operations::POST_ORGS
            .request()
            .header_opt(ZAP_TRACE_SPAN, opts.zap_trace_span.as_deref())
            .json_body(body)?;

        self.client
            .invoke_with_http_info(&operations::POST_ORGS, request, opts.token())
            .await
    }

    /// Retrieve an organization; `None` when it does not exist
    ///
    /// # Arguments
    /// * `org_id` - ID of the organization
    pub async fn get_orgs_id(
        &self,
        org_id: &str,
        opts: &CallOptions,
    ) -> InfluxResult<Option<Organization>> {
        self.get_orgs_id_with_http_info(org_id, opts)
            .await
            .map(ApiResponse::into_data)
    }

    pub async fn get_orgs_id_with_http_info(
        &self,
        org_id: &str,
        opts: &CallOptions,
    ) -> InfluxResult<ApiResponse<Organization>> {
        info!("Getting organization {}", org_id);
        let request = operations::GET_ORGS_ID
            .request()
            .path_param("orgID", org_id)
            .header_opt(ZAP_TRACE_SPAN, opts.zap_trace_span.as_deref());

        self.client
            .invoke_with_http_info(&operations::GET_ORGS_ID, request, opts.token())
            .await
    }

    /// Update an organization
    pub async fn patch_orgs_id(
        &self,
        org_id: &str,
        body: &PatchOrganizationRequest,
        opts: &CallOptions,
    ) -> InfluxResult<Option<Organization>> {
        self.patch_orgs_id_with_http_info(org_id, body, opts)
            .await
            .map(ApiResponse::into_data)
    }

    pub async fn patch_orgs_id_with_http_info(
        &self,
        org_id: &str,
        body: &PatchOrganizationRequest,
        opts: &CallOptions,
    ) -> InfluxResult<ApiResponse<Organization>> {
        info!("Updating organization {}", org_id);
        let request = operations::PATCH_ORGS_ID
            .request()
            .path_param("orgID", org_id)
            .header_opt(ZAP_TRACE_SPAN, opts.zap_trace_span.as_deref())
            .json_body(body)?;

        self.client
            .invoke_with_http_info(&operations::PATCH_ORGS_ID, request, opts.token())
            .await
    }

    /// Delete an organization
    pub async fn delete_orgs_id(&self, org_id: &str, opts: &CallOptions) -> InfluxResult<()> {
        self.delete_orgs_id_with_http_info(org_id, opts)
            .await
            .map(|_| ())
    }

    pub async fn delete_orgs_id_with_http_info(
        &self,
        org_id: &str,
        opts: &CallOptions,
    ) -> InfluxResult<ApiResponse<()>> {
        info!("Deleting organization {}", org_id);
        let request = operations::DELETE_ORGS_ID
            .request()
            .path_param("orgID", org_id)
            .header_opt(ZAP_TRACE_SPAN, opts.zap_trace_span.as_deref());

        self.client
            .invoke_with_http_info::<IgnoredAny>(&operations::DELETE_ORGS_ID, request, opts.token())
            .await
            .map(|response| response.map(|_| ()))
    }

    /// List all members of an organization
    pub async fn get_orgs_id_members(
        &self,
        org_id: &str,
        opts: &CallOptions,
    ) -> InfluxResult<Option<ResourceMembers>> {
        self.get_orgs_id_members_with_http_info(org_id, opts)
            .await
            .map(ApiResponse::into_data)
    }

    pub async fn get_orgs_id_members_with_http_info(
        &self,
        org_id: &str,
        opts: &CallOptions,
    ) -> InfluxResult<ApiResponse<ResourceMembers>> {
        info!("Listing members of organization {}", org_id);
        let request = operations::GET_ORGS_ID_MEMBERS
            .request()
            .path_param("orgID", org_id)
            .header_opt(ZAP_TRACE_SPAN, opts.zap_trace_span.as_deref());

        self.client
            .invoke_with_http_info(&operations::GET_ORGS_ID_MEMBERS, request, opts.token())
            .await
    }

    /// Add a member to an organization
    pub async fn post_orgs_id_members(
        &self,
        org_id: &str,
        body: &AddResourceMemberRequestBody,
        opts: &CallOptions,
    ) -> InfluxResult<Option<ResourceMember>> {
        self.post_orgs_id_members_with_http_info(org_id, body, opts)
            .await
            .map(ApiResponse::into_data)
    }

    pub async fn post_orgs_id_members_with_http_info(
        &self,
        org_id: &str,
        body: &AddResourceMemberRequestBody,
        opts: &CallOptions,
    ) -> InfluxResult<ApiResponse<ResourceMember>> {
        info!("Adding member {} to organization {}", body.id, org_id);
        let request = operations::POST_ORGS_ID_MEMBERS
            .request()
            .path_param("orgID", org_id)
            .header_opt(ZAP_TRACE_SPAN, opts.zap_trace_span.as_deref())
            .json_body(body)?;

        self.client
            .invoke_with_http_info(&operations::POST_ORGS_ID_MEMBERS, request, opts.token())
            .await
    }

    /// Remove a member from an organization
    pub async fn delete_orgs_id_members_id(
        &self,
        org_id: &str,
        user_id: &str,
        opts: &CallOptions,
    ) -> InfluxResult<()> {
        self.delete_orgs_id_members_id_with_http_info(org_id, user_id, opts)
            .await
            .map(|_| ())
    }

    pub async fn delete_orgs_id_members_id_with_http_info(
        &self,
        org_id: &str,
        user_id: &str,
        opts: &CallOptions,
    ) -> InfluxResult<ApiResponse<()>> {
        info!("Removing member {} from organization {}", user_id, org_id);
        let request = operations::DELETE_ORGS_ID_MEMBERS_ID
            .request()
            .path_param("orgID", org_id)
            .path_param("userID", user_id)
            .header_opt(ZAP_TRACE_SPAN, opts.zap_trace_span.as_deref());

        self.client
            .invoke_with_http_info::<IgnoredAny>(
                &operations::DELETE_ORGS_ID_MEMBERS_ID,
                request,
                opts.token(),
            )
            .await
            .map(|response| response.map(|_| ()))
    }

    /// List all owners of an organization
    pub async fn get_orgs_id_owners(
        &self,
        org_id: &str,
        opts: &CallOptions,
    ) -> InfluxResult<Option<ResourceOwners>> {
        self.get_orgs_id_owners_with_http_info(org_id, opts)
            .await
            .map(ApiResponse::into_data)
    }

    pub async fn get_orgs_id_owners_with_http_info(
        &self,
        org_id: &str,
        opts: &CallOptions,
    ) -> InfluxResult<ApiResponse<ResourceOwners>> {
        info!("Listing owners of organization {}", org_id);
        let request = operations::GET_ORGS_ID_OWNERS
            .request()
            .path_param("orgID", org_id)
            .header_opt(ZAP_TRACE_SPAN, opts.zap_trace_span.as_deref());

        self.client
            .invoke_with_http_info(&operations::GET_ORGS_ID_OWNERS, request, opts.token())
            .await
    }

    /// Add an owner to an organization
    pub async fn post_orgs_id_owners(
        &self,
        org_id: &str,
        body: &AddResourceMemberRequestBody,
        opts: &CallOptions,
    ) -> InfluxResult<Option<ResourceOwner>> {
        self.post_orgs_id_owners_with_http_info(org_id, body, opts)
            .await
            .map(ApiResponse::into_data)
    }

    pub async fn post_orgs_id_owners_with_http_info(
        &self,
        org_id: &str,
        body: &AddResourceMemberRequestBody,
        opts: &CallOptions,
    ) -> InfluxResult<ApiResponse<ResourceOwner>> {
        info!("Adding owner {} to organization {}", body.id, org_id);
        let request = operations::POST_ORGS_ID_OWNERS
            .request()
            .path_param("orgID", org_id)
            .header_opt(ZAP_TRACE_SPAN, opts.zap_trace_span.as_deref())
            .json_body(body)?;

        self.client
            .invoke_with_http_info(&operations::POST_ORGS_ID_OWNERS, request, opts.token())
            .await
    }

    /// Remove an owner from an organization
    pub async fn delete_orgs_id_owners_id(
        &self,
        org_id: &str,
        user_id: &str,
        opts: &CallOptions,
    ) -> InfluxResult<()> {
        self.delete_orgs_id_owners_id_with_http_info(org_id, user_id, opts)
            .await
            .map(|_| ())
    }

    pub async fn delete_orgs_id_owners_id_with_http_info(
        &self,
        org_id: &str,
        user_id: &str,
        opts: &CallOptions,
    ) -> InfluxResult<ApiResponse<()>> {
        info!("Removing owner {} from organization {}", user_id, org_id);
        let request = operations::DELETE_ORGS_ID_OWNERS_ID
            .request()
            .path_param("orgID", org_id)
            .path_param("userID", user_id)
            .header_opt(ZAP_TRACE_SPAN, opts.zap_trace_span.as_deref());

        self.client
            .invoke_with_http_info::<IgnoredAny>(
                &operations::DELETE_ORGS_ID_OWNERS_ID,
                request,
                opts.token(),
            )
            .await
            .map(|response| response.map(|_| ()))
    }

    /// Create an organization by name (convenience method)
    pub async fn create_organization(&self, name: &str) -> InfluxResult<Option<Organization>> {
        let body = PostOrganizationRequest {
            name: name.to_string(),
            description: None,
        };
        self.post_orgs(&body, &CallOptions::default()).await
    }
}
