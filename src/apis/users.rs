use crate::{
    client::{CallOptions, InfluxClient},
    error::InfluxResult,
    models::{GetUsersParams, PostUser, User, Users},
    operations::{self, ZAP_TRACE_SPAN},
    response::ApiResponse,
};
use log::info;
use serde::de::IgnoredAny;

/// User API operations
pub struct UsersApi<'a> {
    client: &'a InfluxClient,
}

impl<'a> UsersApi<'a> {
    pub fn new(client: &'a InfluxClient) -> Self {
        Self { client }
    }

    /// List users
    pub async fn get_users(
        &self,
        params: &GetUsersParams,
        opts: &CallOptions,
    ) -> InfluxResult<Option<Users>> {
        self.get_users_with_http_info(params, opts)
            .await
            .map(ApiResponse::into_data)
    }

    pub async fn get_users_with_http_info(
        &self,
        params: &GetUsersParams,
        opts: &CallOptions,
    ) -> InfluxResult<ApiResponse<Users>> {
        info!("Listing users");
        let request = operations::GET_USERS
            .request()
            .query_opt("offset", params.offset)
            .query_opt("limit", params.limit)
            .query_opt("name", params.name.as_deref())
            .query_opt("id", params.id.as_deref())
            .header_opt(ZAP_TRACE_SPAN, opts.zap_trace_span.as_deref());

        self.client
            .invoke_with_http_info(&operations::GET_USERS, request, opts.token())
            .await
    }

    /// Create a user
    pub async fn post_users(&self, body: &PostUser, opts: &CallOptions) -> InfluxResult<Option<User>> {
        self.post_users_with_http_info(body, opts)
            .await
            .map(ApiResponse::into_data)
    }

    pub async fn post_users_with_http_info(
        &self,
        body: &PostUser,
        opts: &CallOptions,
    ) -> InfluxResult<ApiResponse<User>> {
        info!("Creating user: {}", body.name);
        let request = operations::POST_USERS
            .request()
            .header_opt(ZAP_TRACE_SPAN, opts.zap_trace_span.as_deref())
            .json_body(body)?;

        self.client
            .invoke_with_http_info(&operations::POST_USERS, request, opts.token())
            .await
    }

    /// Retrieve a user; `None` when it does not exist
    pub async fn get_users_id(&self, user_id: &str, opts: &CallOptions) -> InfluxResult<Option<User>> {
        self.get_users_id_with_http_info(user_id, opts)
            .await
            .map(ApiResponse::into_data)
    }

    pub async fn get_users_id_with_http_info(
        &self,
        user_id: &str,
        opts: &CallOptions,
    ) -> InfluxResult<ApiResponse<User>> {
        info!("Getting user {}", user_id);
        let request = operations::GET_USERS_ID
            .request()
            .path_param("userID", user_id)
            .header_opt(ZAP_TRACE_SPAN, opts.zap_trace_span.as_deref());

        self.client
            .invoke_with_http_info(&operations::GET_USERS_ID, request, opts.token())
            .await
    }

    /// Delete a user
    pub async fn delete_users_id(&self, user_id: &str, opts: &CallOptions) -> InfluxResult<()> {
        self.delete_users_id_with_http_info(user_id, opts)
            .await
            .map(|_| ())
    }

    pub async fn delete_users_id_with_http_info(
        &self,
        user_id: &str,
        opts: &CallOptions,
    ) -> InfluxResult<ApiResponse<()>> {
        info!("Deleting user {}", user_id);
        let request = operations::DELETE_USERS_ID
            .request()
            .path_param("userID", user_id)
            .header_opt(ZAP_TRACE_SPAN, opts.zap_trace_span.as_deref());

        self.client
            .invoke_with_http_info::<IgnoredAny>(&operations::DELETE_USERS_ID, request, opts.token())
            .await
            .map(|response| response.map(|_| ()))
    }

    /// Create a user by name (convenience method)
    pub async fn create_user(&self, name: &str) -> InfluxResult<Option<User>> {
        let body = PostUser {
            name: name.to_string(),
            oauth_id: None,
            status: None,
        };
        self.post_users(&body, &CallOptions::default()).await
    }
}
