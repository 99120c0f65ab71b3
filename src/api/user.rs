use std::sync::Arc;

use poem::Request;
use poem_openapi::param::{Path, Query};
use poem_openapi::payload::{Json, PlainText};
use poem_openapi::OpenApi;

use crate::api::helpers::{page_request, web_message};
use crate::api::ApiTags;
use crate::errors::SystemError;
use crate::services::UserService;
use crate::types::dto::common::WebMessage;
use crate::types::dto::user::{
    AddRolesFormModel, LoginNameRequest, SaveRolesRequest, UpdatePasswordRequest, UserForm,
    UserFormModel, UserPage, UserUpdateForm,
};
use crate::types::internal::{RequestContext, UserQuery};

/// User administration endpoints
pub struct UserApi {
    user_service: Arc<UserService>,
    default_page_size: u64,
}

impl UserApi {
    pub fn new(user_service: Arc<UserService>, default_page_size: u64) -> Self {
        Self {
            user_service,
            default_page_size,
        }
    }
}

#[OpenApi(prefix_path = "/system/user")]
impl UserApi {
    /// Model for the add user form
    #[oai(path = "/add", method = "get", tag = "ApiTags::User")]
    async fn add(
        &self,
        #[oai(name = "parentId")] parent_id: Query<Option<i32>>,
    ) -> Result<Json<UserFormModel>, SystemError> {
        self.user_service
            .add_form(parent_id.0)
            .await
            .map(Json)
            .map_err(SystemError::from_internal_error)
    }

    /// Page of users, excluding the super administrator
    #[oai(path = "/list", method = "get", tag = "ApiTags::User")]
    async fn list(
        &self,
        status: Query<Option<String>>,
        #[oai(name = "groupId")] group_id: Query<Option<String>>,
        #[oai(name = "loginName")] login_name: Query<Option<String>>,
        page: Query<Option<u64>>,
        size: Query<Option<u64>>,
    ) -> Result<Json<UserPage>, SystemError> {
        let query = UserQuery {
            status: status.0,
            group_id: group_id.0,
            login_name: login_name.0,
        };

        self.user_service
            .find_page(&query, page_request(page.0, size.0, self.default_page_size))
            .await
            .map(Json)
            .map_err(SystemError::from_internal_error)
    }

    /// Create or update a user
    #[oai(path = "/saveUser", method = "post", tag = "ApiTags::User")]
    async fn save_user(&self, req: &Request, body: Json<UserForm>) -> Json<WebMessage> {
        let ctx = RequestContext::from_request(req);
        let form = body.0;
        let role_ids = form.role_ids.clone().unwrap_or_default();

        web_message("save_user", self.user_service.save_or_update(&ctx, form, &role_ids).await)
    }

    /// Model for the add-roles form
    #[oai(path = "/addRoles/:id", method = "get", tag = "ApiTags::User")]
    async fn add_roles(&self, id: Path<i32>) -> Result<Json<AddRolesFormModel>, SystemError> {
        self.user_service
            .add_roles_form(id.0)
            .await
            .map(Json)
            .map_err(SystemError::from_internal_error)
    }

    /// Grant roles to a user
    #[oai(path = "/saveRoles", method = "post", tag = "ApiTags::User")]
    async fn save_roles(&self, req: &Request, body: Json<SaveRolesRequest>) -> Json<WebMessage> {
        let ctx = RequestContext::from_request(req);
        let role_ids = body.role_ids.as_deref().unwrap_or_default();
        web_message("save_roles", self.user_service.add_roles(&ctx, body.id, role_ids).await)
    }

    /// Change a user's password
    ///
    /// Answers with a plain text message.
    #[oai(path = "/updatePassword", method = "post", tag = "ApiTags::User")]
    async fn update_password(&self, req: &Request, body: Json<UpdatePasswordRequest>) -> PlainText<String> {
        let ctx = RequestContext::from_request(req);

        match self.user_service.update_password(&ctx, body.id, &body.new_password).await {
            Ok(()) => PlainText("Password updated".to_string()),
            Err(err) => {
                tracing::error!("update_password failed: {}", err);
                PlainText(format!("Password update failed: {}", SystemError::from_internal_error(err).message()))
            }
        }
    }

    /// Reset a user's password to the default one
    #[oai(path = "/resetPassword/:id", method = "post", tag = "ApiTags::User")]
    async fn reset_password(&self, req: &Request, id: Path<i32>) -> Json<WebMessage> {
        let ctx = RequestContext::from_request(req);
        web_message("reset_password", self.user_service.reset_password(&ctx, id.0).await)
    }

    /// Model for the edit user form
    #[oai(path = "/edit/:id", method = "get", tag = "ApiTags::User")]
    async fn edit(&self, id: Path<i32>) -> Result<Json<UserFormModel>, SystemError> {
        self.user_service
            .edit_form(id.0)
            .await
            .map(Json)
            .map_err(SystemError::from_internal_error)
    }

    /// Update profile fields and roles of a user
    #[oai(path = "/update", method = "post", tag = "ApiTags::User")]
    async fn update(&self, req: &Request, body: Json<UserUpdateForm>) -> Json<WebMessage> {
        let ctx = RequestContext::from_request(req);
        web_message("update_user", self.user_service.update(&ctx, body.0).await)
    }

    /// `true` when no user has the login name yet
    #[oai(path = "/isNotExistLoginName", method = "post", tag = "ApiTags::User")]
    async fn is_not_exist_login_name(&self, body: Json<LoginNameRequest>) -> Result<Json<bool>, SystemError> {
        self.user_service
            .exists_login_name(&body.login_name)
            .await
            .map(|exists| Json(!exists))
            .map_err(SystemError::from_internal_error)
    }

    /// Delete a user
    #[oai(path = "/delete/:id", method = "post", tag = "ApiTags::User")]
    async fn delete(&self, req: &Request, id: Path<i32>) -> Json<WebMessage> {
        let ctx = RequestContext::from_request(req);
        web_message("delete_user", self.user_service.delete(&ctx, id.0).await)
    }

    /// Every permission granted to a user directly or through its group
    #[oai(path = "/permissions/:id", method = "get", tag = "ApiTags::User")]
    async fn permissions(&self, id: Path<i32>) -> Result<Json<Vec<String>>, SystemError> {
        self.user_service
            .all_permissions(id.0)
            .await
            .map(Json)
            .map_err(SystemError::from_internal_error)
    }
}
