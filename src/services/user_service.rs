use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use sea_orm::{ActiveValue::NotSet, ConnectionTrait, DatabaseConnection, Set, TransactionTrait};

use crate::app_data::AppData;
use crate::errors::internal::{DatabaseError, UserError};
use crate::errors::InternalError;
use crate::services::PasswordHasher;
use crate::stores::{GroupStore, RoleStore, UserFilter, UserStore};
use crate::types::db::user::{
    self, DEFAULT_PASSWORD, EMAIL_MAX_LEN, LOGIN_NAME_MAX_LEN, MOBILE_MAX_LEN, NAME_MAX_LEN, TEL_MAX_LEN,
};
use crate::types::db::{Sex, Status};
use crate::types::dto::user::{
    join_role_codes, sex_options, status_options, AddRolesFormModel, GroupView, RoleView,
    UserForm, UserFormModel, UserPage, UserUpdateForm, UserView,
};
use crate::types::internal::{PageRequest, RequestContext, UserQuery};

/// User administration: accounts, their roles and the admin form models
///
/// Every mutation runs in its own transaction. The built-in `admin` account
/// is hidden from listings and cannot be deleted.
pub struct UserService {
    db: DatabaseConnection,
    user_store: Arc<UserStore>,
    role_store: Arc<RoleStore>,
    group_store: Arc<GroupStore>,
    password_hasher: Arc<PasswordHasher>,
}

impl UserService {
    /// Create UserService from AppData
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            db: app_data.db.clone(),
            user_store: app_data.user_store.clone(),
            role_store: app_data.role_store.clone(),
            group_store: app_data.group_store.clone(),
            password_hasher: app_data.password_hasher.clone(),
        }
    }

    /// Load one user with its roles and group
    ///
    /// # Returns
    /// * `Ok(UserView)` - The user
    /// * `Err(InternalError)` - `UserIdNotFound` or a database error
    pub async fn find_by_id(&self, id: i32) -> Result<UserView, InternalError> {
        let user = self.user_store.get_by_id(&self.db, id).await?;
        self.to_view(&self.db, user).await
    }

    /// Page through users, never including the super administrator
    ///
    /// `status` must name a status constant (case-insensitive) and `group_id`
    /// must be an integer. Blank values are treated as absent.
    pub async fn find_page(&self, query: &UserQuery, page: PageRequest) -> Result<UserPage, InternalError> {
        let filter = user_filter(query)?;
        let result = self.user_store.find_page(&self.db, &filter, page).await?;

        let mut items = Vec::with_capacity(result.users.len());
        for user in result.users {
            items.push(self.to_view(&self.db, user).await?);
        }

        Ok(UserPage {
            items,
            page: page.page,
            size: page.size,
            total: result.total,
            total_pages: result.total_pages,
        })
    }

    /// Create a user when `form.id` is absent, otherwise update it
    ///
    /// On create the login name is required and must be unique, and the password
    /// falls back to [`DEFAULT_PASSWORD`]. On update only the fields present in
    /// the form are written and the password is re-hashed only when one is given.
    /// A non-empty `role_ids` replaces the user's roles.
    ///
    /// # Returns
    /// * `Ok(UserView)` - The stored user
    /// * `Err(InternalError)` - Validation, lookup or database error
    pub async fn save_or_update(
        &self,
        ctx: &RequestContext,
        form: UserForm,
        role_ids: &[i32],
    ) -> Result<UserView, InternalError> {
        check_lengths(&[
            ("loginName", form.login_name.as_deref().map(str::trim), LOGIN_NAME_MAX_LEN),
            ("name", form.name.as_deref(), NAME_MAX_LEN),
            ("email", form.email.as_deref(), EMAIL_MAX_LEN),
            ("mobile", form.mobile.as_deref(), MOBILE_MAX_LEN),
            ("tel", form.tel.as_deref(), TEL_MAX_LEN),
        ])?;
        self.check_group_id(&self.db, form.group_id).await?;
        self.check_role_ids(&self.db, role_ids).await?;

        let txn = self.db.begin().await.map_err(|e| DatabaseError::TransactionBegin { source: e })?;

        let saved = match form.id {
            None => self.create(&txn, form).await?,
            Some(id) => self.modify(&txn, id, form).await?,
        };

        if !role_ids.is_empty() {
            self.user_store.replace_roles(&txn, saved.id, role_ids).await?;
        }

        let view = self.to_view(&txn, saved).await?;

        txn.commit().await.map_err(|e| DatabaseError::TransactionCommit { source: e })?;

        tracing::info!("User {} ({}) saved by {}", view.id, view.login_name, ctx.actor_id);

        Ok(view)
    }

    async fn create(&self, conn: &impl ConnectionTrait, form: UserForm) -> Result<user::Model, InternalError> {
        let login_name = form
            .login_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(UserError::MissingLoginName)?
            .to_string();

        if self.user_store.exists_login_name(conn, &login_name).await? {
            return Err(UserError::DuplicateLoginName { login_name }.into());
        }

        let password = form.password.as_deref().filter(|p| !p.is_empty()).unwrap_or(DEFAULT_PASSWORD);
        let hashed = self.password_hasher.hash(password)?;
        let now = chrono::Utc::now().timestamp();

        let model = user::ActiveModel {
            id: NotSet,
            login_name: Set(login_name),
            name: Set(form.name),
            password: Set(hashed.hash),
            salt: Set(Some(hashed.salt)),
            sex: Set(form.sex.map(Sex::from).unwrap_or_default()),
            email: Set(form.email),
            mobile: Set(form.mobile),
            tel: Set(form.tel),
            status: Set(form.status.map(Status::from).unwrap_or_default()),
            group_id: Set(form.group_id),
            create_time: Set(now),
            update_time: Set(now),
        };

        self.user_store.insert(conn, model).await
    }

    async fn modify(&self, conn: &impl ConnectionTrait, id: i32, form: UserForm) -> Result<user::Model, InternalError> {
        let existing = self.user_store.get_by_id(conn, id).await?;
        let is_super_admin = existing.is_super_admin();
        let current_login_name = existing.login_name.clone();
        let mut model: user::ActiveModel = existing.into();

        if let Some(login_name) = form.login_name.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            if login_name != current_login_name {
                if is_super_admin {
                    return Err(UserError::SuperAdminProtected { action: "renamed".to_string() }.into());
                }
                if self.user_store.exists_login_name(conn, login_name).await? {
                    return Err(UserError::DuplicateLoginName { login_name: login_name.to_string() }.into());
                }
                model.login_name = Set(login_name.to_string());
            }
        }

        if let Some(password) = form.password.as_deref().filter(|p| !p.is_empty()) {
            let hashed = self.password_hasher.hash(password)?;
            model.password = Set(hashed.hash);
            model.salt = Set(Some(hashed.salt));
        }
        if form.name.is_some() {
            model.name = Set(form.name);
        }
        if form.email.is_some() {
            model.email = Set(form.email);
        }
        if form.mobile.is_some() {
            model.mobile = Set(form.mobile);
        }
        if form.tel.is_some() {
            model.tel = Set(form.tel);
        }
        if let Some(sex) = form.sex {
            model.sex = Set(sex.into());
        }
        if let Some(status) = form.status {
            model.status = Set(status.into());
        }
        if form.group_id.is_some() {
            model.group_id = Set(form.group_id);
        }
        model.update_time = Set(chrono::Utc::now().timestamp());

        self.user_store.update(conn, model).await
    }

    /// Grant `role_ids` on top of the roles the user already holds
    pub async fn add_roles(&self, ctx: &RequestContext, id: i32, role_ids: &[i32]) -> Result<(), InternalError> {
        self.user_store.get_by_id(&self.db, id).await?;
        self.check_role_ids(&self.db, role_ids).await?;

        let txn = self.db.begin().await.map_err(|e| DatabaseError::TransactionBegin { source: e })?;
        self.user_store.add_roles(&txn, id, role_ids).await?;
        txn.commit().await.map_err(|e| DatabaseError::TransactionCommit { source: e })?;

        tracing::info!("Roles {:?} granted to user {} by {}", role_ids, id, ctx.actor_id);

        Ok(())
    }

    /// Replace the password with a fresh hash of `new_password`
    pub async fn update_password(&self, ctx: &RequestContext, id: i32, new_password: &str) -> Result<(), InternalError> {
        if new_password.is_empty() {
            return Err(UserError::InvalidField {
                field: "newPassword".to_string(),
                reason: "must not be empty".to_string(),
            }
            .into());
        }
        self.set_password(id, new_password).await?;
        tracing::info!("Password of user {} changed by {}", id, ctx.actor_id);
        Ok(())
    }

    /// Set the password back to [`DEFAULT_PASSWORD`]
    pub async fn reset_password(&self, ctx: &RequestContext, id: i32) -> Result<(), InternalError> {
        self.set_password(id, DEFAULT_PASSWORD).await?;
        tracing::info!("Password of user {} reset by {}", id, ctx.actor_id);
        Ok(())
    }

    async fn set_password(&self, id: i32, password: &str) -> Result<(), InternalError> {
        let txn = self.db.begin().await.map_err(|e| DatabaseError::TransactionBegin { source: e })?;

        let mut model: user::ActiveModel = self.user_store.get_by_id(&txn, id).await?.into();
        let hashed = self.password_hasher.hash(password)?;
        model.password = Set(hashed.hash);
        model.salt = Set(Some(hashed.salt));
        model.update_time = Set(chrono::Utc::now().timestamp());
        self.user_store.update(&txn, model).await?;

        txn.commit().await.map_err(|e| DatabaseError::TransactionCommit { source: e })?;
        Ok(())
    }

    /// Copy the editable profile fields onto the stored user
    ///
    /// `name`, `email`, `mobile`, `tel` and `group_id` are copied as given, so
    /// `None` clears them. `sex` and `status` keep their value when `None`.
    /// `role_ids` replaces the role set when present, even when empty.
    pub async fn update(&self, ctx: &RequestContext, form: UserUpdateForm) -> Result<UserView, InternalError> {
        check_lengths(&[
            ("name", form.name.as_deref(), NAME_MAX_LEN),
            ("email", form.email.as_deref(), EMAIL_MAX_LEN),
            ("mobile", form.mobile.as_deref(), MOBILE_MAX_LEN),
            ("tel", form.tel.as_deref(), TEL_MAX_LEN),
        ])?;
        self.check_group_id(&self.db, form.group_id).await?;
        if let Some(role_ids) = &form.role_ids {
            self.check_role_ids(&self.db, role_ids).await?;
        }

        let txn = self.db.begin().await.map_err(|e| DatabaseError::TransactionBegin { source: e })?;

        let mut model: user::ActiveModel = self.user_store.get_by_id(&txn, form.id).await?.into();
        model.name = Set(form.name);
        model.email = Set(form.email);
        model.mobile = Set(form.mobile);
        model.tel = Set(form.tel);
        model.group_id = Set(form.group_id);
        if let Some(sex) = form.sex {
            model.sex = Set(sex.into());
        }
        if let Some(status) = form.status {
            model.status = Set(status.into());
        }
        model.update_time = Set(chrono::Utc::now().timestamp());

        let saved = self.user_store.update(&txn, model).await?;
        if let Some(role_ids) = &form.role_ids {
            self.user_store.replace_roles(&txn, saved.id, role_ids).await?;
        }
        let view = self.to_view(&txn, saved).await?;

        txn.commit().await.map_err(|e| DatabaseError::TransactionCommit { source: e })?;

        tracing::info!("User {} updated by {}", view.id, ctx.actor_id);

        Ok(view)
    }

    pub async fn exists_login_name(&self, login_name: &str) -> Result<bool, InternalError> {
        self.user_store.exists_login_name(&self.db, login_name.trim()).await
    }

    /// Delete a user and its role links
    ///
    /// # Returns
    /// * `Err(InternalError)` - `SuperAdminProtected` for the `admin` account, `UserIdNotFound`,
    ///   or a database error
    pub async fn delete(&self, ctx: &RequestContext, id: i32) -> Result<(), InternalError> {
        let txn = self.db.begin().await.map_err(|e| DatabaseError::TransactionBegin { source: e })?;

        let user = self.user_store.get_by_id(&txn, id).await?;
        if Self::is_super_admin(&user) {
            return Err(UserError::SuperAdminProtected { action: "deleted".to_string() }.into());
        }
        self.user_store.delete(&txn, id).await?;

        txn.commit().await.map_err(|e| DatabaseError::TransactionCommit { source: e })?;

        tracing::info!("User {} ({}) deleted by {}", id, user.login_name, ctx.actor_id);

        Ok(())
    }

    /// Permission strings from the user's roles and from the roles of the user's group
    ///
    /// Sorted and free of duplicates.
    pub async fn all_permissions(&self, id: i32) -> Result<Vec<String>, InternalError> {
        let user = self.user_store.get_by_id(&self.db, id).await?;

        let mut roles = self.role_store.roles_for_user(&self.db, id).await?;
        if let Some(group_id) = user.group_id {
            roles.extend(self.role_store.roles_for_group(&self.db, group_id).await?);
        }

        let permissions: BTreeSet<String> = roles.iter().flat_map(|r| r.permission_list()).collect();
        Ok(permissions.into_iter().collect())
    }

    /// Role codes of `user` joined by `,` with a trailing comma
    pub async fn role_names(&self, user: &user::Model) -> Result<String, InternalError> {
        let roles = self.role_store.roles_for_user(&self.db, user.id).await?;
        Ok(join_role_codes(&roles))
    }

    pub fn is_super_admin(user: &user::Model) -> bool {
        user.is_super_admin()
    }

    /// Model for the add form, optionally under a parent group
    pub async fn add_form(&self, parent_group_id: Option<i32>) -> Result<UserFormModel, InternalError> {
        let parent_group = match parent_group_id {
            Some(id) => Some(GroupView::from(self.group_store.get_by_id(&self.db, id).await?)),
            None => None,
        };

        self.form_model(None, parent_group).await
    }

    /// Model for the edit form of user `id`
    pub async fn edit_form(&self, id: i32) -> Result<UserFormModel, InternalError> {
        let user = self.find_by_id(id).await?;
        self.form_model(Some(user), None).await
    }

    /// The user plus the enabled roles they do not hold yet
    pub async fn add_roles_form(&self, id: i32) -> Result<AddRolesFormModel, InternalError> {
        let user = self.find_by_id(id).await?;
        let held: HashSet<i32> = user.role_ids.iter().copied().collect();

        let available_roles = self
            .role_store
            .find_by_enabled(&self.db, true)
            .await?
            .into_iter()
            .filter(|r| !held.contains(&r.id))
            .map(RoleView::from)
            .collect();

        Ok(AddRolesFormModel { user, available_roles })
    }

    async fn form_model(
        &self,
        user: Option<UserView>,
        parent_group: Option<GroupView>,
    ) -> Result<UserFormModel, InternalError> {
        let roles = self.role_store.find_by_enabled(&self.db, true).await?;
        let groups = self.group_store.find_all(&self.db).await?;

        Ok(UserFormModel {
            user,
            roles: roles.into_iter().map(RoleView::from).collect(),
            status_options: status_options(),
            sex_options: sex_options(),
            parent_group,
            groups: groups.into_iter().map(GroupView::from).collect(),
        })
    }

    async fn to_view(&self, conn: &impl ConnectionTrait, user: user::Model) -> Result<UserView, InternalError> {
        let roles = self.role_store.roles_for_user(conn, user.id).await?;
        let group = match user.group_id {
            Some(group_id) => self.group_store.find_by_id(conn, group_id).await?,
            None => None,
        };

        Ok(UserView::from_model(user, &roles, group.as_ref()))
    }

    async fn check_group_id(&self, conn: &impl ConnectionTrait, group_id: Option<i32>) -> Result<(), InternalError> {
        if let Some(group_id) = group_id {
            self.group_store.get_by_id(conn, group_id).await?;
        }
        Ok(())
    }

    async fn check_role_ids(&self, conn: &impl ConnectionTrait, role_ids: &[i32]) -> Result<(), InternalError> {
        let found: HashSet<i32> = self
            .role_store
            .find_by_ids(conn, role_ids)
            .await?
            .into_iter()
            .map(|r| r.id)
            .collect();

        match role_ids.iter().find(|id| !found.contains(*id)) {
            Some(&role_id) => Err(UserError::RoleIdNotFound { role_id }.into()),
            None => Ok(()),
        }
    }
}

/// Coerce the raw query-string filters into typed ones
fn user_filter(query: &UserQuery) -> Result<UserFilter, InternalError> {
    let status = non_blank(&query.status)
        .map(|value| {
            value
                .parse::<Status>()
                .map_err(|_| UserError::InvalidStatus { value: value.to_string() })
        })
        .transpose()?;

    let group_id = non_blank(&query.group_id)
        .map(|value| {
            value
                .trim()
                .parse::<i32>()
                .map_err(|_| UserError::InvalidGroupId { value: value.to_string() })
        })
        .transpose()?;

    Ok(UserFilter {
        status,
        group_id,
        login_name: non_blank(&query.login_name).map(|s| s.trim().to_string()),
    })
}

/// Reject any `(field, value, max)` whose value is longer than `max` characters
fn check_lengths(fields: &[(&str, Option<&str>, usize)]) -> Result<(), UserError> {
    for &(field, value, max) in fields {
        if value.is_some_and(|v| v.chars().count() > max) {
            return Err(UserError::InvalidField {
                field: field.to_string(),
                reason: format!("must be at most {} characters", max),
            });
        }
    }
    Ok(())
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(status: Option<&str>, group_id: Option<&str>, login_name: Option<&str>) -> UserQuery {
        UserQuery {
            status: status.map(str::to_string),
            group_id: group_id.map(str::to_string),
            login_name: login_name.map(str::to_string),
        }
    }

    #[test]
    fn test_user_filter_coerces_values() {
        let filter = user_filter(&query(Some("disable"), Some(" 7 "), Some(" ali "))).unwrap();

        assert_eq!(filter.status, Some(Status::Disable));
        assert_eq!(filter.group_id, Some(7));
        assert_eq!(filter.login_name.as_deref(), Some("ali"));
    }

    #[test]
    fn test_user_filter_treats_blank_as_absent() {
        let filter = user_filter(&query(Some(""), Some("  "), Some(""))).unwrap();
        assert_eq!(filter, UserFilter::default());
    }

    #[test]
    fn test_user_filter_rejects_bad_status() {
        match user_filter(&query(Some("LOCKED"), None, None)) {
            Err(InternalError::User(UserError::InvalidStatus { value })) => assert_eq!(value, "LOCKED"),
            other => panic!("Expected InvalidStatus, got {:?}", other),
        }
    }

    #[test]
    fn test_check_lengths_counts_characters() {
        assert!(check_lengths(&[("name", Some("Łukasz Żółkiewski"), NAME_MAX_LEN), ("tel", None, TEL_MAX_LEN)]).is_ok());

        match check_lengths(&[("mobile", Some("013800138000"), MOBILE_MAX_LEN)]) {
            Err(UserError::InvalidField { field, reason }) => {
                assert_eq!(field, "mobile");
                assert_eq!(reason, "must be at most 11 characters");
            }
            other => panic!("Expected InvalidField, got {:?}", other),
        }
    }

    #[test]
    fn test_user_filter_rejects_bad_group_id() {
        assert!(matches!(
            user_filter(&query(None, Some("north"), None)),
            Err(InternalError::User(UserError::InvalidGroupId { .. }))
        ));
    }
}
