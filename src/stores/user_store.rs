use std::collections::HashSet;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, SqlErr,
};

use crate::errors::internal::UserError;
use crate::errors::InternalError;
use crate::types::db::user::{self, ActiveModel, Entity as User, ADMIN};
use crate::types::db::user_role::{self, Entity as UserRole};
use crate::types::db::Status;
use crate::types::internal::PageRequest;

/// Typed user list filters, after the raw query string has been coerced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub status: Option<Status>,
    pub group_id: Option<i32>,
    pub login_name: Option<String>,
}

/// One page of users plus totals
#[derive(Debug)]
pub struct UserPageResult {
    pub users: Vec<user::Model>,
    pub total: u64,
    pub total_pages: u64,
}

/// UserStore persists `sys_user` rows and their role links
#[derive(Debug, Default)]
pub struct UserStore {}

impl UserStore {
    pub fn new() -> Self {
        Self {}
    }

    pub async fn find_by_id(
        &self,
        conn: &impl ConnectionTrait,
        id: i32,
    ) -> Result<Option<user::Model>, InternalError> {
        User::find_by_id(id)
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_user_by_id", e))
    }

    /// Like [`UserStore::find_by_id`] but a missing user is an error
    pub async fn get_by_id(
        &self,
        conn: &impl ConnectionTrait,
        id: i32,
    ) -> Result<user::Model, InternalError> {
        self.find_by_id(conn, id)
            .await?
            .ok_or_else(|| UserError::UserIdNotFound { user_id: id }.into())
    }

    pub async fn find_by_login_name(
        &self,
        conn: &impl ConnectionTrait,
        login_name: &str,
    ) -> Result<Option<user::Model>, InternalError> {
        User::find()
            .filter(user::Column::LoginName.eq(login_name))
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_user_by_login_name", e))
    }

    pub async fn exists_login_name(
        &self,
        conn: &impl ConnectionTrait,
        login_name: &str,
    ) -> Result<bool, InternalError> {
        let count = User::find()
            .filter(user::Column::LoginName.eq(login_name))
            .count(conn)
            .await
            .map_err(|e| InternalError::database("count_users_by_login_name", e))?;

        Ok(count > 0)
    }

    /// Page through users matching `filter`
    ///
    /// The super administrator is never listed.
    pub async fn find_page(
        &self,
        conn: &impl ConnectionTrait,
        filter: &UserFilter,
        page: PageRequest,
    ) -> Result<UserPageResult, InternalError> {
        let mut select = User::find().filter(user::Column::LoginName.ne(ADMIN));

        if let Some(status) = filter.status {
            select = select.filter(user::Column::Status.eq(status));
        }
        if let Some(group_id) = filter.group_id {
            select = select.filter(user::Column::GroupId.eq(group_id));
        }
        if let Some(login_name) = filter.login_name.as_deref().filter(|s| !s.is_empty()) {
            select = select.filter(user::Column::LoginName.contains(login_name));
        }

        let paginator = select.order_by_asc(user::Column::Id).paginate(conn, page.size);
        let totals = paginator
            .num_items_and_pages()
            .await
            .map_err(|e| InternalError::database("count_user_page", e))?;
        let users = paginator
            .fetch_page(page.page)
            .await
            .map_err(|e| InternalError::database("fetch_user_page", e))?;

        Ok(UserPageResult {
            users,
            total: totals.number_of_items,
            total_pages: totals.number_of_pages,
        })
    }

    /// Insert a new user
    ///
    /// # Returns
    /// * `Ok(Model)` - The stored user with its generated id
    /// * `Err(InternalError)` - `DuplicateLoginName` on a unique violation, or a database error
    pub async fn insert(
        &self,
        conn: &impl ConnectionTrait,
        model: ActiveModel,
    ) -> Result<user::Model, InternalError> {
        let login_name = model.login_name.clone().take().unwrap_or_default();

        model
            .insert(conn)
            .await
            .map_err(|e| map_unique_violation(e, &login_name, "insert_user"))
    }

    pub async fn update(
        &self,
        conn: &impl ConnectionTrait,
        model: ActiveModel,
    ) -> Result<user::Model, InternalError> {
        model
            .update(conn)
            .await
            .map_err(|e| InternalError::database("update_user", e))
    }

    /// Delete a user together with its role links
    pub async fn delete(&self, conn: &impl ConnectionTrait, id: i32) -> Result<(), InternalError> {
        UserRole::delete_many()
            .filter(user_role::Column::UserId.eq(id))
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("delete_user_roles", e))?;

        let result = User::delete_by_id(id)
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("delete_user", e))?;

        if result.rows_affected == 0 {
            return Err(UserError::UserIdNotFound { user_id: id }.into());
        }

        Ok(())
    }

    pub async fn role_ids(
        &self,
        conn: &impl ConnectionTrait,
        user_id: i32,
    ) -> Result<Vec<i32>, InternalError> {
        let links = UserRole::find()
            .filter(user_role::Column::UserId.eq(user_id))
            .all(conn)
            .await
            .map_err(|e| InternalError::database("find_user_role_ids", e))?;

        Ok(links.into_iter().map(|l| l.role_id).collect())
    }

    /// Make `role_ids` the complete role set of the user
    pub async fn replace_roles(
        &self,
        conn: &impl ConnectionTrait,
        user_id: i32,
        role_ids: &[i32],
    ) -> Result<(), InternalError> {
        UserRole::delete_many()
            .filter(user_role::Column::UserId.eq(user_id))
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("clear_user_roles", e))?;

        self.insert_links(conn, user_id, role_ids.iter().copied()).await
    }

    /// Grant `role_ids` in addition to the roles the user already has
    pub async fn add_roles(
        &self,
        conn: &impl ConnectionTrait,
        user_id: i32,
        role_ids: &[i32],
    ) -> Result<(), InternalError> {
        let existing: HashSet<i32> = self.role_ids(conn, user_id).await?.into_iter().collect();
        let missing = role_ids.iter().copied().filter(|id| !existing.contains(id));

        self.insert_links(conn, user_id, missing).await
    }

    async fn insert_links(
        &self,
        conn: &impl ConnectionTrait,
        user_id: i32,
        role_ids: impl Iterator<Item = i32>,
    ) -> Result<(), InternalError> {
        let mut seen = HashSet::new();
        let links: Vec<user_role::ActiveModel> = role_ids
            .filter(|id| seen.insert(*id))
            .map(|role_id| user_role::ActiveModel {
                user_id: sea_orm::Set(user_id),
                role_id: sea_orm::Set(role_id),
            })
            .collect();

        if links.is_empty() {
            return Ok(());
        }

        UserRole::insert_many(links)
            .exec_without_returning(conn)
            .await
            .map_err(|e| InternalError::database("insert_user_roles", e))?;

        Ok(())
    }
}

fn map_unique_violation(err: DbErr, login_name: &str, operation: &str) -> InternalError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => UserError::DuplicateLoginName {
            login_name: login_name.to_string(),
        }
        .into(),
        _ => InternalError::database(operation, err),
    }
}
