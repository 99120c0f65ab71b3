use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait};

use crate::errors::InternalError;
use crate::types::db::role::{self, Entity as Role};
use crate::types::db::{group_role, user_role};

#[derive(Debug, Default)]
pub struct RoleStore {}

impl RoleStore {
    pub fn new() -> Self {
        Self {}
    }

    pub async fn find_by_enabled(
        &self,
        conn: &impl ConnectionTrait,
        enabled: bool,
    ) -> Result<Vec<role::Model>, InternalError> {
        Role::find()
            .filter(role::Column::Enabled.eq(enabled))
            .order_by_asc(role::Column::Id)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("find_roles_by_enabled", e))
    }

    pub async fn find_by_ids(
        &self,
        conn: &impl ConnectionTrait,
        ids: &[i32],
    ) -> Result<Vec<role::Model>, InternalError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        Role::find()
            .filter(role::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(role::Column::Id)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("find_roles_by_ids", e))
    }

    /// Roles linked to the user through `sys_user_role`
    pub async fn roles_for_user(
        &self,
        conn: &impl ConnectionTrait,
        user_id: i32,
    ) -> Result<Vec<role::Model>, InternalError> {
        Role::find()
            .join(JoinType::InnerJoin, role::Relation::UserRoles.def())
            .filter(user_role::Column::UserId.eq(user_id))
            .order_by_asc(role::Column::Id)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("find_roles_for_user", e))
    }

    /// Roles linked to the group through `sys_group_role`
    pub async fn roles_for_group(
        &self,
        conn: &impl ConnectionTrait,
        group_id: i32,
    ) -> Result<Vec<role::Model>, InternalError> {
        Role::find()
            .join(JoinType::InnerJoin, role::Relation::GroupRoles.def())
            .filter(group_role::Column::GroupId.eq(group_id))
            .order_by_asc(role::Column::Id)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("find_roles_for_group", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::{insert_group, insert_role, link_group_role, setup_test_db};
    use crate::types::db::Status;

    #[tokio::test]
    async fn test_find_by_enabled() {
        let db = setup_test_db().await;
        let store = RoleStore::new();
        insert_role(&db, "dispatcher", true, &[]).await;
        insert_role(&db, "legacy", false, &[]).await;

        let enabled = store.find_by_enabled(&db, true).await.unwrap();
        let disabled = store.find_by_enabled(&db, false).await.unwrap();

        assert_eq!(enabled.len(), 1);
        assert_eq!(enabled[0].code, "dispatcher");
        assert_eq!(disabled[0].code, "legacy");
    }

    #[tokio::test]
    async fn test_find_by_ids_skips_unknown_and_empty() {
        let db = setup_test_db().await;
        let store = RoleStore::new();
        let role = insert_role(&db, "dispatcher", true, &[]).await;

        assert!(store.find_by_ids(&db, &[]).await.unwrap().is_empty());
        let found = store.find_by_ids(&db, &[role.id, 999]).await.unwrap();
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn test_roles_for_group() {
        let db = setup_test_db().await;
        let store = RoleStore::new();
        let group = insert_group(&db, "North depot", None, Status::Enable).await;
        let role = insert_role(&db, "depot_manager", true, &["bus:edit"]).await;
        insert_role(&db, "other", true, &[]).await;
        link_group_role(&db, group.id, role.id).await;

        let roles = store.roles_for_group(&db, group.id).await.unwrap();

        assert_eq!(roles.len(), 1);
        assert_eq!(roles[0].permission_list(), vec!["bus:edit"]);
    }
}
